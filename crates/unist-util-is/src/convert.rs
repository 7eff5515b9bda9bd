//! Test specifications and their compiled form.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use unist_node::{Node, Prop};

use crate::error::TestError;

/// Signature of a node predicate: `(node, index in parent, parent)`.
///
/// The root of a walk, or a node checked on its own, has neither index nor
/// parent.
pub type Predicate = dyn Fn(&Node, Option<usize>, Option<&Node>) -> bool;

/// Which nodes a walk or check should match.
#[derive(Clone, Default)]
pub enum Test {
    /// Matches every node.
    #[default]
    Always,
    /// Matches nodes whose `type` equals the name.
    Kind(String),
    /// Matches nodes where every listed field equals the node's field.
    Props(IndexMap<String, Prop>),
    Predicate(Rc<Predicate>),
    /// Matches when any of the tests match. An empty list matches nothing.
    AnyOf(Vec<Test>),
}

impl Test {
    pub fn kind(name: impl Into<String>) -> Self {
        Test::Kind(name.into())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Node, Option<usize>, Option<&Node>) -> bool + 'static,
    {
        Test::Predicate(Rc::new(f))
    }

    pub fn props<I, K, V>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Prop>,
    {
        Test::Props(
            props
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Resolve this test once into a reusable [`Check`].
    pub fn compile(&self) -> Check {
        match self {
            Test::Always => Check::always(),
            Test::Kind(kind) => {
                let kind = kind.clone();
                check(move |node, _, _| node.is_kind(&kind))
            }
            Test::Props(props) => {
                let props = props.clone();
                check(move |node, _, _| {
                    props
                        .iter()
                        .all(|(name, expected)| node.prop(name).as_ref() == Some(expected))
                })
            }
            Test::Predicate(predicate) => Check(Rc::clone(predicate)),
            Test::AnyOf(tests) => {
                let checks: Vec<Check> = tests.iter().map(Test::compile).collect();
                check(move |node, index, parent| {
                    checks.iter().any(|c| c.matches(node, index, parent))
                })
            }
        }
    }

    /// Parse the JSON form of a test: `null` matches everything, a string
    /// names a type, an object lists fields to match, an array combines tests.
    pub fn from_json(value: &Value) -> Result<Test, TestError> {
        match value {
            Value::Null => Ok(Test::Always),
            Value::String(kind) => Ok(Test::Kind(kind.clone())),
            Value::Object(fields) => Ok(Test::Props(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), Prop::from_json(value)))
                    .collect(),
            )),
            Value::Array(items) => items
                .iter()
                .map(Test::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Test::AnyOf),
            Value::Bool(_) => Err(TestError::InvalidTest { found: "boolean" }),
            Value::Number(_) => Err(TestError::InvalidTest { found: "number" }),
        }
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Test::Always => f.write_str("Always"),
            Test::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Test::Props(props) => f.debug_tuple("Props").field(props).finish(),
            Test::Predicate(_) => f.write_str("Predicate(..)"),
            Test::AnyOf(tests) => f.debug_tuple("AnyOf").field(tests).finish(),
        }
    }
}

impl From<&str> for Test {
    fn from(value: &str) -> Self {
        Test::Kind(value.to_string())
    }
}

impl From<String> for Test {
    fn from(value: String) -> Self {
        Test::Kind(value)
    }
}

impl<T: Into<Test>> From<Vec<T>> for Test {
    fn from(value: Vec<T>) -> Self {
        Test::AnyOf(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Test>> From<Option<T>> for Test {
    fn from(value: Option<T>) -> Self {
        value.map_or(Test::Always, Into::into)
    }
}

/// Compiled test.
#[derive(Clone)]
pub struct Check(Rc<Predicate>);

impl Check {
    pub fn always() -> Self {
        check(|_, _, _| true)
    }

    pub fn matches(&self, node: &Node, index: Option<usize>, parent: Option<&Node>) -> bool {
        (self.0)(node, index, parent)
    }
}

impl Default for Check {
    fn default() -> Self {
        Check::always()
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Check(..)")
    }
}

fn check<F>(f: F) -> Check
where
    F: Fn(&Node, Option<usize>, Option<&Node>) -> bool + 'static,
{
    Check(Rc::new(f))
}
