//! Node field values.
//!
//! Primitive props compare by value, composite props ([`Shared`]) compare by
//! identity, the same way a `Map` in the upstream ecosystem would treat them.

use serde_json::{Number, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Composite JSON value (array or object) with identity semantics.
///
/// Two `Shared` values are equal only when they point at the same allocation,
/// regardless of content. Cloning a `Shared` keeps its identity.
#[derive(Clone)]
pub struct Shared(Rc<Value>);

impl Shared {
    pub fn new(value: Value) -> Self {
        Self(Rc::new(value))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for Shared {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Shared {}

impl Hash for Shared {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:#x}, {})", self.addr(), self.0)
    }
}

/// Value of a named node field.
#[derive(Debug, Clone)]
pub enum Prop {
    Null,
    Bool(bool),
    /// Numbers follow SameValueZero: `-0 == 0` and `NaN == NaN`.
    Number(f64),
    String(String),
    Object(Shared),
}

impl Prop {
    /// Convert a JSON value. Arrays and objects get a fresh identity.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Prop::Null,
            Value::Bool(b) => Prop::Bool(*b),
            Value::Number(n) => Prop::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Prop::String(s.clone()),
            Value::Array(_) | Value::Object(_) => Prop::Object(Shared::new(value.clone())),
        }
    }

    /// JSON view of this prop. `NaN` and infinities have no JSON form and
    /// become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Prop::Null => Value::Null,
            Prop::Bool(b) => Value::Bool(*b),
            Prop::Number(n) => number_to_json(*n),
            Prop::String(s) => Value::String(s.clone()),
            Prop::Object(shared) => shared.value().clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Prop::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Prop::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Prop::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Prop::Null)
    }

    /// Structural comparison: like `==`, except object props compare by
    /// content instead of identity.
    pub fn deep_eq(&self, other: &Prop) -> bool {
        match (self, other) {
            (Prop::Object(a), Prop::Object(b)) => a.value() == b.value(),
            _ => self == other,
        }
    }
}

/// Canonical bit pattern for SameValueZero comparison and hashing.
fn number_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

impl PartialEq for Prop {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Prop::Null, Prop::Null) => true,
            (Prop::Bool(a), Prop::Bool(b)) => a == b,
            (Prop::Number(a), Prop::Number(b)) => number_bits(*a) == number_bits(*b),
            (Prop::String(a), Prop::String(b)) => a == b,
            (Prop::Object(a), Prop::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Prop {}

impl Hash for Prop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Prop::Null => {}
            Prop::Bool(b) => b.hash(state),
            Prop::Number(n) => number_bits(*n).hash(state),
            Prop::String(s) => s.hash(state),
            Prop::Object(shared) => shared.hash(state),
        }
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Prop::String(value.to_string())
    }
}

impl From<String> for Prop {
    fn from(value: String) -> Self {
        Prop::String(value)
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Prop::Bool(value)
    }
}

impl From<f64> for Prop {
    fn from(value: f64) -> Self {
        Prop::Number(value)
    }
}

macro_rules! prop_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Prop {
                fn from(value: $t) -> Self {
                    Prop::Number(value as f64)
                }
            }
        )*
    };
}

prop_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32);

impl From<Shared> for Prop {
    fn from(value: Shared) -> Self {
        Prop::Object(value)
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(_) | Value::Object(_) => Prop::Object(Shared::new(value)),
            other => Prop::from_json(&other),
        }
    }
}

impl From<&Value> for Prop {
    fn from(value: &Value) -> Self {
        Prop::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn numbers_use_same_value_zero() {
        assert_eq!(Prop::from(-0.0), Prop::from(0));
        assert_eq!(Prop::from(f64::NAN), Prop::from(f64::NAN));
        assert_eq!(Prop::from(4.0), Prop::from(4u8));
        assert_ne!(Prop::from(1), Prop::from("1"));

        let set: HashSet<Prop> = [Prop::from(-0.0), Prop::from(0), Prop::from(f64::NAN)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn composite_props_compare_by_identity() {
        let a = Prop::from(json!({"foo": "bar"}));
        let b = Prop::from(json!({"foo": "bar"}));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert!(a.deep_eq(&b));
    }

    #[test]
    fn to_json_keeps_integers_integral() {
        assert_eq!(Prop::from(3).to_json(), json!(3));
        assert_eq!(Prop::from(2.5).to_json(), json!(2.5));
        assert_eq!(Prop::from(f64::NAN).to_json(), json!(null));
        assert_eq!(Prop::from(json!([1, 2])).to_json(), json!([1, 2]));
    }
}
