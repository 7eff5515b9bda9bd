//! Upstream: syntax-tree/unist-util-visit and unist-util-visit-parents test suites.

use serde_json::json;
use unist_node::Node;
use unist_util_is::{Check, Test};
use unist_util_visit::{visit, visit_with, PreOrder, Traverse, VisitAction, VisitOptions};

fn paragraph() -> Node {
    Node::from_json(&json!({
        "type": "root",
        "children": [
            {
                "type": "paragraph",
                "children": [
                    {"type": "text", "value": "Some "},
                    {"type": "emphasis", "children": [{"type": "text", "value": "emphasis"}]},
                    {"type": "text", "value": ", "},
                    {"type": "strong", "children": [{"type": "text", "value": "importance"}]},
                    {"type": "text", "value": "."}
                ]
            }
        ]
    }))
    .unwrap()
}

fn values(tree: &Node, test: &Test) -> Vec<String> {
    let mut out = vec![];
    visit(tree, test, |node, _, _| {
        if let Some(value) = node.prop("value") {
            out.push(value.as_str().unwrap_or_default().to_string());
        }
    });
    out
}

#[test]
fn visit_walks_every_node_in_pre_order() {
    let tree = paragraph();
    let mut kinds = vec![];
    visit(&tree, &Test::Always, |node, _, _| {
        kinds.push(node.kind().to_string());
    });
    assert_eq!(
        kinds,
        vec![
            "root", "paragraph", "text", "emphasis", "text", "text", "strong", "text", "text"
        ]
    );
}

#[test]
fn visit_passes_index_and_parent() {
    let tree = paragraph();
    let mut positions = vec![];
    visit(&tree, &"text".into(), |node, index, parent| {
        positions.push((
            node.prop("value").and_then(|v| v.as_str().map(str::to_string)),
            index,
            parent.map(|p| p.kind().to_string()),
        ));
    });
    assert_eq!(positions.len(), 5);
    assert_eq!(
        positions[0],
        (Some("Some ".to_string()), Some(0), Some("paragraph".to_string()))
    );
    assert_eq!(
        positions[1],
        (Some("emphasis".to_string()), Some(0), Some("emphasis".to_string()))
    );
    assert_eq!(
        positions[4],
        (Some(".".to_string()), Some(4), Some("paragraph".to_string()))
    );

    let mut root_position = None;
    visit(&tree, &"root".into(), |_, index, parent| {
        root_position = Some((index, parent.is_some()));
    });
    assert_eq!(root_position, Some((None, false)));
}

#[test]
fn visit_with_test_filters_visitor_calls() {
    let tree = paragraph();
    assert_eq!(
        values(&tree, &"text".into()),
        vec!["Some ", "emphasis", ", ", "importance", "."]
    );
    assert_eq!(values(&tree, &"strong".into()), Vec::<String>::new());
}

#[test]
fn skip_prunes_the_subtree() {
    let tree = paragraph();
    let mut texts = vec![];
    visit(&tree, &Test::Always, |node, _, _| {
        if node.is_kind("emphasis") {
            return VisitAction::Skip;
        }
        if let Some(value) = node.prop("value") {
            texts.push(value.as_str().unwrap_or_default().to_string());
        }
        VisitAction::Continue
    });
    assert_eq!(texts, vec!["Some ", ", ", "importance", "."]);
}

#[test]
fn exit_stops_the_walk() {
    let tree = paragraph();
    let mut count = 0;
    visit(&tree, &"text".into(), |_, _, _| {
        count += 1;
        if count == 2 {
            VisitAction::Exit
        } else {
            VisitAction::Continue
        }
    });
    assert_eq!(count, 2);
}

#[test]
fn reverse_visits_children_right_to_left() {
    let tree = paragraph();
    let mut texts = vec![];
    visit_with(
        &tree,
        &"text".into(),
        VisitOptions { reverse: true },
        |node, _, _| {
            texts.push(node.prop("value").unwrap().as_str().unwrap().to_string());
        },
    );
    assert_eq!(texts, vec![".", "importance", ", ", "emphasis", "Some "]);
}

#[test]
fn visitor_edits_to_children_are_observed() {
    let tree = paragraph();
    let mut kinds = vec![];
    visit(&tree, &Test::Always, |node, _, _| {
        if node.is_kind("paragraph") {
            node.remove_child(1);
        }
        kinds.push(node.kind().to_string());
    });
    assert!(!kinds.contains(&"emphasis".to_string()));
    assert_eq!(kinds.len(), 7);
}

#[test]
fn pre_order_is_usable_through_the_trait() {
    let tree = paragraph();
    let walker: &dyn Traverse = &PreOrder::new();
    let check = Test::from("strong").compile();
    let mut hits = 0;
    walker.traverse(&tree, &check, &mut |node, index, _| {
        assert!(node.is_kind("strong"));
        assert_eq!(index, Some(3));
        hits += 1;
        VisitAction::Continue
    });
    assert_eq!(hits, 1);

    let mut all = 0;
    PreOrder::reversed().traverse(&tree, &Check::always(), &mut |_, _, _| {
        all += 1;
        VisitAction::Continue
    });
    assert_eq!(all, 9);
}

#[test]
fn very_deep_trees_do_not_overflow_the_stack() {
    let depth = 100_000;
    let mut tree = Node::new("leaf");
    for _ in 0..depth {
        tree = Node::new("wrap").with_children([tree]);
    }
    let mut count = 0;
    visit(&tree, &Test::Always, |_, _, _| count += 1);
    assert_eq!(count, depth + 1);
}
