use proptest::prelude::*;
use unist_util_index::{Node, NodeIndex};

const WORDS: [&str; 3] = ["foo", "bar", "__proto__"];

fn nodes() -> Vec<Node> {
    (0..8)
        .map(|i| Node::leaf("node", [("word", WORDS[i % WORDS.len()])]))
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(usize),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Add),
        (0usize..8).prop_map(Op::Remove),
    ]
}

/// Reference model: one insertion-ordered list of node positions per word.
fn expected(ops: &[Op]) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); WORDS.len()];
    for op in ops {
        match *op {
            Op::Add(i) => {
                let bucket = &mut buckets[i % WORDS.len()];
                if !bucket.contains(&i) {
                    bucket.push(i);
                }
            }
            Op::Remove(i) => buckets[i % WORDS.len()].retain(|&j| j != i),
        }
    }
    buckets
}

fn apply(index: &mut NodeIndex, nodes: &[Node], op: Op) {
    match op {
        Op::Add(i) => {
            index.add(&nodes[i]);
        }
        Op::Remove(i) => {
            index.remove(&nodes[i]);
        }
    }
}

proptest! {
    #[test]
    fn property_index_matches_reference_model(ops in prop::collection::vec(op(), 0..64)) {
        let nodes = nodes();
        let mut index = NodeIndex::new("word");
        for op in &ops {
            apply(&mut index, &nodes, *op);
        }

        for (word, bucket) in WORDS.iter().zip(expected(&ops)) {
            let want: Vec<Node> = bucket.iter().map(|&i| nodes[i].clone()).collect();
            prop_assert_eq!(index.get(*word), want.as_slice());
        }
    }

    #[test]
    fn property_repeated_operations_are_idempotent(ops in prop::collection::vec(op(), 0..64)) {
        let nodes = nodes();
        let mut once = NodeIndex::new("word");
        let mut twice = NodeIndex::new("word");
        for op in &ops {
            apply(&mut once, &nodes, *op);
            apply(&mut twice, &nodes, *op);
            apply(&mut twice, &nodes, *op);
        }

        for word in WORDS {
            prop_assert_eq!(once.get(word), twice.get(word));
        }
    }

    #[test]
    fn property_adds_preserve_insertion_order(order in Just((0usize..8).collect::<Vec<_>>()).prop_shuffle()) {
        let nodes: Vec<Node> = (0..8).map(|_| Node::leaf("node", [("word", "same")])).collect();
        let mut index = NodeIndex::new("word");
        for &i in &order {
            index.add(&nodes[i]);
        }

        let want: Vec<Node> = order.iter().map(|&i| nodes[i].clone()).collect();
        prop_assert_eq!(index.get("same"), want.as_slice());
    }
}
