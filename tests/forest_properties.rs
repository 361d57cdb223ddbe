// tests/forest_properties.rs

use std::collections::HashSet;

use amplify_dash::graph::{InputRef, NodeRecord, TreeNode, assemble_forest, find_roots};
use proptest::prelude::*;

// Acyclic collections: node N may only depend on nodes 0..N-1. Node 0 is
// always a root so most collections produce at least one tree.
fn node_collection_strategy(max_nodes: usize) -> impl Strategy<Value = Vec<NodeRecord>> {
    (1..=max_nodes).prop_flat_map(|num_nodes| {
        let per_node = (any::<bool>(), proptest::collection::vec(any::<usize>(), 0..3));
        proptest::collection::vec(per_node, num_nodes).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (is_root, deps))| {
                    let mut inputs = Vec::new();
                    if is_root || i == 0 {
                        inputs.push(InputRef::Root);
                    }
                    if i > 0 {
                        for dep in deps {
                            inputs.push(InputRef::dependency(format!("n{}", dep % i)));
                        }
                    }
                    NodeRecord::new(format!("n{i}"), inputs)
                })
                .collect()
        })
    })
}

fn check_edges(tree: &TreeNode, nodes: &[NodeRecord]) -> bool {
    tree.children().iter().all(|c| {
        let record = nodes.iter().find(|n| n.id == c.name).expect("child record");
        record.dependencies().contains(&tree.name.as_str()) && check_edges(c, nodes)
    })
}

proptest! {
    #[test]
    fn roots_are_exactly_the_marked_nodes(nodes in node_collection_strategy(12)) {
        let roots: Vec<&str> = find_roots(&nodes).iter().map(|n| n.id.as_str()).collect();
        let expected: Vec<&str> = nodes
            .iter()
            .filter(|n| n.inputs.contains(&InputRef::Root))
            .map(|n| n.id.as_str())
            .collect();
        prop_assert_eq!(roots, expected);
    }

    #[test]
    fn forest_has_one_tree_per_root_and_only_real_edges(nodes in node_collection_strategy(12)) {
        let forest = assemble_forest(&nodes).unwrap();
        let roots = find_roots(&nodes);

        prop_assert_eq!(forest.len(), roots.len());
        for (tree, root) in forest.iter().zip(roots) {
            prop_assert_eq!(&tree.name, &root.id);
            prop_assert!(check_edges(tree, &nodes));
        }
    }

    #[test]
    fn every_direct_dependent_of_a_root_is_a_child(nodes in node_collection_strategy(12)) {
        let forest = assemble_forest(&nodes).unwrap();
        for tree in &forest {
            let children: HashSet<&str> = tree.children().iter().map(|c| c.name.as_str()).collect();
            let dependents: HashSet<&str> = nodes
                .iter()
                .filter(|n| n.dependencies().contains(&tree.name.as_str()))
                .map(|n| n.id.as_str())
                .collect();
            prop_assert_eq!(children, dependents);
        }
    }

    #[test]
    fn assembly_is_repeatable(nodes in node_collection_strategy(12)) {
        prop_assert_eq!(assemble_forest(&nodes).unwrap(), assemble_forest(&nodes).unwrap());
    }
}
