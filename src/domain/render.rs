/*
Renders a bracket as an indented tree for debugging.

Each line shows the seat position, followed by the `name` payload when one is set.
Missing children on one side are left out, so a seat with a single child shows one branch.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::bracket::{Bracket, Node, NodeId};

pub trait BracketTreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn label(node: &Node) -> String {
    match node.name() {
        Some(name) => format!("{} {}", node.position(), name),
        None => node.position().to_string(),
    }
}

impl BracketTreeConvert for Bracket {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(bracket: &Bracket, node_idx: NodeId) -> Tree<String> {
            let Some(node) = bracket.get(node_idx) else {
                return Tree::new(String::new());
            };
            let leaves: Vec<_> = [node.left(), node.right()]
                .into_iter()
                .flatten()
                .map(|child| build_tree(bracket, child))
                .collect();
            Tree::new(label(node)).with_leaves(leaves)
        }

        match self.root() {
            Some(root_idx) => build_tree(self, root_idx),
            None => Tree::new("Empty bracket".to_string()),
        }
    }
}
