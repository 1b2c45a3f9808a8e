use serde::Serialize;

use crate::models::Node;
use crate::resolve::navigate::join_path;

/// Depth used by `recursive_view` when none is given
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// A node in a recursive view, labelled with its path from the view root
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtreeNode {
    pub path: String,
    pub text: Option<String>,
    pub children: Vec<SubtreeNode>,
}

/// Recursive view of `node` down to `max_depth` levels below it.
///
/// The view root has the empty path and depth 0. Anything deeper than
/// `max_depth` is pruned, as are null and non-tree values.
pub fn subtree(node: &Node, max_depth: usize) -> Option<SubtreeNode> {
    walk(node, 0, String::new(), max_depth)
}

fn walk(node: &Node, depth: usize, path: String, max_depth: usize) -> Option<SubtreeNode> {
    if depth > max_depth {
        return None;
    }

    match node {
        Node::Text(text) => Some(SubtreeNode {
            path,
            text: Some(text.clone()),
            children: Vec::new(),
        }),
        Node::Branch(branch) => {
            let children = branch
                .children()
                .filter_map(|(key, child)| walk(child, depth + 1, join_path(&path, key), max_depth))
                .collect();
            Some(SubtreeNode {
                text: branch.summary().map(str::to_string),
                path,
                children,
            })
        }
        Node::Other(_) => None,
    }
}
