use serde::Serialize;

use crate::models::Node;
use crate::resolve::navigate::block_navigate;

/// Lateral view of one node: its text and its immediate children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spread {
    pub text: Option<String>,
    pub children: Vec<SpreadChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadChild {
    pub digit: String,
    pub text: Option<String>,
    /// Whether the child has content of its own to descend into
    pub branch: bool,
}

/// Spread of the node at `path` (the tree itself when `path` is absent).
///
/// `None` when the path cannot be followed or lands on null.
pub fn spread(tree: &Node, path: Option<&str>) -> Option<Spread> {
    let target = block_navigate(tree, path)?;

    match target {
        Node::Text(text) => Some(Spread {
            text: Some(text.clone()),
            children: Vec::new(),
        }),
        Node::Branch(branch) => Some(Spread {
            text: branch.summary().map(str::to_string),
            children: branch
                .children()
                .map(|(digit, child)| SpreadChild {
                    digit: digit.to_string(),
                    text: child.own_text().map(str::to_string),
                    branch: child.is_branch(),
                })
                .collect(),
        }),
        Node::Other(_) if target.is_null() => None,
        Node::Other(_) => Some(Spread {
            text: None,
            children: Vec::new(),
        }),
    }
}
