use serde::Serialize;

use crate::address::ParsedAddress;
use crate::models::Node;

/// One step of a resolved spindle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpindleNode {
    /// `None` for no-pscale spindles
    pub pscale: Option<i32>,
    /// `None` only for the root entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit: Option<String>,
    pub text: String,
}

/// Walk `tree` along `address`, collecting one entry per level reached.
///
/// The root contributes an entry only when it is a branch with a string
/// summary. The walk stops quietly at the first key that cannot be
/// followed, so the chain is never longer than the digits plus the root.
pub fn walk_tree(tree: &Node, address: &ParsedAddress) -> Vec<SpindleNode> {
    let mut chain = Vec::with_capacity(address.walk_digits.len() + 1);

    if let Some(summary) = tree.summary() {
        chain.push(SpindleNode {
            pscale: address.root_pscale(),
            digit: None,
            text: summary.to_string(),
        });
    }

    let mut node = tree;
    for (i, digit) in address.walk_digits.iter().enumerate() {
        let Some(next) = node.as_branch().and_then(|branch| branch.get(digit)) else {
            log::trace!("walk stopped at digit {i} ({digit:?})");
            break;
        };
        node = next;
        chain.push(SpindleNode {
            pscale: address.pscale_at(i),
            digit: Some(digit.clone()),
            text: visited_text(node),
        });
    }

    chain
}

fn visited_text(node: &Node) -> String {
    match node.own_text() {
        Some(text) => text.to_string(),
        None => node.encode(),
    }
}
