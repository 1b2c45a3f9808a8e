use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::address::{ParsedAddress, Spindle};
use crate::models::{Block, Node};
use crate::resolve::navigate::block_navigate;
use crate::resolve::spread::{SpreadChild, spread};
use crate::resolve::subtree::{SubtreeNode, subtree};
use crate::resolve::walk::{SpindleNode, walk_tree};

/// Symbol selecting the spread of the spindle's end node
pub const SPREAD_SYMBOL: &str = "~";
/// Symbol selecting the recursive subtree of the spindle's end node
pub const SUBTREE_SYMBOL: &str = "*";
/// Depth of the subtree returned for [`Selector::Subtree`]
pub const POINT_SUBTREE_DEPTH: usize = 9;

/// What to pick out of a resolved spindle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A single entry, by pscale
    Pscale(i32),
    /// `~`
    Spread,
    /// `*`
    Subtree,
    /// Any other symbol; resolves to an error result
    Unknown(String),
}

impl Selector {
    pub fn is_symbolic(&self) -> bool {
        !matches!(self, Selector::Pscale(_))
    }

    pub fn symbol(symbol: &str) -> Self {
        match symbol {
            SPREAD_SYMBOL => Selector::Spread,
            SUBTREE_SYMBOL => Selector::Subtree,
            other => Selector::Unknown(other.to_string()),
        }
    }
}

impl From<i32> for Selector {
    fn from(pscale: i32) -> Self {
        Selector::Pscale(pscale)
    }
}

/// Integers are pscales, anything else is a symbol
impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i32>() {
            Ok(pscale) => Selector::Pscale(pscale),
            Err(_) => Selector::symbol(s),
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selector::from(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Pscale(pscale) => write!(f, "{pscale}"),
            Selector::Spread => f.write_str(SPREAD_SYMBOL),
            Selector::Subtree => f.write_str(SUBTREE_SYMBOL),
            Selector::Unknown(symbol) => f.write_str(symbol),
        }
    }
}

/// Result of resolving a block, spindle and point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BspResult {
    /// The whole tree
    Block { tree: Node },
    /// Every entry along the spindle, root first
    Spindle { nodes: Vec<SpindleNode> },
    /// One entry
    Point { text: String, pscale: Option<i32> },
    /// The end node and its immediate children
    Spread {
        path: Option<String>,
        text: Option<String>,
        children: Vec<SpreadChild>,
    },
    /// The end node and its descendants, paths relative to the end node
    Tree {
        path: Option<String>,
        text: Option<String>,
        children: Vec<SubtreeNode>,
    },
    Error { error: String },
}

impl BspResult {
    pub fn mode(&self) -> &'static str {
        match self {
            BspResult::Block { .. } => "block",
            BspResult::Spindle { .. } => "spindle",
            BspResult::Point { .. } => "point",
            BspResult::Spread { .. } => "spread",
            BspResult::Tree { .. } => "tree",
            BspResult::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BspResult::Error { .. })
    }
}

/// Resolve against a block already in hand.
///
/// With neither a spindle nor a symbolic selector the whole tree comes back.
/// A missing spindle with a symbolic selector operates on the root.
pub fn resolve_block(
    block: &Block,
    spindle: Option<&Spindle>,
    selector: Option<&Selector>,
) -> BspResult {
    let tree = &block.tree;
    let symbolic = selector.is_some_and(Selector::is_symbolic);

    if spindle.is_none() && !symbolic {
        return BspResult::Block { tree: tree.clone() };
    }

    let address = ParsedAddress::parse(spindle);
    let chain = walk_tree(tree, &address);
    resolve_point(tree, &address, chain, selector)
}

/// Turn a walked chain into the result the selector asks for
pub fn resolve_point(
    tree: &Node,
    address: &ParsedAddress,
    chain: Vec<SpindleNode>,
    selector: Option<&Selector>,
) -> BspResult {
    if chain.is_empty() {
        return BspResult::Spindle { nodes: chain };
    }

    let Some(selector) = selector else {
        return BspResult::Spindle { nodes: chain };
    };

    match selector {
        Selector::Pscale(pscale) => point_at(chain, *pscale),
        Selector::Spread => {
            let path = address.end_path();
            match spread(tree, path.as_deref()) {
                Some(view) => BspResult::Spread {
                    path,
                    text: view.text,
                    children: view.children,
                },
                None => BspResult::Spread {
                    path,
                    text: None,
                    children: Vec::new(),
                },
            }
        }
        Selector::Subtree => {
            let path = address.end_path();
            match block_navigate(tree, path.as_deref())
                .and_then(|end| subtree(end, POINT_SUBTREE_DEPTH))
            {
                Some(view) => BspResult::Tree {
                    path,
                    text: view.text,
                    children: view.children,
                },
                None => BspResult::Tree {
                    path,
                    text: None,
                    children: Vec::new(),
                },
            }
        }
        Selector::Unknown(symbol) => {
            log::warn!("unknown point mode {symbol:?}");
            BspResult::Error {
                error: format!("Unknown point mode: {symbol}"),
            }
        }
    }
}

/// The entry at `pscale`, or the deepest entry reached when none matches
fn point_at(mut chain: Vec<SpindleNode>, pscale: i32) -> BspResult {
    let index = chain
        .iter()
        .position(|node| node.pscale == Some(pscale))
        .or(chain.len().checked_sub(1));

    match index.map(|i| chain.swap_remove(i)) {
        Some(SpindleNode { text, pscale, .. }) => BspResult::Point { text, pscale },
        None => BspResult::Spindle { nodes: chain },
    }
}
