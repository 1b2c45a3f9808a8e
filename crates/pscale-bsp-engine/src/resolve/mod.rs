//! Resolution of spindles against block trees.
//!
//! - `walk`: digits to an ordered chain of [`SpindleNode`]s
//! - `navigate`: dot paths to nodes
//! - `spread`: one-level lateral view
//! - `subtree`: depth-bounded recursive view
//! - `point`: dispatch on the selector to a [`BspResult`]
//!
//! Nothing here fails. Addresses that run past the authored content give
//! truncated chains, empty views or the deepest point reached.

pub mod navigate;
pub mod point;
pub mod spread;
pub mod subtree;
pub mod walk;

pub use navigate::{PATH_SEPARATOR, block_navigate, join_path};
pub use point::{
    BspResult, POINT_SUBTREE_DEPTH, SPREAD_SYMBOL, SUBTREE_SYMBOL, Selector, resolve_block,
    resolve_point,
};
pub use spread::{Spread, SpreadChild, spread};
pub use subtree::{DEFAULT_MAX_DEPTH, SubtreeNode, subtree};
pub use walk::{SpindleNode, walk_tree};

use crate::models::Block;

/// Spread of the node at `path` in `block`
pub fn lateral_read(block: &Block, path: Option<&str>) -> Option<Spread> {
    spread(&block.tree, path)
}

/// Recursive view of `block`, `DEFAULT_MAX_DEPTH` levels deep unless a
/// non-zero depth is given
pub fn recursive_view(block: &Block, max_depth: Option<usize>) -> Option<SubtreeNode> {
    let max_depth = max_depth
        .filter(|&depth| depth > 0)
        .unwrap_or(DEFAULT_MAX_DEPTH);
    subtree(&block.tree, max_depth)
}
