pub mod block;
pub mod node;

pub use block::{Block, BlockError, BlockRef};
pub use node::{Branch, Node, SUMMARY_KEY};
