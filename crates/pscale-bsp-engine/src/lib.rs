pub mod address;
pub mod io;
pub mod loader;
pub mod models;
pub mod resolve;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use address::{Address, ParsedAddress, Spindle, SpindleFormat};
pub use loader::{BlockLoader, LoaderRegistry, Resolver};
pub use models::{Block, BlockError, BlockRef, Branch, Node, SUMMARY_KEY};
pub use resolve::{
    BspResult, Selector, SpindleNode, Spread, SpreadChild, SubtreeNode, block_navigate,
    lateral_read, recursive_view, resolve_block,
};
