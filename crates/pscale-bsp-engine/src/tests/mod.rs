use crate::models::{Block, Branch, Node};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// `{"_": "root", "2": {"_": "two", "3": "leaf-text"}}`
pub fn sample_tree() -> Node {
    Node::from(
        Branch::new()
            .with_summary("root")
            .with("2", Branch::new().with_summary("two").with("3", "leaf-text")),
    )
}

pub fn sample_block() -> Block {
    Block::named("sample", sample_tree())
}

/// Create a temporary blocks directory
pub fn create_test_blocks_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a block file with content
pub fn create_test_block_file(blocks_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = blocks_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
