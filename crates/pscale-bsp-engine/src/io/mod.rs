use crate::loader::BlockLoader;
use crate::models::{Block, BlockError};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of block files in a blocks directory
pub const BLOCK_EXTENSION: &str = "json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Block not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read block at {path}: {source}")]
    Block { path: PathBuf, source: BlockError },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid blocks directory: {0}")]
    InvalidBlocksDir(String),
}

/// Read and parse one block file, named after its file stem
pub fn read_block(path: &Path) -> Result<Block, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(|e| IoError::Block {
        path: path.to_path_buf(),
        source: BlockError::Io(e),
    })?;
    let mut block = Block::from_json_str(&source).map_err(|source| IoError::Block {
        path: path.to_path_buf(),
        source,
    })?;
    if block.name.is_none() {
        block.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
    }
    Ok(block)
}

/// Names of the blocks in a directory, sorted
pub fn list_blocks(blocks_root: &Path) -> Result<Vec<String>, IoError> {
    validate_blocks_dir(blocks_root)?;

    let mut names = Vec::new();
    for entry in fs::read_dir(blocks_root)? {
        let path = entry?.path();
        if path.is_file()
            && path.extension().is_some_and(|ext| ext == BLOCK_EXTENSION)
            && let Some(stem) = path.file_stem()
        {
            names.push(stem.to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

pub fn validate_blocks_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidBlocksDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Loads `<name>.json` from a blocks directory.
///
/// Unreadable or malformed files count as missing blocks; the reason is
/// logged.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    blocks_root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(blocks_root: impl Into<PathBuf>) -> Self {
        Self {
            blocks_root: blocks_root.into(),
        }
    }

    pub fn block_path(&self, name: &str) -> PathBuf {
        self.blocks_root.join(format!("{name}.{BLOCK_EXTENSION}"))
    }
}

impl BlockLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Option<Block> {
        // Names are plain file stems; anything path-like is not a block here
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            log::debug!("rejecting block name {name:?}");
            return None;
        }
        match read_block(&self.block_path(name)) {
            Ok(block) => Some(block),
            Err(IoError::NotFound(path)) => {
                log::debug!("no block file at {}", path.display());
                None
            }
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }
}
