use serde::Serialize;
use serde_json::Value;

use crate::models::Node;

#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("Invalid block JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A block: one tree root, optionally named.
///
/// Blocks are owned by whatever layer loads them; the resolver only reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub tree: Node,
}

impl Block {
    pub fn new(tree: impl Into<Node>) -> Self {
        Self {
            name: None,
            tree: tree.into(),
        }
    }

    pub fn named(name: impl Into<String>, tree: impl Into<Node>) -> Self {
        Self {
            name: Some(name.into()),
            tree: tree.into(),
        }
    }

    /// Block with an empty tree
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a block from a JSON value.
    ///
    /// Accepts either a wrapper object with a `tree` field (and an optional
    /// string `name`) or a bare tree.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.get("tree").is_some_and(Value::is_object) => {
                let name = map
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let tree = map.remove("tree").map(Node::from).unwrap_or_default();
                Self { name, tree }
            }
            other => Self::new(Node::from(other)),
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, BlockError> {
        let value: Value = serde_json::from_str(source)?;
        Ok(Self::from_value(value))
    }
}

/// How a caller refers to the block to resolve against
#[derive(Debug, Clone, Copy)]
pub enum BlockRef<'a> {
    /// Looked up through the registered loader
    Name(&'a str),
    Block(&'a Block),
}

impl<'a> From<&'a str> for BlockRef<'a> {
    fn from(name: &'a str) -> Self {
        BlockRef::Name(name)
    }
}

impl<'a> From<&'a Block> for BlockRef<'a> {
    fn from(block: &'a Block) -> Self {
        BlockRef::Block(block)
    }
}
