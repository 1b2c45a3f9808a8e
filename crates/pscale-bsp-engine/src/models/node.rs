use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

/// Reserved key holding a branch's own summary text
pub const SUMMARY_KEY: &str = "_";

/// A node in a pscale block tree.
///
/// A tree is made of leaves (plain text) and branches (ordered maps from
/// digit keys to child nodes). Anything else found in a JSON document is
/// carried as-is in `Other` and is never indexed into.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Node {
    Text(String),
    Branch(Branch),
    Other(Value),
}

impl Node {
    /// An empty branch, the tree of an empty block
    pub fn empty() -> Self {
        Node::Branch(Branch::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Other(Value::Null))
    }

    /// Summary text of a branch. Only string summaries count.
    pub fn summary(&self) -> Option<&str> {
        self.as_branch().and_then(Branch::summary)
    }

    /// The text a node shows when it is visited: the leaf string, else the
    /// branch summary.
    pub fn own_text(&self) -> Option<&str> {
        self.as_text().or_else(|| self.summary())
    }

    /// Deterministic structural encoding of a node.
    ///
    /// Compact JSON: no whitespace, branch keys in insertion order, strings
    /// JSON-escaped, null as `null`. Used as the text of a visited branch
    /// that has no summary.
    pub fn encode(&self) -> String {
        Value::from(self).to_string()
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::empty()
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Node::Text(text),
            Value::Object(map) => Node::Branch(
                map.into_iter()
                    .map(|(key, child)| (key, Node::from(child)))
                    .collect(),
            ),
            other => Node::Other(other),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Text(text) => Value::String(text.clone()),
            Node::Branch(branch) => Value::Object(
                branch
                    .iter()
                    .map(|(key, child)| (key.to_string(), Value::from(child)))
                    .collect(),
            ),
            Node::Other(value) => value.clone(),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Text(text) => serializer.serialize_str(text),
            Node::Branch(branch) => branch.serialize(serializer),
            Node::Other(value) => value.serialize(serializer),
        }
    }
}

/// Insertion-ordered map from keys to child nodes.
///
/// Child iteration order is the order keys were first inserted, which for a
/// parsed document is the order they appear in the source. Re-inserting an
/// existing key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    entries: Vec<(String, Node)>,
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    /// Builder-style summary
    pub fn with_summary(self, text: impl Into<String>) -> Self {
        self.with(SUMMARY_KEY, Node::Text(text.into()))
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = node,
            None => self.entries.push((key, node)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    pub fn summary(&self) -> Option<&str> {
        self.get(SUMMARY_KEY).and_then(Node::as_text)
    }

    /// All entries, summary included, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Entries other than the summary key, in key order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.iter().filter(|(k, _)| *k != SUMMARY_KEY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Branch {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut branch = Branch::new();
        for (key, node) in iter {
            branch.insert(key, node);
        }
        branch
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}
