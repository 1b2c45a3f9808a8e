use crate::models::Node;

/// Path segment separator
pub const PATH_SEPARATOR: char = '.';

/// Follow a dot-separated path such as `2.3` from `tree`.
///
/// An absent or empty path is the tree itself. Returns `None` as soon as a
/// step lands on something that is not a branch, or the key is missing.
pub fn block_navigate<'a>(tree: &'a Node, path: Option<&str>) -> Option<&'a Node> {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return Some(tree);
    };

    path.split(PATH_SEPARATOR)
        .try_fold(tree, |node, key| node.as_branch()?.get(key))
}

/// Join path segments with the separator
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{key}")
    }
}
