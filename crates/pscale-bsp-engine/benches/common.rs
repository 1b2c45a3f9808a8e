// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use pscale_bsp_engine::{Block, Branch, Node};

/// A full tree `depth` levels deep with keys `1`..=`width` at every level
#[allow(dead_code)]
pub fn generate_block(width: usize, depth: usize) -> Block {
    Block::named("bench", generate_node(width, depth, "0"))
}

#[allow(dead_code)]
fn generate_node(width: usize, remaining_depth: usize, label: &str) -> Node {
    if remaining_depth == 0 {
        return Node::from(format!("leaf {label}"));
    }

    let mut branch = Branch::new().with_summary(format!("node {label}"));
    for key in 1..=width {
        let child_label = format!("{label}{key}");
        branch.insert(
            key.to_string(),
            generate_node(width, remaining_depth - 1, &child_label),
        );
    }
    Node::from(branch)
}
