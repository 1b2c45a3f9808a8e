use pretty_assertions::assert_eq;
use pscale_bsp_engine::{
    Block, BspResult, Resolver, Selector, Spindle, SpindleNode, lateral_read, recursive_view,
};
use rstest::rstest;

const SAMPLE: &str = r#"{"_": "root", "2": {"_": "two", "3": "leaf-text"}}"#;

const WAKE: &str = r#"{
    "name": "wake",
    "tree": {
        "_": "Waking up",
        "1": {"_": "Open eyes", "1": "Notice light", "2": "Notice sound"},
        "2": {"_": "Sit up", "1": {"_": "Stretch", "1": "Arms", "2": "Back"}},
        "3": "Stand"
    }
}"#;

fn block(source: &str) -> Block {
    Block::from_json_str(source).unwrap()
}

fn resolver() -> Resolver {
    Resolver::with_loader(|name: &str| match name {
        "sample" => Some(block(SAMPLE)),
        "wake" => Some(block(WAKE)),
        _ => None,
    })
}

fn spindle_nodes(result: BspResult) -> Vec<SpindleNode> {
    match result {
        BspResult::Spindle { nodes } => nodes,
        other => panic!("expected spindle, got {other:?}"),
    }
}

#[test]
fn sample_spindle_chain() {
    let nodes = spindle_nodes(resolver().resolve("sample", Some(&Spindle::from(0.23)), None));

    let summary: Vec<(Option<i32>, Option<&str>, &str)> = nodes
        .iter()
        .map(|n| (n.pscale, n.digit.as_deref(), n.text.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some(0), None, "root"),
            (Some(-1), Some("2"), "two"),
            (Some(-2), Some("3"), "leaf-text"),
        ]
    );
}

#[test]
fn sample_point_at_pscale() {
    let result = resolver().resolve(
        "sample",
        Some(&Spindle::from(0.23)),
        Some(&Selector::Pscale(-1)),
    );

    assert_eq!(
        result,
        BspResult::Point {
            text: "two".to_string(),
            pscale: Some(-1),
        }
    );
}

#[test]
fn sample_spread() {
    let result = resolver().resolve("sample", Some(&Spindle::from(0.2)), Some(&Selector::Spread));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "mode": "spread",
            "path": "2",
            "text": "two",
            "children": [{"digit": "3", "text": "leaf-text", "branch": false}]
        })
    );
}

#[test]
fn sample_walk_truncates() {
    let nodes = spindle_nodes(resolver().resolve("sample", Some(&Spindle::from(0.29)), None));

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].digit.as_deref(), Some("2"));
    assert_eq!(nodes[1].text, "two");
}

#[test]
fn unknown_block_is_empty() {
    let result = Resolver::new().resolve("wake", None, None);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json, serde_json::json!({"mode": "block", "tree": {}}));
}

#[test]
fn point_fallback_uses_deepest_entry() {
    let resolver = resolver();
    let spindle = Spindle::from("0.23");

    assert_eq!(
        resolver.resolve("sample", Some(&spindle), Some(&Selector::Pscale(-5))),
        resolver.resolve("sample", Some(&spindle), Some(&Selector::Pscale(-2))),
    );
}

#[rstest]
#[case("0.1")]
#[case("0.12")]
#[case("0.211")]
#[case("0.2112")]
#[case("0.99999")]
#[case("0.3")]
fn delineation_chains_are_bounded_and_non_positive(#[case] spindle: &str) {
    let digit_count = spindle.len() - 2;
    let nodes = spindle_nodes(resolver().resolve("wake", Some(&Spindle::from(spindle)), None));

    assert!(nodes.len() <= digit_count + 1);
    for node in &nodes {
        assert!(node.pscale.unwrap() <= 0);
    }
    for pair in nodes.windows(2) {
        assert_eq!(pair[1].pscale.unwrap(), pair[0].pscale.unwrap() - 1);
    }
}

#[rstest]
#[case("2.11", 1)]
#[case("21.12", 2)]
#[case("211.2", 3)]
fn split_chains_start_at_integer_length(#[case] spindle: &str, #[case] root_pscale: i32) {
    let nodes = spindle_nodes(resolver().resolve("wake", Some(&Spindle::from(spindle)), None));

    assert_eq!(nodes[0].digit, None);
    assert_eq!(nodes[0].pscale, Some(root_pscale));
    for pair in nodes.windows(2) {
        assert_eq!(pair[1].pscale.unwrap(), pair[0].pscale.unwrap() - 1);
    }
}

#[rstest]
#[case("211")]
#[case("12")]
#[case("3")]
fn no_pscale_chains_have_no_pscale(#[case] spindle: &str) {
    let nodes = spindle_nodes(resolver().resolve("wake", Some(&Spindle::from(spindle)), None));

    assert!(!nodes.is_empty());
    assert!(nodes.iter().all(|n| n.pscale.is_none()));
}

#[test]
fn wake_subtree_from_spindle() {
    let result = resolver().resolve("wake", Some(&Spindle::from("0.2")), Some(&Selector::Subtree));

    let BspResult::Tree { path, text, children } = result else {
        panic!("expected tree");
    };
    assert_eq!(path.as_deref(), Some("2"));
    assert_eq!(text.as_deref(), Some("Sit up"));
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].path, "1");
    let grandchildren: Vec<&str> = children[0].children.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(grandchildren, vec!["1.1", "1.2"]);
}

#[test]
fn lateral_read_and_recursive_view_are_idempotent() {
    let wake = block(WAKE);

    assert_eq!(lateral_read(&wake, Some("2.1")), lateral_read(&wake, Some("2.1")));
    assert_eq!(recursive_view(&wake, None), recursive_view(&wake, None));
    assert_eq!(recursive_view(&wake, Some(9)), recursive_view(&wake, Some(9)));
}

#[test]
fn recursive_view_default_depth() {
    let wake = block(WAKE);
    let view = recursive_view(&wake, None).unwrap();

    assert_eq!(view.text.as_deref(), Some("Waking up"));
    let stretch = &view.children[1].children[0];
    assert_eq!(stretch.path, "2.1");
    assert_eq!(stretch.children.len(), 2);
    assert_eq!(stretch.children[0].path, "2.1.1");
}
