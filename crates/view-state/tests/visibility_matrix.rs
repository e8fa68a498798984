use proptest::prelude::*;
use serde_json::{json, Value};
use treenav_json_pointer::path;
use treenav_view_state::{
    next_visible_path, next_visible_path_after_subtree, previous_visible_path, visible_paths,
    ExpandPolicy, ViewState,
};

fn sample() -> Value {
    json!({
        "a": {"x": [1, 2], "y": null},
        "b": [],
        "c": [{"d": true}, "e"],
        "f": 0
    })
}

#[test]
fn next_walks_visible_paths_in_order() {
    let json = sample();
    for policy in [ExpandPolicy::None, ExpandPolicy::Minimal, ExpandPolicy::Depth(2), ExpandPolicy::All] {
        let vs = ViewState::from_json(&json, policy);
        let paths = visible_paths(&json, &vs);
        for pair in paths.windows(2) {
            assert_eq!(next_visible_path(&json, &vs, &pair[0]).as_ref(), Some(&pair[1]), "{policy:?}");
            assert_eq!(previous_visible_path(&json, &vs, &pair[1]).as_ref(), Some(&pair[0]), "{policy:?}");
        }
        let last = paths.last().expect("root is always visible");
        assert_eq!(next_visible_path(&json, &vs, last), None);
    }
}

#[test]
fn after_subtree_skips_expanded_container() {
    let json = sample();
    let vs = ViewState::from_json(&json, ExpandPolicy::All);
    assert_eq!(next_visible_path(&json, &vs, &path!["a"]), Some(path!["a", "x"]));
    assert_eq!(next_visible_path_after_subtree(&json, &vs, &path!["a"]), Some(path!["b"]));
    assert_eq!(next_visible_path_after_subtree(&json, &vs, &path!["a", "x", 1]), Some(path!["a", "y"]));
    assert_eq!(next_visible_path_after_subtree(&json, &vs, &path!["f"]), None);
}

#[test]
fn empty_expanded_container_has_no_children() {
    let json = sample();
    let vs = ViewState::from_json(&json, ExpandPolicy::All);
    assert_eq!(next_visible_path(&json, &vs, &path!["b"]), Some(path!["c"]));
    assert_eq!(previous_visible_path(&json, &vs, &path!["c"]), Some(path!["b"]));
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![Just(Value::Null), any::<bool>().prop_map(Value::Bool), (0i64..10).prop_map(Value::from)];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn previous_inverts_next(json in arb_json(), depth in 0usize..4) {
        let vs = ViewState::from_json(&json, ExpandPolicy::Depth(depth));
        for p in visible_paths(&json, &vs) {
            if let Some(next) = next_visible_path(&json, &vs, &p) {
                prop_assert_eq!(previous_visible_path(&json, &vs, &next), Some(p.clone()));
            }
        }
    }
}
