use proptest::prelude::*;
use serde_json::json;
use treenav_json_pointer::{
    compile_json_pointer, get, parent, parse_json_pointer, parse_path, path, shared_prefix,
    starts_with, validate_json_pointer, JsonPointerError, PathStep,
};

#[test]
fn pointer_parse_compile_roundtrip_matrix() {
    let cases = ["", "/", "/foo", "/foo/bar", "/a~0b/c~1d", "/arr/0", "/~0/~1"];

    for pointer in cases {
        let path = parse_json_pointer(pointer);
        assert_eq!(compile_json_pointer(&path), pointer);
    }
}

#[test]
fn pointer_typed_lookup_matrix() {
    let doc = json!({"arr": [2, 3, 1], "name": "x", "nested": {"0": [null]}});

    let cases = [
        ("/arr/0", Some(json!(2))),
        ("/arr/2", Some(json!(1))),
        ("/arr/3", None),
        ("/name", Some(json!("x"))),
        ("/nested/0/0", Some(json!(null))),
        ("/missing/0", None),
    ];

    for (pointer, expected) in cases {
        let p = parse_path(&doc, pointer);
        assert_eq!(get(&doc, &p).cloned(), expected, "pointer {pointer}");
    }

    let p = parse_path(&doc, "/nested/0/0");
    assert!(matches!(p[1], PathStep::Key(_)));
    assert!(matches!(p[2], PathStep::Index(0)));
}

#[test]
fn pointer_relationships() {
    assert!(validate_json_pointer("/foo/bar").is_ok());
    assert!(validate_json_pointer("foo/bar").is_err());

    let p = path!["foo", "bar"];
    let q = path!["foo", "bar", 0];
    assert!(starts_with(&q, &p));
    assert_eq!(shared_prefix(&p, &q), p);
    assert_eq!(parent(&q).expect("has parent"), p);
    assert_eq!(parent(&path![]), Err(JsonPointerError::NoParent));
}

proptest! {
    #[test]
    fn shared_prefix_is_prefix_of_both(
        a in proptest::collection::vec(0usize..3, 0..5),
        b in proptest::collection::vec(0usize..3, 0..5),
    ) {
        let a: Vec<PathStep> = a.into_iter().map(PathStep::Index).collect();
        let b: Vec<PathStep> = b.into_iter().map(PathStep::Index).collect();
        let p = shared_prefix(&a, &b);
        prop_assert!(starts_with(&a, &p));
        prop_assert!(starts_with(&b, &p));
        prop_assert_eq!(shared_prefix(&b, &a), p);
    }

    #[test]
    fn compile_then_parse_is_identity(keys in proptest::collection::vec("[a-z~/]{0,4}", 0..4)) {
        let p: Vec<PathStep> = keys.into_iter().map(PathStep::Key).collect();
        prop_assert_eq!(parse_json_pointer(&compile_json_pointer(&p)), p);
    }
}
