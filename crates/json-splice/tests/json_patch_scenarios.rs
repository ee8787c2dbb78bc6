use std::thread;

use json_splice::json_patch::{apply_patch, from_json_patch, ErrorKind, PatchError};
use json_splice_value::Value;
use serde_json::json;

fn apply(doc: serde_json::Value, patch: serde_json::Value) -> Result<Value, PatchError> {
    let ops = from_json_patch(&patch)?;
    apply_patch(&Value::from(doc), &ops)
}

#[test]
fn insert_into_the_middle_of_an_array() {
    let out = apply(json!(["a", "c"]), json!([{"op": "add", "path": "/1", "value": "b"}])).unwrap();
    assert_eq!(out, Value::from(json!(["a", "b", "c"])));
}

#[test]
fn append_to_an_empty_array() {
    let out = apply(json!([]), json!([{"op": "add", "path": "/-", "value": "a"}])).unwrap();
    assert_eq!(out, Value::from(json!(["a"])));
}

#[test]
fn replace_a_deep_member() {
    let out = apply(
        json!({"a": {"b": {"c": 41}}}),
        json!([{"op": "replace", "path": "/a/b/c", "value": 42}]),
    )
    .unwrap();
    assert_eq!(out, Value::from(json!({"a": {"b": {"c": 42}}})));
}

#[test]
fn move_into_own_child_fails() {
    let err = apply(
        json!({"a": {"b": 1}}),
        json!([{"op": "move", "from": "/a", "path": "/a/b"}]),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPrefixMove);
}

#[test]
fn add_past_the_end_fails() {
    let err = apply(json!([1, 2]), json!([{"op": "add", "path": "/4", "value": "d"}])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(
        err.to_string(),
        "add failed: index 4 is out of bounds for array of length 2"
    );
}

#[test]
fn guarded_remove_is_all_or_nothing() {
    let doc = Value::from(json!({"a": 1}));

    let passing = from_json_patch(&json!([
        {"op": "test", "path": "/a", "value": 1},
        {"op": "remove", "path": "/a"}
    ]))
    .unwrap();
    assert_eq!(apply_patch(&doc, &passing).unwrap(), Value::empty_object());

    let failing = from_json_patch(&json!([
        {"op": "test", "path": "/a", "value": 2},
        {"op": "remove", "path": "/a"}
    ]))
    .unwrap();
    let err = apply_patch(&doc, &failing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TestMismatch);
    assert_eq!(doc, Value::from(json!({"a": 1})));
}

#[test]
fn later_failure_discards_earlier_edits() {
    let doc = Value::from(json!({"list": [1, 2, 3]}));
    let ops = from_json_patch(&json!([
        {"op": "remove", "path": "/list/0"},
        {"op": "add", "path": "/extra", "value": true},
        {"op": "replace", "path": "/list/9", "value": 0}
    ]))
    .unwrap();
    match apply_patch(&doc, &ops).unwrap_err() {
        PatchError::Operation { index, op, source } => {
            assert_eq!(index, 2);
            assert_eq!(op, "replace");
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(doc, Value::from(json!({"list": [1, 2, 3]})));
}

#[test]
fn removing_the_root_yields_null() {
    let out = apply(json!({"a": 1}), json!([{"op": "remove", "path": ""}])).unwrap();
    assert!(out.is_null());
}

#[test]
fn patched_document_shares_untouched_subtrees() {
    let doc = Value::from(json!({
        "config": {"deep": {"list": [1, 2, 3]}},
        "users": [{"name": "ann"}, {"name": "bob"}]
    }));
    let ops = from_json_patch(&json!([
        {"op": "replace", "path": "/users/1/name", "value": "cy"}
    ]))
    .unwrap();
    let out = apply_patch(&doc, &ops).unwrap();

    let users_before = doc.get("users").unwrap();
    let users_after = out.get("users").unwrap();
    assert!(out.get("config").unwrap().ptr_eq(doc.get("config").unwrap()));
    assert!(users_after.get_index(0).unwrap().ptr_eq(users_before.get_index(0).unwrap()));
    assert!(!users_after.ptr_eq(users_before));
    assert_eq!(
        users_before.get_index(1).and_then(|u| u.get("name")),
        Some(&Value::from("bob"))
    );
}

#[test]
fn one_source_many_threads() {
    let doc = Value::from(json!({"counter": 0, "shared": {"big": [1, 2, 3]}}));
    let results: Vec<Value> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let doc = &doc;
                scope.spawn(move || {
                    let ops = from_json_patch(&json!([
                        {"op": "replace", "path": "/counter", "value": i}
                    ]))
                    .unwrap();
                    apply_patch(doc, &ops).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (i, out) in results.iter().enumerate() {
        assert_eq!(out.get("counter"), Some(&Value::from(i)));
        assert!(out.get("shared").unwrap().ptr_eq(doc.get("shared").unwrap()));
    }
    assert_eq!(doc.get("counter"), Some(&Value::from(0)));
}
