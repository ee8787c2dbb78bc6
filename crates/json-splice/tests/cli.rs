use json_splice::json_cli::{apply_json_patch, CliError};
use json_splice::json_patch::ErrorKind;

#[test]
fn document_text_in_patched_text_out() {
    let out = apply_json_patch(
        r#"{"users": [{"name": "ann"}], "v": 1}"#,
        r#"[
            {"op": "add", "path": "/users/-", "value": {"name": "bob"}},
            {"op": "copy", "from": "/v", "path": "/users/1/v"},
            {"op": "remove", "path": "/v"}
        ]"#,
    )
    .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({"users": [{"name": "ann"}, {"name": "bob", "v": 1}]})
    );
}

#[test]
fn decode_errors_name_the_element() {
    let err = apply_json_patch("{}", r#"[{"op": "add", "path": "/a", "value": 1}, {"op": "move", "path": "/b"}]"#)
        .unwrap_err();
    let CliError::Patch(err) = err else {
        panic!("expected a patch error, got {err:?}");
    };
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert_eq!(
        err.to_string(),
        "operation [index = 1]: move operation is missing required field \"from\""
    );
}

#[test]
fn invalid_pointer_in_patch() {
    let err = apply_json_patch("{}", r#"[{"op": "add", "path": "a", "value": 1}]"#).unwrap_err();
    match err {
        CliError::Patch(e) => assert_eq!(e.kind(), ErrorKind::InvalidPointer),
        other => panic!("unexpected error {other:?}"),
    }
}
