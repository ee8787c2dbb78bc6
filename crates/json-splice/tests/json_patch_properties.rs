use json_splice::json_patch::{apply_patch, get_at, ErrorKind, Operation, PatchError};
use json_splice_pointer::{escape_component, Pointer};
use json_splice_value::Value;
use proptest::prelude::*;
use proptest::sample::Index;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z~/]{0,6}".prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::vec(("[a-c~/]{1,2}", inner), 0..4).prop_map(Value::object),
        ]
    })
}

fn arb_doc() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-c~/]{1,2}", arb_value()), 0..4).prop_map(Value::object)
}

/// Pointers to every value in `doc`, the root included.
fn paths(doc: &Value) -> Vec<String> {
    fn walk(node: &Value, at: String, out: &mut Vec<String>) {
        match node {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    walk(item, format!("{at}/{i}"), out);
                }
            }
            Value::Object(map) => {
                for (key, item) in map.iter() {
                    walk(item, format!("{at}/{}", escape_component(key)), out);
                }
            }
            _ => {}
        }
        out.push(at);
    }
    let mut out = Vec::new();
    walk(doc, String::new(), &mut out);
    out
}

/// Pointers to every container in `doc`, with the container itself.
fn containers(doc: &Value) -> Vec<(String, Value)> {
    paths(doc)
        .into_iter()
        .filter_map(|p| {
            let pointer = Pointer::parse(&p).ok()?;
            let node = get_at(doc, pointer.cursor()).ok()?;
            node.is_container().then(|| (p, node.clone()))
        })
        .collect()
}

fn ptr(s: &str) -> Pointer {
    Pointer::parse(s).unwrap()
}

/// Both results succeed with equal documents, or both fail.
fn same_outcome(
    a: &Result<Value, PatchError>,
    b: &Result<Value, PatchError>,
) -> Result<(), TestCaseError> {
    match (a, b) {
        (Ok(x), Ok(y)) => prop_assert_eq!(x, y),
        (Err(_), Err(_)) => {}
        _ => prop_assert!(false, "outcomes differ: {:?} vs {:?}", a, b),
    }
    Ok(())
}

proptest! {
    #[test]
    fn replace_at_root_yields_the_value(doc in arb_value(), value in arb_value()) {
        let out = apply_patch(&doc, &[Operation::Replace { path: Pointer::root(), value: value.clone() }])
            .unwrap();
        prop_assert_eq!(out, value);
    }

    #[test]
    fn add_then_remove_at_a_fresh_member_restores(
        doc in arb_doc(),
        value in arb_value(),
        which in any::<Index>(),
        slot in 0usize..8,
    ) {
        let targets = containers(&doc);
        let (at, container) = which.get(&targets);
        let path = match container {
            Value::Array(items) => format!("{at}/{}", slot % (items.len() + 1)),
            _ => format!("{at}/zz"),
        };
        let added = apply_patch(&doc, &[Operation::Add { path: ptr(&path), value }]).unwrap();
        let restored = apply_patch(&added, &[Operation::Remove { path: ptr(&path) }]).unwrap();
        prop_assert_eq!(restored, doc);
    }

    #[test]
    fn failing_patch_leaves_the_document_untouched(
        doc in arb_doc(),
        value in arb_value(),
        prefix_len in 0usize..4,
    ) {
        let before = serde_json::Value::from(&doc);
        let mut ops: Vec<Operation> = (0..prefix_len)
            .map(|i| Operation::Add { path: ptr(&format!("/n{i}")), value: value.clone() })
            .collect();
        ops.push(Operation::Remove { path: ptr("/does-not-exist") });
        let err = apply_patch(&doc, &ops).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::NotFound);
        let at_failing_op = matches!(err, PatchError::Operation { index, .. } if index == prefix_len);
        prop_assert!(at_failing_op);
        prop_assert_eq!(serde_json::Value::from(&doc), before);
    }

    #[test]
    fn move_is_remove_then_add(doc in arb_doc(), from in any::<Index>(), to in any::<Index>()) {
        let all = paths(&doc);
        let from = ptr(from.get::<String>(&all));
        let path = ptr(to.get::<String>(&all));
        prop_assume!(!from.is_prefix_of(&path));
        let value = get_at(&doc, from.cursor()).unwrap().clone();
        let moved = apply_patch(&doc, &[Operation::Move { from: from.clone(), path: path.clone() }]);
        let by_hand = apply_patch(&doc, &[Operation::Remove { path: from }, Operation::Add { path, value }]);
        same_outcome(&moved, &by_hand)?;
    }

    #[test]
    fn copy_is_add_of_the_source(doc in arb_doc(), from in any::<Index>(), to in any::<Index>()) {
        let all = paths(&doc);
        let from = ptr(from.get::<String>(&all));
        let path = ptr(to.get::<String>(&all));
        let value = get_at(&doc, from.cursor()).unwrap().clone();
        let copied = apply_patch(&doc, &[Operation::Copy { from, path: path.clone() }]);
        let by_hand = apply_patch(&doc, &[Operation::Add { path, value }]);
        same_outcome(&copied, &by_hand)?;
    }

    #[test]
    fn test_of_the_current_value_always_passes(doc in arb_doc(), at in any::<Index>()) {
        let all = paths(&doc);
        let path = ptr(at.get::<String>(&all));
        let value = get_at(&doc, path.cursor()).unwrap().clone();
        let out = apply_patch(&doc, &[Operation::Test { path, value }]).unwrap();
        prop_assert!(out.ptr_eq(&doc));
    }

    #[test]
    fn untouched_members_stay_shared(doc in arb_doc(), value in arb_value()) {
        let out = apply_patch(&doc, &[Operation::Add { path: ptr("/zz"), value }]).unwrap();
        for (key, member) in doc.as_object().unwrap() {
            let after = out.get(key).unwrap();
            prop_assert!(!member.is_container() || after.ptr_eq(member));
        }
    }
}

#[test]
fn escaped_tokens_address_the_right_keys() {
    let doc = Value::object([("~", 1), ("/", 2), ("~/", 3)]);
    for (pointer, expected) in [("/~0", 1), ("/~1", 2), ("/~0~1", 3)] {
        let value = get_at(&doc, ptr(pointer).cursor()).unwrap();
        assert_eq!(value, &Value::from(expected), "{pointer}");
        let out = apply_patch(
            &doc,
            &[Operation::Replace {
                path: ptr(pointer),
                value: Value::from("x"),
            }],
        )
        .unwrap();
        assert_eq!(
            out.as_object().unwrap().len(),
            3,
            "{pointer} must not create a new key"
        );
    }
}
