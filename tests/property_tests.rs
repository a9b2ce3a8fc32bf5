//! Property tests for navigation, import and history.

use proptest::prelude::*;
use treequill::document::node::{JsonNumber, JsonObject, JsonValue};
use treequill::document::parser::{to_json_string, validate_import};
use treequill::document::path::Path;
use treequill::document::tree::{delete, get, set};
use treequill::editor::engine::Engine;

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

fn leaf() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Boolean),
        any::<i64>().prop_map(|n| JsonValue::Number(JsonNumber::Integer(n))),
        // Finite floats with a fractional part, so they re-import as floats
        (-1.0e6f64..1.0e6f64)
            .prop_filter("has fraction", |f| f.fract() != 0.0)
            .prop_map(|f| JsonValue::Number(JsonNumber::Float(f))),
        "[ -~]{0,8}".prop_map(JsonValue::String),
    ]
}

fn value() -> impl Strategy<Value = JsonValue> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::vec((key(), inner), 0..4)
                .prop_map(|entries| JsonValue::Object(entries.into_iter().collect())),
        ]
    })
}

fn document() -> impl Strategy<Value = JsonObject> {
    prop::collection::vec((key(), value()), 0..5).prop_map(|entries| entries.into_iter().collect())
}

fn path() -> impl Strategy<Value = Path> {
    prop::collection::vec(key(), 1..4).prop_map(Path::new)
}

proptest! {
    #[test]
    fn get_after_set_returns_value(doc in document(), path in path(), v in value()) {
        let updated = set(&doc, &path, v.clone()).unwrap();
        prop_assert_eq!(get(&updated, &path).unwrap(), v);
    }

    #[test]
    fn delete_after_set_removes_only_last_key(doc in document(), path in path(), v in value()) {
        let updated = set(&doc, &path, v).unwrap();
        let removed = delete(&updated, &path).unwrap();

        prop_assert!(get(&removed, &path).is_none());

        // The parent still exists and its other keys are what `set` left there
        let parent = path.parent().unwrap();
        let before = get(&updated, &parent).unwrap().as_object().unwrap();
        let after = get(&removed, &parent).unwrap().as_object().unwrap();
        let last = path.last().unwrap();
        prop_assert_eq!(after.len(), before.len() - 1);
        for (k, val) in after {
            prop_assert_ne!(k.as_str(), last);
            prop_assert_eq!(Some(val), before.get(k));
        }
    }

    #[test]
    fn set_never_mutates_input(doc in document(), path in path(), v in value()) {
        let snapshot = doc.clone();
        let _ = set(&doc, &path, v);
        prop_assert_eq!(doc, snapshot);
    }

    #[test]
    fn import_round_trip(doc in document()) {
        let text = to_json_string(&doc, 2).unwrap();
        prop_assert_eq!(validate_import(&text).unwrap(), doc);
    }

    #[test]
    fn history_never_exceeds_limit(count in 0usize..30) {
        let mut engine = Engine::new(JsonObject::new());
        for n in 0..count {
            engine.add_property(&Path::root(), &format!("k{}", n), "1").unwrap();
        }
        prop_assert_eq!(engine.history_len(), count.min(10));
    }
}
