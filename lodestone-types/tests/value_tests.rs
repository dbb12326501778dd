use lodestone_types::{is_reserved_key, AttrValue, AttrValueError, RecordId, ScalarValue};
use serde_json::json;

// ── Canonical forms ──────────────────────────────────────────────

#[test]
fn canonical_string_is_identity() {
    assert_eq!(ScalarValue::from("promo").canonical(), "promo");
}

#[test]
fn canonical_int() {
    assert_eq!(ScalarValue::from(42i64).canonical(), "42");
}

#[test]
fn canonical_float_drops_trailing_zero() {
    assert_eq!(ScalarValue::from(1.0).canonical(), "1");
    assert_eq!(ScalarValue::from(1.5).canonical(), "1.5");
}

#[test]
fn canonical_bool() {
    assert_eq!(ScalarValue::from(true).canonical(), "1");
    assert_eq!(ScalarValue::from(false).canonical(), "0");
}

// ── Loose equality ───────────────────────────────────────────────

#[test]
fn string_one_equals_int_one() {
    assert!(ScalarValue::from("1").loosely_eq(&ScalarValue::from(1i64)));
}

#[test]
fn string_float_equals_int() {
    assert!(ScalarValue::from("1.0").loosely_eq(&ScalarValue::from(1i64)));
}

#[test]
fn bool_true_equals_one() {
    assert!(ScalarValue::from(true).loosely_eq(&ScalarValue::from(1i64)));
    assert!(ScalarValue::from(true).loosely_eq(&ScalarValue::from("1")));
}

#[test]
fn zero_family_is_mutually_equal() {
    // The documented approximation: "0", 0, 0.0 and false all coincide.
    let zero_str = ScalarValue::from("0");
    let zero_int = ScalarValue::from(0i64);
    let zero_float = ScalarValue::from(0.0);
    let falsy = ScalarValue::from(false);

    assert!(zero_str.loosely_eq(&zero_int));
    assert!(zero_str.loosely_eq(&falsy));
    assert!(zero_int.loosely_eq(&falsy));
    assert!(zero_float.loosely_eq(&zero_int));
}

#[test]
fn empty_string_is_not_false() {
    assert!(!ScalarValue::from("").loosely_eq(&ScalarValue::from(false)));
}

#[test]
fn distinct_strings_differ() {
    assert!(!ScalarValue::from("alpha").loosely_eq(&ScalarValue::from("beta")));
}

#[test]
fn strict_equality_is_not_loose() {
    // Derived == distinguishes representations that loose equality merges.
    assert_ne!(AttrValue::from("1"), AttrValue::from(1i64));
    assert!(AttrValue::from("1").loosely_eq(&AttrValue::from(1i64)));
}

#[test]
fn scalar_never_equals_list() {
    let scalar = AttrValue::from("a");
    let list = AttrValue::from(vec![ScalarValue::from("a")]);
    assert!(!scalar.loosely_eq(&list));
}

#[test]
fn lists_compare_element_wise() {
    let a = AttrValue::from(vec![ScalarValue::from("1"), ScalarValue::from("x")]);
    let b = AttrValue::from(vec![ScalarValue::from(1i64), ScalarValue::from("x")]);
    assert!(a.loosely_eq(&b));
}

#[test]
fn lists_of_different_length_differ() {
    let a = AttrValue::from(vec![ScalarValue::from("x")]);
    let b = AttrValue::from(vec![ScalarValue::from("x"), ScalarValue::from("x")]);
    assert!(!a.loosely_eq(&b));
}

// ── Truthiness ───────────────────────────────────────────────────

#[test]
fn truthy_values() {
    assert!(AttrValue::from(true).is_truthy());
    assert!(AttrValue::from(1i64).is_truthy());
    assert!(AttrValue::from("yes").is_truthy());
    assert!(AttrValue::from("1").is_truthy());
}

#[test]
fn falsy_values() {
    assert!(!AttrValue::from(false).is_truthy());
    assert!(!AttrValue::from(0i64).is_truthy());
    assert!(!AttrValue::from(0.0).is_truthy());
    assert!(!AttrValue::from("").is_truthy());
    assert!(!AttrValue::from("0").is_truthy());
    assert!(!AttrValue::from("false").is_truthy());
    assert!(!AttrValue::from("FALSE").is_truthy());
}

#[test]
fn lists_are_never_truthy() {
    assert!(!AttrValue::from(vec![ScalarValue::from(true)]).is_truthy());
}

// ── JSON conversion ──────────────────────────────────────────────

#[test]
fn from_json_accepts_scalars() {
    assert_eq!(
        AttrValue::from_json(&json!("hello")).unwrap(),
        AttrValue::from("hello")
    );
    assert_eq!(
        AttrValue::from_json(&json!(7)).unwrap(),
        AttrValue::from(7i64)
    );
    assert_eq!(
        AttrValue::from_json(&json!(true)).unwrap(),
        AttrValue::from(true)
    );
}

#[test]
fn from_json_accepts_flat_lists() {
    let value = AttrValue::from_json(&json!(["a", 1, false])).unwrap();
    assert_eq!(
        value,
        AttrValue::from(vec![
            ScalarValue::from("a"),
            ScalarValue::from(1i64),
            ScalarValue::from(false),
        ])
    );
}

#[test]
fn from_json_rejects_null() {
    assert_eq!(AttrValue::from_json(&json!(null)), Err(AttrValueError::Null));
}

#[test]
fn from_json_rejects_objects() {
    assert_eq!(
        AttrValue::from_json(&json!({"nested": 1})),
        Err(AttrValueError::Object)
    );
}

#[test]
fn from_json_rejects_nested_lists() {
    assert_eq!(
        AttrValue::from_json(&json!([["deep"]])),
        Err(AttrValueError::NestedList)
    );
    assert_eq!(
        AttrValue::from_json(&json!([{"k": "v"}])),
        Err(AttrValueError::NestedList)
    );
}

#[test]
fn serde_round_trip() {
    let original = AttrValue::from(vec![ScalarValue::from("x"), ScalarValue::from(2i64)]);
    let text = serde_json::to_string(&original).unwrap();
    let back: AttrValue = serde_json::from_str(&text).unwrap();
    assert_eq!(original, back);
}

#[test]
fn serde_rejects_nested_garbage() {
    let result: Result<AttrValue, _> = serde_json::from_str(r#"{"deep": {"er": 1}}"#);
    assert!(result.is_err());
    let result: Result<AttrValue, _> = serde_json::from_str("[[1]]");
    assert!(result.is_err());
}

// ── Reserved keys ────────────────────────────────────────────────

#[test]
fn reserved_key_detection() {
    assert!(is_reserved_key("_lodestone_slug"));
    assert!(is_reserved_key("_anything"));
    assert!(!is_reserved_key("color"));
    assert!(!is_reserved_key("lodestone"));
}

// ── Record ids ───────────────────────────────────────────────────

#[test]
fn record_id_display_parse_round_trip() {
    let id = RecordId::new();
    let parsed = RecordId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn record_ids_are_unique() {
    assert_ne!(RecordId::new(), RecordId::new());
}

// ── Properties ───────────────────────────────────────────────────

mod loose_equality_properties {
    use super::*;
    use proptest::prelude::*;

    fn scalar_strategy() -> impl Strategy<Value = ScalarValue> {
        prop_oneof![
            prop::string::string_regex("[a-zA-Z0-9 .-]{0,24}")
                .unwrap()
                .prop_map(ScalarValue::Str),
            any::<i64>().prop_map(ScalarValue::Int),
            (-1.0e9f64..1.0e9).prop_map(ScalarValue::Float),
            any::<bool>().prop_map(ScalarValue::Bool),
        ]
    }

    proptest! {
        #[test]
        fn loose_equality_is_reflexive(v in scalar_strategy()) {
            prop_assert!(v.loosely_eq(&v));
        }

        #[test]
        fn loose_equality_is_symmetric(a in scalar_strategy(), b in scalar_strategy()) {
            prop_assert_eq!(a.loosely_eq(&b), b.loosely_eq(&a));
        }

        #[test]
        fn strict_equality_implies_loose(a in scalar_strategy()) {
            let b = a.clone();
            prop_assert!(a.loosely_eq(&b));
        }
    }
}
