#![expect(missing_docs)]

use quickcheck::{Arbitrary, Gen, QuickCheck};
use xjson::Value;

/// Wraps `Value<'static>` so this integration-test crate can implement the
/// foreign `quickcheck::Arbitrary` trait for it without hitting the orphan
/// rule, the way the teacher crate wraps its own generated values.
#[derive(Debug, Clone)]
struct ArbitraryValue(Value<'static>);

fn gen_scalar(g: &mut Gen) -> Value<'static> {
    match u32::arbitrary(g) % 4 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Integer(i64::arbitrary(g)),
        _ => Value::from(alloc_safe_float(g)),
    }
}

fn alloc_safe_float(g: &mut Gen) -> f64 {
    let mut value = f64::arbitrary(g);
    while !value.is_finite() {
        value = f64::arbitrary(g);
    }
    value
}

fn gen_container(g: &mut Gen, depth: usize) -> Value<'static> {
    if u32::arbitrary(g) % 2 == 0 {
        let len = usize::arbitrary(g) % 4;
        let mut arr = Value::array();
        for i in 0..len {
            arr[i] = gen_value(g, depth.saturating_sub(1));
        }
        arr
    } else {
        let len = usize::arbitrary(g) % 4;
        let mut obj = Value::object();
        for _ in 0..len {
            let key = String::arbitrary(g);
            obj[key.as_str()] = gen_value(g, depth.saturating_sub(1));
        }
        obj
    }
}

fn gen_value(g: &mut Gen, depth: usize) -> Value<'static> {
    if depth == 0 {
        match u32::arbitrary(g) % 5 {
            0..=3 => gen_scalar(g),
            _ => Value::String(xjson::JsonString::from_string(String::arbitrary(g))),
        }
    } else {
        match u32::arbitrary(g) % 3 {
            0 => gen_scalar(g),
            1 => Value::String(xjson::JsonString::from_string(String::arbitrary(g))),
            _ => gen_container(g, depth - 1),
        }
    }
}

impl Arbitrary for ArbitraryValue {
    fn arbitrary(g: &mut Gen) -> Self {
        // `Value::parse` requires a top-level object or array, so the root
        // of every generated value is always a container.
        ArbitraryValue(gen_container(g, 2))
    }
}

fn has_float_leaf(v: &Value<'_>) -> bool {
    match v {
        Value::Float(_) => true,
        Value::Array(arr) => arr.iter().any(has_float_leaf),
        Value::Object(map) => map.values().any(has_float_leaf),
        _ => false,
    }
}

#[test]
fn clean_values_round_trip_exactly() {
    fn prop(v: ArbitraryValue) -> bool {
        if has_float_leaf(&v.0) {
            return true;
        }
        let text = v.0.to_json_string();
        let Ok((parsed, consumed)) = Value::parse(text.as_bytes(), false) else {
            return false;
        };
        consumed == text.len() && parsed == v.0
    }

    QuickCheck::new()
        .tests(if cfg!(miri) { 10 } else { 500 })
        .quickcheck(prop as fn(ArbitraryValue) -> bool);
}

#[test]
fn all_values_round_trip_within_epsilon() {
    fn prop(v: ArbitraryValue) -> bool {
        let text = v.0.to_json_string();
        match Value::parse(text.as_bytes(), false) {
            Ok((parsed, consumed)) => consumed == text.len() && parsed == v.0,
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(if cfg!(miri) { 10 } else { 500 })
        .quickcheck(prop as fn(ArbitraryValue) -> bool);
}

#[test]
fn serialize_is_idempotent_after_one_round_trip() {
    fn prop(v: ArbitraryValue) -> bool {
        let once = v.0.to_json_string();
        let Ok((reparsed, _)) = Value::parse(once.as_bytes(), false) else {
            return false;
        };
        let twice = reparsed.to_json_string();
        once == twice
    }

    QuickCheck::new()
        .tests(if cfg!(miri) { 10 } else { 500 })
        .quickcheck(prop as fn(ArbitraryValue) -> bool);
}
