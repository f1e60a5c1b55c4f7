#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value as JsonValue};
use xjson::Value;

/// Feeds raw bytes straight into the parser to fuzz the grammar itself:
/// any crash, panic, or successful parse that doesn't round-trip through
/// serialization is a bug.
fn fuzz_raw_bytes(data: &[u8]) {
    if let Ok((value, consumed)) = Value::parse(data, true) {
        assert!(consumed <= data.len());
        let text = value.to_json_string();
        let (reparsed, reconsumed) = Value::parse(text.as_bytes(), false)
            .expect("a value's own serialization must parse back");
        assert_eq!(reconsumed, text.len());
        assert_eq!(reparsed, value);
    }
}

/// Also generates well-formed JSON via `serde_json` and checks that this
/// crate's parser accepts it, catching grammar gaps the raw-byte fuzzing is
/// unlikely to stumble into.
fn fuzz_well_formed(value: &JsonValue) {
    let text = serde_json::to_string(value).unwrap();
    let (_, consumed) = Value::parse(text.as_bytes(), true).expect("well-formed JSON must parse");
    assert_eq!(consumed, text.len());
}

#[derive(Debug)]
struct ArbitraryValue(JsonValue);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => JsonValue::Null,
            1 => JsonValue::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                JsonValue::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => JsonValue::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                JsonValue::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                JsonValue::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => return Err(arbitrary::Error::IncorrectFormat),
        };
        Ok(ArbitraryValue(value))
    }
}

fuzz_target!(|data: &[u8]| {
    fuzz_raw_bytes(data);

    if let Ok(arbitrary_value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(data))
    {
        fuzz_well_formed(&arbitrary_value.0);
    }
});
