//! A small, header-only-style tagged JSON value, parser, and serializer.
//!
//! [`Value`] is the tagged union at the center of the crate: construct one
//! programmatically, parse one with [`Value::parse`], and render it back
//! to text with [`Value::write`]/[`Value::write_utf16`] or
//! [`crate::serializer::to_json_string`].
#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod coerce;
mod error;
mod kind;
mod number;
mod parser;
mod serializer;
mod string_storage;
mod text;
mod value;

#[cfg(any(test, feature = "serde"))]
mod serde_impl;

pub use coerce::Coerce;
pub use error::{JsonError, Position, SyntaxError};
pub use kind::Kind;
pub use parser::ParserOptions;
pub use string_storage::JsonString;
pub use value::{Array, Map, Value, FLOAT_EPSILON};

impl<'a> Value<'a> {
    /// Appends this value's JSON text to `out`. See [`crate::serializer::write`].
    pub fn write(&self, out: &mut alloc::string::String) {
        serializer::write(self, out);
    }

    /// Appends this value's JSON text to `out` as UTF-16 code units,
    /// escaping every non-ASCII character. See
    /// [`crate::serializer::write_utf16`].
    pub fn write_utf16(&self, out: &mut alloc::vec::Vec<u16>) {
        serializer::write_utf16(self, out);
    }

    /// Renders this value to a freshly allocated JSON string.
    #[must_use]
    pub fn to_json_string(&self) -> alloc::string::String {
        serializer::to_json_string(self)
    }

    /// Renders this value to a freshly allocated UTF-16 code unit buffer.
    #[must_use]
    pub fn to_utf16(&self) -> alloc::vec::Vec<u16> {
        serializer::to_utf16(self)
    }

    /// Like [`Value::write`], but first reserves `capacity_hint` bytes.
    pub fn write_reserving(&self, out: &mut alloc::string::String, capacity_hint: usize) {
        serializer::write_reserving(self, out, capacity_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    #[test]
    fn round_trip_clean_value() {
        let mut v = Value::object();
        v["a"] = Value::from(1i64);
        v["b"] = Value::array();
        v["b"][0] = Value::from(true);
        let text = v.to_json_string();
        let (parsed, consumed) = Value::parse(text.as_bytes(), false).unwrap();
        assert_eq!(consumed, text.len());
        assert_eq!(parsed, v);
    }

    #[test]
    fn idempotent_serialize() {
        let v = Value::parse(br#"{"a":1,"b":[true,null,"x"]}"#, false)
            .unwrap()
            .0;
        let once = v.to_json_string();
        let reparsed = Value::parse(once.as_bytes(), false).unwrap().0;
        let twice = reparsed.to_json_string();
        assert_eq!(once, twice);
    }

    #[test]
    fn float_round_trip_within_epsilon() {
        let v = Value::from(0.1 + 0.2);
        let text = v.to_json_string();
        let (parsed, _) = Value::parse(alloc::format!("[{text}]").as_bytes(), false)
            .map(|(val, n)| (val, n))
            .unwrap();
        let _ = parsed;
        let scalar_text = alloc::format!("[{text}]");
        let (arr, _) = Value::parse(scalar_text.as_bytes(), false).unwrap();
        assert_eq!(arr.as_array().unwrap()[0], v);
    }

    #[test]
    fn scenario_6_matches_exact_output() {
        let mut arr = Value::array();
        arr[0] = Value::Null;
        arr[1] = Value::from(2_147_483_647i64);
        arr[2] = Value::from(68_719_476_735i64);
        arr[3] = Value::from(0.1);
        arr[4] = Value::from(true);
        arr[5] = Value::from(false);
        arr[6] = Value::borrowed("test\"\\/\u{8}\u{c}\n\r\t");
        arr[7] = Value::borrowed("test");
        assert_eq!(
            arr.to_json_string(),
            r#"[null,2147483647,68719476735,0.1,true,false,"test\"\\\/\b\f\n\r\t","test"]"#
        );
    }

    #[test]
    fn type_mismatch_on_wrong_accessor() {
        let v = Value::Null;
        assert_eq!(v.as_int(), None);
        assert!(matches!(
            v.at_signed(0),
            Err(JsonError::TypeMismatch {
                expected: Kind::Array,
                actual: Kind::Null
            })
        ));
    }

    #[test]
    fn coercion_table_string_of_int() {
        assert_eq!(Value::from(7i64).get(alloc::string::String::new()), "7".to_string());
    }
}
