//! Rendering a [`Value`] back to JSON text, in narrow (UTF-8) or wide
//! (UTF-16) form.
use alloc::string::String;
use alloc::vec::Vec;

use crate::number::{format_float, format_integer};
use crate::string_storage::needs_escape;
use crate::text::{write_escaped_narrow, write_escaped_wide};
use crate::value::Value;

/// Appends the JSON text for `value` to `out`.
///
/// Object keys are written in the map's (sorted) iteration order; no extra
/// whitespace is inserted anywhere.
pub fn write(value: &Value<'_>, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => format_integer(*n, out),
        Value::Float(f) => format_float(*f, out),
        Value::String(s) => {
            out.push('"');
            if s.needs_escape() {
                write_escaped_narrow(s.as_str(), out);
            } else {
                out.push_str(s.as_str());
            }
            out.push('"');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                if needs_escape(k) {
                    write_escaped_narrow(k, out);
                } else {
                    out.push_str(k);
                }
                out.push('"');
                out.push(':');
                write(v, out);
            }
            out.push('}');
        }
        Value::Array(arr) => {
            out.push('[');
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write(v, out);
            }
            out.push(']');
        }
    }
}

/// Renders `value` to a freshly allocated JSON string.
#[must_use]
pub fn to_json_string(value: &Value<'_>) -> String {
    let mut out = String::new();
    write(value, &mut out);
    out
}

/// Like [`write`], but first reserves `capacity_hint` bytes in `out`.
///
/// A thin wrapper around `String::reserve` for callers who can estimate the
/// output size and want to avoid reallocation during the write; carried
/// over from the legacy fixed-size scratch-buffer entry point, which this
/// crate's growable `String` makes an optional hint rather than a hard cap.
pub fn write_reserving(value: &Value<'_>, out: &mut String, capacity_hint: usize) {
    out.reserve(capacity_hint);
    write(value, out);
}

fn push_ascii(out: &mut Vec<u16>, s: &str) {
    out.extend(s.bytes().map(u16::from));
}

/// Appends the JSON text for `value` to `out` as UTF-16 code units,
/// escaping every non-ASCII character per [`write_escaped_wide`] rather
/// than copying it through, for callers whose downstream consumer expects
/// a wide-character string.
pub fn write_utf16(value: &Value<'_>, out: &mut Vec<u16>) {
    match value {
        Value::Null => push_ascii(out, "null"),
        Value::Boolean(b) => push_ascii(out, if *b { "true" } else { "false" }),
        Value::Integer(n) => {
            let mut s = String::new();
            format_integer(*n, &mut s);
            push_ascii(out, &s);
        }
        Value::Float(f) => {
            let mut s = String::new();
            format_float(*f, &mut s);
            push_ascii(out, &s);
        }
        Value::String(s) => {
            out.push(u16::from(b'"'));
            write_escaped_wide(s.as_str(), out);
            out.push(u16::from(b'"'));
        }
        Value::Object(map) => {
            out.push(u16::from(b'{'));
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(u16::from(b','));
                }
                out.push(u16::from(b'"'));
                write_escaped_wide(k, out);
                out.push(u16::from(b'"'));
                out.push(u16::from(b':'));
                write_utf16(v, out);
            }
            out.push(u16::from(b'}'));
        }
        Value::Array(arr) => {
            out.push(u16::from(b'['));
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(u16::from(b','));
                }
                write_utf16(v, out);
            }
            out.push(u16::from(b']'));
        }
    }
}

/// Renders `value` to a freshly allocated UTF-16 code unit buffer.
#[must_use]
pub fn to_utf16(value: &Value<'_>) -> Vec<u16> {
    let mut out = Vec::new();
    write_utf16(value, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec;

    #[test]
    fn writes_scalars() {
        assert_eq!(to_json_string(&Value::Null), "null");
        assert_eq!(to_json_string(&Value::Boolean(true)), "true");
        assert_eq!(to_json_string(&Value::from(42i64)), "42");
        assert_eq!(to_json_string(&Value::from(0.5)), "0.5");
    }

    #[test]
    fn escapes_string_payload_and_keys() {
        let v = Value::borrowed("a\"b");
        assert_eq!(to_json_string(&v), r#""a\"b""#);
    }

    #[test]
    fn writes_object_in_sorted_key_order() {
        let mut map = BTreeMap::new();
        map.insert(String::from("b"), Value::from(2i64));
        map.insert(String::from("a"), Value::from(1i64));
        let v = Value::Object(map);
        assert_eq!(to_json_string(&v), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn writes_nested_array() {
        let v = Value::Array(vec![Value::from(1i64), Value::Null, Value::from(true)]);
        assert_eq!(to_json_string(&v), "[1,null,true]");
    }

    #[test]
    fn reserving_write_matches_plain_write() {
        let v = Value::from(42i64);
        let mut out = String::new();
        write_reserving(&v, &mut out, 64);
        assert_eq!(out, "42");
    }

    #[test]
    fn wide_output_escapes_non_ascii() {
        let v = Value::borrowed("\u{e9}");
        let wide = to_utf16(&v);
        let narrow: String = wide.iter().map(|&u| u as u8 as char).collect();
        assert_eq!(narrow, "\"\\u00e9\"");
    }
}
