//! The typed, default-valued coercion table behind [`Value::get`] and
//! [`Value::get_key`].
use alloc::string::{String, ToString};

use crate::number::format_float;
use crate::serializer::write;
use crate::value::Value;

/// A type `get`/`get_key` can coerce a [`Value`] into, with a default used
/// whenever the value's kind can't be sensibly converted.
pub trait Coerce: Sized + Clone {
    /// Converts `value` into `Self`, or returns `default` if the kinds
    /// don't line up.
    fn coerce(value: &Value<'_>, default: Self) -> Self;
}

impl Coerce for bool {
    fn coerce(value: &Value<'_>, default: Self) -> Self {
        match value {
            Value::Null => default,
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => match s.as_str() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            Value::Object(_) | Value::Array(_) => default,
        }
    }
}

impl Coerce for i64 {
    fn coerce(value: &Value<'_>, default: Self) -> Self {
        match value {
            Value::Null => default,
            Value::Boolean(b) => i64::from(*b),
            Value::Integer(n) => *n,
            #[allow(clippy::cast_possible_truncation)]
            Value::Float(f) => *f as i64,
            #[allow(clippy::cast_possible_truncation)]
            Value::String(s) => match s.as_str() {
                "true" => 1,
                "false" => 0,
                other => other.parse::<f64>().map_or(default, |f| f as i64),
            },
            Value::Object(_) | Value::Array(_) => default,
        }
    }
}

impl Coerce for f64 {
    fn coerce(value: &Value<'_>, default: Self) -> Self {
        match value {
            Value::Null => default,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            #[allow(clippy::cast_precision_loss)]
            Value::Integer(n) => *n as f64,
            Value::Float(f) => *f,
            Value::String(s) => match s.as_str() {
                "true" => 1.0,
                "false" => 0.0,
                other => other.parse().unwrap_or(default),
            },
            Value::Object(_) | Value::Array(_) => default,
        }
    }
}

impl Coerce for String {
    /// Unlike the numeric/boolean coercions, any value — including objects
    /// and arrays — formats to its JSON text rather than falling back to
    /// `default`; only `Null` uses the default.
    fn coerce(value: &Value<'_>, default: Self) -> Self {
        match value {
            Value::Null => default,
            Value::String(s) => s.as_str().to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(f) => {
                let mut out = String::new();
                format_float(*f, &mut out);
                out
            }
            Value::Object(_) | Value::Array(_) => {
                let mut out = String::new();
                write(value, &mut out);
                out
            }
        }
    }
}

impl<'a> Value<'a> {
    /// Coerces this value into `T`, per the [`Coerce`] table, falling back
    /// to `default` when the kinds don't line up.
    pub fn get<T: Coerce>(&self, default: T) -> T {
        T::coerce(self, default)
    }

    /// Looks up `key` in this value (if it is an object) and coerces the
    /// result into `T`; falls back to `default` if `self` isn't an object,
    /// `key` is absent, or the coercion doesn't apply.
    pub fn get_key<T: Coerce>(&self, key: &str, default: T) -> T {
        match self {
            Value::Object(map) => map
                .get(key)
                .map_or_else(|| default.clone(), |v| T::coerce(v, default)),
            _ => default,
        }
    }
}
