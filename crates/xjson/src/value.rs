//! The tagged [`Value`] union and its typed accessors.
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::kind::Kind;
use crate::string_storage::JsonString;
use crate::JsonError;

/// An ordered JSON object: a mapping from string keys to values.
///
/// A `BTreeMap` keeps keys in sorted order, which gives deterministic
/// iteration and serialization order independent of insertion order.
pub type Map<'a> = BTreeMap<String, Value<'a>>;

/// A JSON array: an ordered, densely indexed sequence of values.
pub type Array<'a> = Vec<Value<'a>>;

/// The absolute tolerance used when comparing two [`Value::Float`]s, carried
/// over from the legacy single-precision epsilon used by the format this
/// crate's data model was distilled from.
pub const FLOAT_EPSILON: f64 = 1.192_092_896e-7;

/// A JSON value: exactly one of null, a boolean, an integer, a float, a
/// string, an object, or an array, tagged by [`Kind`].
///
/// The lifetime parameter lets a [`Value::String`] borrow directly from an
/// input buffer instead of copying it; see [`JsonString`] for the three
/// storage modes this enables.
#[derive(Debug, Clone)]
pub enum Value<'a> {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A whole number with no fractional part or exponent, fitting `i64`.
    Integer(i64),
    /// Any other number.
    Float(f64),
    /// A JSON string.
    String(JsonString<'a>),
    /// A JSON object.
    Object(Map<'a>),
    /// A JSON array.
    Array(Array<'a>),
}

impl<'a> Value<'a> {
    /// Returns `Value::Null`.
    #[must_use]
    pub fn null() -> Self {
        Value::Null
    }

    /// Returns an empty object.
    #[must_use]
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// Returns an empty array.
    #[must_use]
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    /// Builds a string value borrowing `s` rather than copying it.
    #[must_use]
    pub fn borrowed(s: &'a str) -> Self {
        Value::String(JsonString::borrowed(s))
    }

    /// This value's [`Kind`] tag.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
        }
    }

    /// Overwrites this value in place with the default value of `new_kind`
    /// (`0`, `""`, an empty object, and so on).
    pub fn clear(&mut self, new_kind: Kind) {
        *self = match new_kind {
            Kind::Null => Value::Null,
            Kind::Boolean => Value::Boolean(false),
            Kind::Integer => Value::Integer(0),
            Kind::Float => Value::Float(0.0),
            Kind::String => Value::String(JsonString::from_str("")),
            Kind::Object => Value::object(),
            Kind::Array => Value::array(),
        };
    }

    /// Returns the boolean payload, or `None` if this is not `Boolean`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Mutable access to the boolean payload.
    pub fn as_bool_mut(&mut self) -> Option<&mut bool> {
        match self {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the integer payload, or `None` if this is not `Integer`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Mutable access to the integer payload.
    pub fn as_int_mut(&mut self) -> Option<&mut i64> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the float payload, or `None` if this is not `Float`.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Mutable access to the float payload.
    pub fn as_float_mut(&mut self) -> Option<&mut f64> {
        match self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the string payload, or `None` if this is not `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Mutable access to the string payload, materializing borrowed or
    /// inline storage into an owned buffer first.
    pub fn as_str_mut(&mut self) -> Option<&mut String> {
        match self {
            Value::String(s) => Some(s.make_mut()),
            _ => None,
        }
    }

    /// Returns the object payload, or `None` if this is not `Object`.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<'a>> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable access to the object payload.
    pub fn as_object_mut(&mut self) -> Option<&mut Map<'a>> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the array payload, or `None` if this is not `Array`.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array<'a>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable access to the array payload.
    pub fn as_array_mut(&mut self) -> Option<&mut Array<'a>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Clears the prior payload and installs `new`, the Rust equivalent of
    /// the legacy `assign()` overload family.
    pub fn set(&mut self, new: impl Into<Value<'a>>) {
        *self = new.into();
    }

    /// The string data as a `&str`, regardless of storage mode, or `None`
    /// if this is not `String`. Equivalent to [`Value::as_str`]; named
    /// separately for parity with the legacy `as_raw_str` entry point.
    #[must_use]
    pub fn as_raw_str(&self) -> Option<&str> {
        self.as_str()
    }

    /// Byte length of the string payload, or `None` if this is not
    /// `String`.
    #[must_use]
    pub fn str_len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.len()),
            _ => None,
        }
    }

    /// Looks up an array element by a signed index.
    ///
    /// Returns [`JsonError::TypeMismatch`] if this value is not an array,
    /// [`JsonError::IndexUnderflow`] if `index` is negative (there is no
    /// Python-style counting from the end), and `Ok(None)` for an
    /// out-of-bounds nonnegative index.
    pub fn at_signed(&self, index: i64) -> Result<Option<&Value<'a>>, JsonError> {
        let Value::Array(arr) = self else {
            return Err(JsonError::TypeMismatch {
                expected: Kind::Array,
                actual: self.kind(),
            });
        };
        let Ok(idx) = usize::try_from(index) else {
            return Err(JsonError::IndexUnderflow);
        };
        Ok(arr.get(idx))
    }
}

impl Default for Value<'_> {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value<'_> {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value<'_> {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value<'_> {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::borrowed(s)
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(JsonString::from_string(s))
    }
}

impl<'a> From<Map<'a>> for Value<'a> {
    fn from(m: Map<'a>) -> Self {
        Value::Object(m)
    }
}

impl<'a> From<Array<'a>> for Value<'a> {
    fn from(a: Array<'a>) -> Self {
        Value::Array(a)
    }
}

macro_rules! try_from_value {
    ($ty:ty, $pat:pat => $out:expr, $kind:expr) => {
        impl<'a, 'v> TryFrom<&'v Value<'a>> for $ty {
            type Error = JsonError;

            fn try_from(value: &'v Value<'a>) -> Result<Self, JsonError> {
                match value {
                    $pat => Ok($out),
                    other => Err(JsonError::TypeMismatch {
                        expected: $kind,
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

try_from_value!(bool, Value::Boolean(b) => *b, Kind::Boolean);
try_from_value!(i64, Value::Integer(n) => *n, Kind::Integer);
try_from_value!(f64, Value::Float(f) => *f, Kind::Float);
try_from_value!(&'v str, Value::String(s) => s.as_str(), Kind::String);
try_from_value!(&'v Map<'a>, Value::Object(m) => m, Kind::Object);
try_from_value!(&'v Array<'a>, Value::Array(a) => a, Kind::Array);

fn float_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < FLOAT_EPSILON
}

impl PartialEq for Value<'_> {
    /// Values of different kinds are never equal, including `Integer` vs.
    /// `Float`; floats compare within [`FLOAT_EPSILON`].
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_eq(*a, *b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq<bool> for Value<'_> {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Boolean(b) if b == other)
    }
}
impl PartialEq<Value<'_>> for bool {
    fn eq(&self, other: &Value<'_>) -> bool {
        other == self
    }
}

impl PartialEq<i64> for Value<'_> {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Integer(n) if n == other)
    }
}
impl PartialEq<Value<'_>> for i64 {
    fn eq(&self, other: &Value<'_>) -> bool {
        other == self
    }
}

impl PartialEq<f64> for Value<'_> {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(f) if float_eq(*f, *other))
    }
}
impl PartialEq<Value<'_>> for f64 {
    fn eq(&self, other: &Value<'_>) -> bool {
        other == self
    }
}

impl PartialEq<str> for Value<'_> {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s.as_str() == other)
    }
}
impl PartialEq<Value<'_>> for str {
    fn eq(&self, other: &Value<'_>) -> bool {
        other == self
    }
}
impl PartialEq<&str> for Value<'_> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
impl PartialEq<Value<'_>> for &str {
    fn eq(&self, other: &Value<'_>) -> bool {
        other == *self
    }
}

impl<'a> core::ops::Index<&str> for Value<'a> {
    type Output = Value<'a>;

    /// Looks up an object key. Returns `Value::Null` both for a missing key
    /// and when `self` is not an object; use [`Value::as_object`] to tell
    /// the two apart.
    fn index(&self, key: &str) -> &Value<'a> {
        static NULL: Value<'static> = Value::Null;
        match self {
            Value::Object(map) => map.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl<'a> core::ops::IndexMut<&str> for Value<'a> {
    /// Promotes `Value::Null` to an empty object and inserts `key` with a
    /// `Null` value if absent, then returns it for further writes.
    ///
    /// # Panics
    ///
    /// Panics if `self` is a non-null value that is not an object.
    fn index_mut(&mut self, key: &str) -> &mut Value<'a> {
        if matches!(self, Value::Null) {
            *self = Value::object();
        }
        match self {
            Value::Object(map) => map.entry(String::from(key)).or_insert(Value::Null),
            other => panic!("cannot index into a {} value with a string key", other.kind()),
        }
    }
}

impl<'a> core::ops::Index<usize> for Value<'a> {
    type Output = Value<'a>;

    /// Looks up an array element. Returns `Value::Null` for both an
    /// out-of-bounds index and a non-array `self`.
    fn index(&self, index: usize) -> &Value<'a> {
        static NULL: Value<'static> = Value::Null;
        match self {
            Value::Array(arr) => arr.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl<'a> core::ops::IndexMut<usize> for Value<'a> {
    /// Promotes `Value::Null` to an empty array, extends it with `Null`
    /// entries if `index` is past the current end, then returns the slot.
    ///
    /// # Panics
    ///
    /// Panics if `self` is a non-null value that is not an array.
    fn index_mut(&mut self, index: usize) -> &mut Value<'a> {
        if matches!(self, Value::Null) {
            *self = Value::array();
        }
        match self {
            Value::Array(arr) => {
                if index >= arr.len() {
                    arr.resize_with(index + 1, || Value::Null);
                }
                &mut arr[index]
            }
            other => panic!(
                "cannot index into a {} value with an integer index",
                other.kind()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from(1i64).kind(), Kind::Integer);
        assert_eq!(Value::from(1.5).kind(), Kind::Float);
    }

    #[test]
    fn cross_kind_equality_is_false() {
        assert_ne!(Value::from(1i64), Value::from(1.0));
    }

    #[test]
    fn float_equality_uses_epsilon() {
        assert_eq!(Value::from(0.1 + 0.2), Value::from(0.3));
    }

    #[test]
    fn primitive_equality_both_directions() {
        let v = Value::from(true);
        assert_eq!(v, true);
        assert_eq!(true, v);
        let s = Value::borrowed("hi");
        assert_eq!(s, "hi");
        assert_eq!("hi", s);
    }

    #[test]
    fn index_auto_promotes_null_to_object() {
        let mut v = Value::Null;
        v["a"] = Value::from(1i64);
        assert_eq!(v.kind(), Kind::Object);
        assert_eq!(v["a"], 1i64);
        assert_eq!(v["missing"], Value::Null);
    }

    #[test]
    fn index_auto_extends_array() {
        let mut v = Value::Null;
        v[2] = Value::from(true);
        assert_eq!(v.kind(), Kind::Array);
        assert_eq!(v.as_array().unwrap().len(), 3);
        assert_eq!(v[0], Value::Null);
        assert_eq!(v[2], true);
    }

    #[test]
    fn at_signed_rejects_any_negative_index() {
        let v = Value::Array(alloc::vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]);
        assert!(matches!(v.at_signed(-1), Err(JsonError::IndexUnderflow)));
        assert!(matches!(v.at_signed(-3), Err(JsonError::IndexUnderflow)));
        assert!(matches!(v.at_signed(i64::MIN), Err(JsonError::IndexUnderflow)));
        assert_eq!(v.at_signed(0).unwrap(), Some(&Value::from(1i64)));
        assert_eq!(v.at_signed(2).unwrap(), Some(&Value::from(3i64)));
        assert_eq!(v.at_signed(3).unwrap(), None);
    }

    #[test]
    fn at_signed_requires_array() {
        let v = Value::Null;
        assert!(matches!(
            v.at_signed(0),
            Err(JsonError::TypeMismatch { expected: Kind::Array, .. })
        ));
    }

    #[test]
    fn set_replaces_payload() {
        let mut v = Value::from(1i64);
        v.set(true);
        assert_eq!(v, true);
    }

    #[test]
    fn try_from_reads_matching_kind() {
        let v = Value::from(5i64);
        assert_eq!(i64::try_from(&v).unwrap(), 5);
        assert!(matches!(
            bool::try_from(&v),
            Err(JsonError::TypeMismatch { expected: Kind::Boolean, .. })
        ));
    }

    #[test]
    fn clear_resets_to_kind_default() {
        let mut v = Value::from(42i64);
        v.clear(Kind::String);
        assert_eq!(v, "");
    }

    #[test]
    fn raw_str_accessors() {
        let v = Value::borrowed("hello");
        assert_eq!(v.as_raw_str(), Some("hello"));
        assert_eq!(v.str_len(), Some(5));
        assert_eq!(Value::Null.str_len(), None);
    }
}
