//! The discriminant of a [`Value`](crate::Value).

/// Which variant a [`Value`](crate::Value) currently holds.
///
/// This is the tag of the tagged union described by the crate's data model:
/// every [`Value`](crate::Value) is exactly one `Kind` at a time, and the
/// typed accessors check it before touching the payload.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number with no fractional part or exponent that fits in `i64`.
    Integer,
    /// A number with a fractional part, an exponent, or out of `i64` range.
    Float,
    /// A JSON string, in any of the three storage modes.
    String,
    /// A JSON object: a mapping from string keys to values.
    Object,
    /// A JSON array: an ordered sequence of values.
    Array,
}

impl Kind {
    /// A short, human-readable name, used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Array => "array",
        }
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
