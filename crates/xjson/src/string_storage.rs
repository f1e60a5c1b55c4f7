//! The three-way small-string / owned / borrowed representation backing
//! [`Value::String`](crate::Value::String).
use alloc::string::String;

const INLINE_CAP: usize = 15;

/// Storage for a JSON string value.
///
/// A string is held in one of three ways, chosen at construction time and
/// never silently downgraded except when a caller asks for a mutable
/// [`String`] (see [`JsonString::make_mut`]):
///
/// - [`JsonString::Inline`]: up to 15 bytes stored directly, no allocation.
/// - [`JsonString::Owned`]: a heap-allocated, independently mutable buffer.
/// - [`JsonString::Borrowed`]: a `&'a str` view over memory the caller owns.
///   The lifetime parameter is the Rust-idiomatic replacement for the
///   legacy "pointer + length, caller keeps the buffer alive" contract: the
///   borrow checker enforces it instead of the caller's discipline.
#[derive(Clone, Debug)]
pub enum JsonString<'a> {
    /// Up to [`INLINE_CAP`] bytes stored inline, with the live length.
    Inline([u8; INLINE_CAP], u8),
    /// A heap-allocated, owned string.
    Owned(String),
    /// A borrowed view over caller memory, plus whether it contains any
    /// character that requires escaping on output.
    Borrowed(&'a str, bool),
}

/// Returns `true` if `s` contains a character JSON output must escape:
/// `"`, `\`, `/`, or any control character (byte `< 0x20`).
#[must_use]
pub fn needs_escape(s: &str) -> bool {
    s.bytes()
        .any(|b| b == b'"' || b == b'\\' || b == b'/' || b < 0x20)
}

impl<'a> JsonString<'a> {
    /// Builds storage for an owned copy of `s`, inlining it when it fits.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        if s.len() <= INLINE_CAP {
            let mut buf = [0u8; INLINE_CAP];
            buf[..s.len()].copy_from_slice(s.as_bytes());
            JsonString::Inline(buf, s.len() as u8)
        } else {
            JsonString::Owned(String::from(s))
        }
    }

    /// Builds storage for an owned `String`, inlining it when it fits so
    /// short strings avoid keeping a heap allocation alive.
    #[must_use]
    pub fn from_string(s: String) -> Self {
        if s.len() <= INLINE_CAP {
            Self::from_str(&s)
        } else {
            JsonString::Owned(s)
        }
    }

    /// Builds a borrowed view over `s`, precomputing `needs_escape` with a
    /// single scan so the serializer never has to rescan on write.
    #[must_use]
    pub fn borrowed(s: &'a str) -> Self {
        JsonString::Borrowed(s, needs_escape(s))
    }

    /// The string's bytes as a `&str`, regardless of storage mode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            JsonString::Inline(buf, len) => {
                // SAFETY: `from_str`/`from_string` only ever copy from a
                // valid `&str`, so the live prefix is valid UTF-8.
                unsafe { core::str::from_utf8_unchecked(&buf[..*len as usize]) }
            }
            JsonString::Owned(s) => s.as_str(),
            JsonString::Borrowed(s, _) => s,
        }
    }

    /// Byte length of the string, regardless of storage mode.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// `true` if the string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this string contains a character requiring escape on output.
    #[must_use]
    pub fn needs_escape(&self) -> bool {
        match self {
            JsonString::Inline(buf, len) => {
                needs_escape(unsafe { core::str::from_utf8_unchecked(&buf[..*len as usize]) })
            }
            JsonString::Owned(s) => needs_escape(s),
            JsonString::Borrowed(_, flag) => *flag,
        }
    }

    /// Materializes this storage into an owned, mutable `String`,
    /// converting `Inline`/`Borrowed` storage in place, and returns a
    /// mutable reference to it.
    ///
    /// Per the crate's mutation contract, obtaining a mutable reference
    /// conservatively marks the string as needing escape-rescan on next
    /// write, since the caller may change its contents.
    pub fn make_mut(&mut self) -> &mut String {
        if !matches!(self, JsonString::Owned(_)) {
            let owned = String::from(self.as_str());
            *self = JsonString::Owned(owned);
        }
        let JsonString::Owned(s) = self else {
            unreachable!("just materialized into Owned")
        };
        s
    }
}

impl PartialEq for JsonString<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
impl Eq for JsonString<'_> {}

impl core::fmt::Display for JsonString<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_round_trip() {
        let s = JsonString::from_str("short");
        assert!(matches!(s, JsonString::Inline(..)));
        assert_eq!(s.as_str(), "short");
    }

    #[test]
    fn exactly_fifteen_bytes_is_inline() {
        let fifteen = "a".repeat(15);
        let s = JsonString::from_str(&fifteen);
        assert!(matches!(s, JsonString::Inline(..)));
        assert_eq!(s.len(), 15);
    }

    #[test]
    fn sixteen_bytes_is_owned() {
        let sixteen = "a".repeat(16);
        let s = JsonString::from_str(&sixteen);
        assert!(matches!(s, JsonString::Owned(_)));
    }

    #[test]
    fn borrowed_precomputes_needs_escape() {
        let clean = JsonString::borrowed("clean");
        assert!(!clean.needs_escape());
        let dirty = JsonString::borrowed("dir\"ty");
        assert!(dirty.needs_escape());
    }

    #[test]
    fn make_mut_materializes_borrowed() {
        let mut s = JsonString::borrowed("hello");
        s.make_mut().push_str(" world");
        assert!(matches!(s, JsonString::Owned(_)));
        assert_eq!(s.as_str(), "hello world");
    }

    #[test]
    fn equality_ignores_storage_mode() {
        let a = JsonString::from_str("same");
        let b = JsonString::borrowed("same");
        assert_eq!(a, b);
    }
}
