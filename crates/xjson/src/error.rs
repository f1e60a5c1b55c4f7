//! Error types produced by parsing, serialization, and typed value access.
use alloc::string::String;

use thiserror::Error;

use crate::kind::Kind;

/// A byte offset into the input buffer a [`JsonError`] occurred at, together
/// with the 1-based line/column derived from it.
///
/// Line and column are computed by counting `\n` bytes and the bytes since
/// the last one, so they are only meaningful for the 8-bit (UTF-8) input
/// path; wide-input callers should treat `offset` as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the start of the input buffer.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Position {
    pub(crate) fn in_bytes(input: &[u8], offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for &b in &input[..offset.min(input.len())] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self {
            offset,
            line,
            column,
        }
    }
}

/// The reason a grammatical parse failed, independent of where it failed.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SyntaxError {
    /// The input did not start with `{` or `[`.
    #[error("expected '{{' or '[' to begin a value")]
    ExpectStructure,
    /// An unexpected character was encountered.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    /// The input ended before a value, string, or structure was closed.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A `\` escape used an unrecognized letter, or a `\u` escape was
    /// malformed (bad hex digit, truncated, or an unpaired surrogate).
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// A code point decoded from a `\u` escape pair is not a valid Unicode
    /// scalar value (e.g. an unpaired surrogate half, or above U+10FFFF).
    #[error("invalid unicode scalar value")]
    InvalidUnicodeScalar,
    /// The number's shape did not match the JSON grammar (leading zero,
    /// missing exponent digits, dangling `.`, and so on).
    #[error("invalid number literal")]
    InvalidNumber,
    /// A literal (`true`, `false`, `null`) was not spelled exactly.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A comma, colon, or closing bracket was expected but not found.
    #[error("expected '{0}'")]
    ExpectedToken(char),
}

/// Top-level error type for this crate: parse failures, string decode
/// failures, and misuse of the typed [`Value`](crate::Value) accessors.
#[derive(Debug, Error, PartialEq)]
pub enum JsonError {
    /// A grammatical violation while parsing a JSON document.
    #[error("parse error at {position:?}: {cause}")]
    Parse {
        /// What went wrong.
        cause: SyntaxError,
        /// Where it went wrong.
        position: Position,
    },
    /// A typed accessor or cast was used on a [`Value`](crate::Value) of the
    /// wrong [`Kind`].
    #[error("type mismatch: expected {expected:?}, found {actual:?}")]
    TypeMismatch {
        /// The kind the caller required.
        expected: Kind,
        /// The kind the value actually had.
        actual: Kind,
    },
    /// A negative index was used with the array indexing operation.
    #[error("array index underflow")]
    IndexUnderflow,
    /// An internal numeric-formatting buffer would have overflowed.
    ///
    /// Kept for parity with the legacy fixed-size-scratch-buffer failure
    /// mode; unreachable in practice since this crate formats into a
    /// growable `String`.
    #[error("numeric formatting buffer overflow")]
    FormatOverflow,
}

impl JsonError {
    pub(crate) fn parse(input: &[u8], offset: usize, cause: SyntaxError) -> Self {
        JsonError::Parse {
            cause,
            position: Position::in_bytes(input, offset),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, JsonError>;

#[allow(dead_code)]
pub(crate) fn fragment(input: &[u8], offset: usize) -> String {
    let start = offset.saturating_sub(20).min(input.len());
    let end = (offset + 20).min(input.len());
    String::from_utf8_lossy(&input[start..end]).into_owned()
}
