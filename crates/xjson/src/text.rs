//! Escape encoding/decoding and `\uXXXX` surrogate-pair handling for JSON
//! string bodies.
//!
//! These functions operate on a string *body* — the characters between the
//! surrounding quotes, with no quotes of its own. The narrow functions
//! target the crate's native UTF-8 representation; the wide functions
//! additionally escape non-ASCII code points and split astral characters
//! into UTF-16 surrogate pairs, for the wide serializer output described in
//! the crate's `SPEC_FULL.md` §4.1/§4.5.
use alloc::{string::String, vec::Vec};
use core::fmt::Write as _;

use crate::error::SyntaxError;

/// Appends the escape-encoded body of `src` (narrow/8-bit rules) to `out`.
///
/// Quotes, backslashes, `/`, and control characters are escaped; all other
/// characters, including non-ASCII ones, are copied verbatim since the
/// output is UTF-8 already.
pub fn write_escaped_narrow(src: &str, out: &mut String) {
    for c in src.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                write!(out, "\\u{:04x}", c as u32).expect("String write is infallible");
            }
            c => out.push(c),
        }
    }
}

/// Appends the escape-encoded body of `src` (wide/UTF-16 rules) to `out`.
///
/// Every code unit above `0x7F` is escaped as `\uXXXX`; code points beyond
/// the Basic Multilingual Plane are split into a UTF-16 surrogate pair of
/// two `\u` escapes, per RFC 8259 §7.
pub fn write_escaped_wide(src: &str, out: &mut Vec<u16>) {
    for c in src.chars() {
        match c {
            '"' => out.extend([u16::from(b'\\'), u16::from(b'"')]),
            '\\' => out.extend([u16::from(b'\\'), u16::from(b'\\')]),
            '/' => out.extend([u16::from(b'\\'), u16::from(b'/')]),
            '\u{8}' => out.extend([u16::from(b'\\'), u16::from(b'b')]),
            '\u{c}' => out.extend([u16::from(b'\\'), u16::from(b'f')]),
            '\n' => out.extend([u16::from(b'\\'), u16::from(b'n')]),
            '\r' => out.extend([u16::from(b'\\'), u16::from(b'r')]),
            '\t' => out.extend([u16::from(b'\\'), u16::from(b't')]),
            c if (c as u32) < 0x20 || (c as u32) > 0x7F => push_unicode_escape_wide(c, out),
            c => out.push(c as u16),
        }
    }
}

fn push_unicode_escape_wide(c: char, out: &mut Vec<u16>) {
    let cp = c as u32;
    if cp > 0xFFFF {
        let v = cp - 0x10000;
        push_u_escape(0xD800 + ((v >> 10) as u16), out);
        push_u_escape(0xDC00 + ((v & 0x3FF) as u16), out);
    } else {
        push_u_escape(cp as u16, out);
    }
}

fn push_u_escape(unit: u16, out: &mut Vec<u16>) {
    out.push(u16::from(b'\\'));
    out.push(u16::from(b'u'));
    for shift in [12, 8, 4, 0] {
        let nibble = (unit >> shift) & 0xF;
        out.push(u16::from(hex_digit_lower(nibble)));
    }
}

fn hex_digit_lower(n: u16) -> u8 {
    b"0123456789abcdef"[n as usize]
}

/// Decodes a JSON string body (the characters between the quotes, already
/// unescaped of nothing) into `out`, interpreting `\` escapes and `\uXXXX`
/// sequences including surrogate pairs.
///
/// Rejects any escape letter outside the JSON grammar, malformed or
/// unpaired surrogates, and decoded code points above U+10FFFF.
pub fn decode_body(body: &str, out: &mut String) -> Result<(), SyntaxError> {
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape = chars.next().ok_or(SyntaxError::UnexpectedEof)?;
        match escape {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => out.push(decode_unicode_escape(&mut chars)?),
            _ => return Err(SyntaxError::InvalidEscape),
        }
    }
    Ok(())
}

/// Decodes one `\uXXXX` sequence (the `\u` already consumed) from `chars`,
/// combining a high/low surrogate pair into a single scalar value when
/// present, per the algorithm in `SPEC_FULL.md` §4.1.
fn decode_unicode_escape(chars: &mut core::str::Chars<'_>) -> Result<char, SyntaxError> {
    let hi = read_hex4(chars)?;
    let code_point = if (0xD800..0xDC00).contains(&hi) {
        let (a, b) = (chars.next(), chars.next());
        if a != Some('\\') || b != Some('u') {
            return Err(SyntaxError::InvalidEscape);
        }
        let lo = read_hex4(chars)?;
        if !(0xDC00..0xE000).contains(&lo) {
            return Err(SyntaxError::InvalidEscape);
        }
        0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
    } else if (0xDC00..0xE000).contains(&hi) {
        // Lone low surrogate: never valid on its own.
        return Err(SyntaxError::InvalidEscape);
    } else {
        hi
    };
    char::from_u32(code_point).ok_or(SyntaxError::InvalidUnicodeScalar)
}

fn read_hex4(chars: &mut core::str::Chars<'_>) -> Result<u32, SyntaxError> {
    let mut value = 0u32;
    for _ in 0..4 {
        let c = chars.next().ok_or(SyntaxError::InvalidEscape)?;
        let digit = c.to_digit(16).ok_or(SyntaxError::InvalidEscape)?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_narrow_covers_named_escapes() {
        let mut out = String::new();
        write_escaped_narrow("a\"b\\c/d\u{8}e\u{c}f\ng\rh\ti", &mut out);
        assert_eq!(out, r#"a\"b\\c\/d\be\ff\ng\rh\ti"#);
    }

    #[test]
    fn escape_narrow_controls_get_u00xx() {
        let mut out = String::new();
        write_escaped_narrow("\u{1}", &mut out);
        assert_eq!(out, "\\u0001");
    }

    #[test]
    fn escape_narrow_leaves_non_ascii_alone() {
        let mut out = String::new();
        write_escaped_narrow("caf\u{e9}", &mut out);
        assert_eq!(out, "caf\u{e9}");
    }

    #[test]
    fn decode_handles_all_named_escapes() {
        let mut out = String::new();
        decode_body(r#"\"\\\/\b\f\n\r\t"#, &mut out).unwrap();
        assert_eq!(out, "\"\\/\u{8}\u{c}\n\r\t");
    }

    #[test]
    fn decode_rejects_unknown_escape() {
        let mut out = String::new();
        assert_eq!(decode_body(r"\v", &mut out), Err(SyntaxError::InvalidEscape));
    }

    #[test]
    fn decode_combines_surrogate_pair() {
        let mut out = String::new();
        decode_body(r"𣍐", &mut out).unwrap();
        assert_eq!(out.chars().next(), Some('\u{23350}'));
    }

    #[test]
    fn decode_rejects_lone_high_surrogate() {
        let mut out = String::new();
        assert_eq!(
            decode_body(r"\ud84c", &mut out),
            Err(SyntaxError::InvalidEscape)
        );
    }

    #[test]
    fn decode_rejects_lone_low_surrogate() {
        let mut out = String::new();
        assert_eq!(
            decode_body(r"\udf50", &mut out),
            Err(SyntaxError::InvalidEscape)
        );
    }

    #[test]
    fn wide_escape_splits_astral_into_surrogate_pair() {
        let mut out = Vec::new();
        write_escaped_wide("\u{23350}", &mut out);
        let as_string: String = out.iter().map(|&u| u as u8 as char).collect();
        assert_eq!(as_string, "\\ud84c\\udf50");
    }

    #[test]
    fn wide_escape_escapes_non_ascii_bmp() {
        let mut out = Vec::new();
        write_escaped_wide("\u{e9}", &mut out);
        let as_string: String = out.iter().map(|&u| u as u8 as char).collect();
        assert_eq!(as_string, "\\u00e9");
    }

    #[test]
    fn round_trip_escape_then_decode() {
        let original = "test\"\\/\u{8}\u{c}\n\r\t";
        let mut encoded = String::new();
        write_escaped_narrow(original, &mut encoded);
        let mut decoded = String::new();
        decode_body(&encoded, &mut decoded).unwrap();
        assert_eq!(decoded, original);
    }
}
