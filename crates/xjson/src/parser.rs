//! The iterative, explicit-stack JSON parser.
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{JsonError, SyntaxError};
use crate::number::{parse_number, NumberValue};
use crate::string_storage::JsonString;
use crate::text::decode_body;
use crate::value::{Array, Map, Value};

/// Parser relaxations, all disabled by default (strict RFC 8259 behavior).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Allow a single trailing comma before a closing `}` or `]`.
    pub allow_trailing_comma: bool,
    /// Accept any `char::is_whitespace` code point between tokens, in
    /// addition to the default `{space, \n, \r, \t}`.
    pub allow_unicode_whitespace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    Start,
    AfterKey,
    AwaitValue,
    Running,
    AfterComma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    Start,
    Running,
    AfterComma,
}

enum Frame<'a> {
    Object {
        map: Map<'a>,
        state: ObjectState,
        pending_key: Option<String>,
    },
    Array {
        items: Array<'a>,
        state: ArrayState,
    },
}

/// What the driver loop should do next, derived from a cheap, short-lived
/// peek at the top frame so the handler functions below are always free to
/// take their own `&mut Vec<Frame>` without fighting an outstanding borrow.
#[derive(Clone, Copy)]
enum Action {
    ObjectAwaitKeyOrClose { allow_close: bool },
    ObjectAfterKey,
    ObjectAwaitValue,
    ObjectRunning,
    ArrayStartOrComma { allow_close: bool },
    ArrayRunning,
}

impl<'a> Value<'a> {
    /// Parses a single top-level object or array from `buf`.
    ///
    /// Returns the parsed value and the number of bytes consumed, which
    /// ends at the closing `}`/`]` of the top-level value; any trailing
    /// bytes after it are ignored and left for the caller to inspect.
    ///
    /// When `borrow` is set, string values containing no escape sequences
    /// are stored as [`crate::string_storage::JsonString::Borrowed`] views
    /// into `buf` rather than copied.
    pub fn parse(buf: &'a [u8], borrow: bool) -> Result<(Value<'a>, usize), JsonError> {
        Self::parse_with_options(buf, borrow, &ParserOptions::default())
    }

    /// As [`Value::parse`], with explicit [`ParserOptions`].
    pub fn parse_with_options(
        buf: &'a [u8],
        borrow: bool,
        options: &ParserOptions,
    ) -> Result<(Value<'a>, usize), JsonError> {
        parse(buf, borrow, options)
    }
}

fn parse<'a>(
    bytes: &'a [u8],
    borrow: bool,
    options: &ParserOptions,
) -> Result<(Value<'a>, usize), JsonError> {
    let mut pos = 0usize;
    skip_ws(bytes, &mut pos, options);

    let mut stack: Vec<Frame<'a>> = Vec::new();
    match bytes.get(pos) {
        Some(b'{') => {
            pos += 1;
            stack.push(Frame::Object {
                map: Map::new(),
                state: ObjectState::Start,
                pending_key: None,
            });
        }
        Some(b'[') => {
            pos += 1;
            stack.push(Frame::Array {
                items: Array::new(),
                state: ArrayState::Start,
            });
        }
        _ => return Err(JsonError::parse(bytes, pos, SyntaxError::ExpectStructure)),
    }

    loop {
        skip_ws(bytes, &mut pos, options);
        let action = next_action(&stack, options);
        let result = match action {
            Action::ObjectAwaitKeyOrClose { allow_close } => {
                object_await_key_or_close(bytes, &mut pos, &mut stack, allow_close)?
            }
            Action::ObjectAfterKey => object_after_key(bytes, &mut pos, &mut stack)?,
            Action::ObjectAwaitValue => object_await_value(bytes, &mut pos, borrow, &mut stack)?,
            Action::ObjectRunning => object_running(bytes, &mut pos, &mut stack)?,
            Action::ArrayStartOrComma { allow_close } => {
                array_start_or_comma(bytes, &mut pos, borrow, &mut stack, allow_close)?
            }
            Action::ArrayRunning => array_running(bytes, &mut pos, &mut stack)?,
        };
        if let Some(v) = result {
            return Ok((v, pos));
        }
    }
}

fn next_action(stack: &[Frame<'_>], options: &ParserOptions) -> Action {
    match stack.last().expect("stack never empties mid-loop") {
        Frame::Object { state, .. } => match state {
            ObjectState::Start => Action::ObjectAwaitKeyOrClose { allow_close: true },
            ObjectState::AfterComma => Action::ObjectAwaitKeyOrClose {
                allow_close: options.allow_trailing_comma,
            },
            ObjectState::AfterKey => Action::ObjectAfterKey,
            ObjectState::AwaitValue => Action::ObjectAwaitValue,
            ObjectState::Running => Action::ObjectRunning,
        },
        Frame::Array { state, .. } => match state {
            ArrayState::Start => Action::ArrayStartOrComma { allow_close: true },
            ArrayState::AfterComma => Action::ArrayStartOrComma {
                allow_close: options.allow_trailing_comma,
            },
            ArrayState::Running => Action::ArrayRunning,
        },
    }
}

fn object_await_key_or_close<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    stack: &mut Vec<Frame<'a>>,
    allow_close: bool,
) -> Result<Option<Value<'a>>, JsonError> {
    match bytes.get(*pos) {
        Some(b'}') if allow_close => {
            *pos += 1;
            let Frame::Object { map, .. } = stack.last_mut().expect("frame still on top") else {
                unreachable!("top frame is the object we are closing")
            };
            let finished = Value::Object(core::mem::take(map));
            close_frame(stack, finished)
        }
        Some(b'"') => {
            let (key, consumed) = read_raw_string(bytes, *pos, false)
                .map_err(|e| JsonError::parse(bytes, *pos, e))?;
            *pos += consumed;
            let Frame::Object {
                pending_key, state, ..
            } = stack.last_mut().expect("frame still on top")
            else {
                unreachable!("top frame is the object awaiting this key")
            };
            *pending_key = Some(String::from(key.as_str()));
            *state = ObjectState::AfterKey;
            Ok(None)
        }
        Some(_) => Err(JsonError::parse(bytes, *pos, SyntaxError::ExpectedToken('"'))),
        None => Err(JsonError::parse(bytes, *pos, SyntaxError::UnexpectedEof)),
    }
}

fn object_after_key<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    stack: &mut Vec<Frame<'a>>,
) -> Result<Option<Value<'a>>, JsonError> {
    match bytes.get(*pos) {
        Some(b':') => {
            *pos += 1;
            let Frame::Object { state, .. } = stack.last_mut().expect("frame still on top") else {
                unreachable!("top frame is the object awaiting a colon")
            };
            *state = ObjectState::AwaitValue;
            Ok(None)
        }
        Some(_) => Err(JsonError::parse(bytes, *pos, SyntaxError::ExpectedToken(':'))),
        None => Err(JsonError::parse(bytes, *pos, SyntaxError::UnexpectedEof)),
    }
}

fn object_await_value<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    borrow: bool,
    stack: &mut Vec<Frame<'a>>,
) -> Result<Option<Value<'a>>, JsonError> {
    if let Some(value) = parse_value_token(bytes, pos, borrow, stack)? {
        let Frame::Object {
            map,
            state,
            pending_key,
        } = stack.last_mut().expect("frame still on top")
        else {
            unreachable!("top frame is the object awaiting this value")
        };
        let key = pending_key.take().expect("key set before AwaitValue");
        map.insert(key, value);
        *state = ObjectState::Running;
    }
    Ok(None)
}

fn object_running<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    stack: &mut Vec<Frame<'a>>,
) -> Result<Option<Value<'a>>, JsonError> {
    match bytes.get(*pos) {
        Some(b'}') => {
            *pos += 1;
            let Frame::Object { map, .. } = stack.last_mut().expect("frame still on top") else {
                unreachable!("top frame is the object we are closing")
            };
            let finished = Value::Object(core::mem::take(map));
            close_frame(stack, finished)
        }
        Some(b',') => {
            *pos += 1;
            let Frame::Object { state, .. } = stack.last_mut().expect("frame still on top") else {
                unreachable!("top frame is the object we are advancing")
            };
            *state = ObjectState::AfterComma;
            Ok(None)
        }
        Some(_) => Err(JsonError::parse(bytes, *pos, SyntaxError::ExpectedToken(','))),
        None => Err(JsonError::parse(bytes, *pos, SyntaxError::UnexpectedEof)),
    }
}

fn array_start_or_comma<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    borrow: bool,
    stack: &mut Vec<Frame<'a>>,
    allow_close: bool,
) -> Result<Option<Value<'a>>, JsonError> {
    if bytes.get(*pos) == Some(&b']') && allow_close {
        *pos += 1;
        let Frame::Array { items, .. } = stack.last_mut().expect("frame still on top") else {
            unreachable!("top frame is the array we are closing")
        };
        let finished = Value::Array(core::mem::take(items));
        return close_frame(stack, finished);
    }
    if let Some(value) = parse_value_token(bytes, pos, borrow, stack)? {
        let Frame::Array { items, state } = stack.last_mut().expect("frame still on top") else {
            unreachable!("top frame is the array awaiting this element")
        };
        items.push(value);
        *state = ArrayState::Running;
    }
    Ok(None)
}

fn array_running<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    stack: &mut Vec<Frame<'a>>,
) -> Result<Option<Value<'a>>, JsonError> {
    match bytes.get(*pos) {
        Some(b']') => {
            *pos += 1;
            let Frame::Array { items, .. } = stack.last_mut().expect("frame still on top") else {
                unreachable!("top frame is the array we are closing")
            };
            let finished = Value::Array(core::mem::take(items));
            close_frame(stack, finished)
        }
        Some(b',') => {
            *pos += 1;
            let Frame::Array { state, .. } = stack.last_mut().expect("frame still on top") else {
                unreachable!("top frame is the array we are advancing")
            };
            *state = ArrayState::AfterComma;
            Ok(None)
        }
        Some(_) => Err(JsonError::parse(bytes, *pos, SyntaxError::ExpectedToken(','))),
        None => Err(JsonError::parse(bytes, *pos, SyntaxError::UnexpectedEof)),
    }
}

/// Attaches a just-closed container's value to its parent frame, or
/// signals completion if the stack is now empty.
fn close_frame<'a>(
    stack: &mut Vec<Frame<'a>>,
    finished: Value<'a>,
) -> Result<Option<Value<'a>>, JsonError> {
    stack.pop();
    match stack.last_mut() {
        None => Ok(Some(finished)),
        Some(Frame::Object {
            map,
            state,
            pending_key,
        }) => {
            let key = pending_key
                .take()
                .expect("parent object was awaiting a value");
            map.insert(key, finished);
            *state = ObjectState::Running;
            Ok(None)
        }
        Some(Frame::Array { items, state }) => {
            items.push(finished);
            *state = ArrayState::Running;
            Ok(None)
        }
    }
}

/// Parses one value token at `*pos`. If it opens a new object/array, the
/// new frame is pushed onto `stack` and `None` is returned — the caller
/// should leave attachment to [`close_frame`] once that frame closes.
/// Otherwise returns the parsed scalar for the caller to attach directly.
fn parse_value_token<'a>(
    bytes: &'a [u8],
    pos: &mut usize,
    borrow: bool,
    stack: &mut Vec<Frame<'a>>,
) -> Result<Option<Value<'a>>, JsonError> {
    match bytes.get(*pos) {
        Some(b'{') => {
            *pos += 1;
            stack.push(Frame::Object {
                map: Map::new(),
                state: ObjectState::Start,
                pending_key: None,
            });
            Ok(None)
        }
        Some(b'[') => {
            *pos += 1;
            stack.push(Frame::Array {
                items: Array::new(),
                state: ArrayState::Start,
            });
            Ok(None)
        }
        Some(b'"') => {
            let (s, consumed) = read_raw_string(bytes, *pos, borrow)
                .map_err(|e| JsonError::parse(bytes, *pos, e))?;
            *pos += consumed;
            Ok(Some(Value::String(s)))
        }
        Some(b't' | b'f') => {
            let (b, consumed) =
                read_boolean(bytes, *pos).map_err(|e| JsonError::parse(bytes, *pos, e))?;
            *pos += consumed;
            Ok(Some(Value::Boolean(b)))
        }
        Some(b'n') => {
            let consumed = read_null(bytes, *pos).map_err(|e| JsonError::parse(bytes, *pos, e))?;
            *pos += consumed;
            Ok(Some(Value::Null))
        }
        Some(b'-' | b'0'..=b'9') => {
            let (n, consumed) =
                parse_number(&bytes[*pos..]).map_err(|e| JsonError::parse(bytes, *pos, e))?;
            *pos += consumed;
            Ok(Some(match n {
                NumberValue::Integer(i) => Value::Integer(i),
                NumberValue::Float(f) => Value::Float(f),
            }))
        }
        Some(&c) => Err(JsonError::parse(
            bytes,
            *pos,
            SyntaxError::UnexpectedChar(c as char),
        )),
        None => Err(JsonError::parse(bytes, *pos, SyntaxError::UnexpectedEof)),
    }
}

/// Scans a quoted string token starting at `bytes[start] == '"'`.
///
/// Returns the decoded string and the number of bytes consumed, including
/// both quotes. When `borrow` is set and the body contains no escapes, the
/// result borrows directly from `bytes`.
fn read_raw_string<'a>(
    bytes: &'a [u8],
    start: usize,
    borrow: bool,
) -> Result<(JsonString<'a>, usize), SyntaxError> {
    let mut i = start + 1;
    let mut has_escape = false;
    loop {
        match bytes.get(i) {
            None => return Err(SyntaxError::UnexpectedEof),
            Some(b'"') => break,
            Some(b'\\') => {
                has_escape = true;
                i += 2;
            }
            Some(_) => i += 1,
        }
    }
    let body_bytes = &bytes[start + 1..i];
    let consumed = i + 1 - start;
    let body = core::str::from_utf8(body_bytes)
        .map_err(|_| SyntaxError::UnexpectedChar(char::REPLACEMENT_CHARACTER))?;

    if !has_escape {
        if borrow {
            return Ok((JsonString::borrowed(body), consumed));
        }
        return Ok((JsonString::from_str(body), consumed));
    }

    let mut out = String::new();
    decode_body(body, &mut out)?;
    Ok((JsonString::from_string(out), consumed))
}

fn read_null(bytes: &[u8], start: usize) -> Result<usize, SyntaxError> {
    if bytes.get(start..start + 4) == Some(b"null") {
        Ok(4)
    } else {
        Err(SyntaxError::InvalidLiteral)
    }
}

fn read_boolean(bytes: &[u8], start: usize) -> Result<(bool, usize), SyntaxError> {
    if bytes.get(start..start + 4) == Some(b"true") {
        Ok((true, 4))
    } else if bytes.get(start..start + 5) == Some(b"false") {
        Ok((false, 5))
    } else {
        Err(SyntaxError::InvalidLiteral)
    }
}

fn skip_ws(bytes: &[u8], pos: &mut usize, options: &ParserOptions) {
    if options.allow_unicode_whitespace {
        while *pos < bytes.len() {
            let rest = core::str::from_utf8(&bytes[*pos..]).unwrap_or("");
            match rest.chars().next() {
                Some(c) if c.is_whitespace() => *pos += c.len_utf8(),
                _ => break,
            }
        }
    } else {
        while matches!(bytes.get(*pos), Some(b' ' | b'\n' | b'\r' | b'\t')) {
            *pos += 1;
        }
    }
}
