use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::stack::{Argument, CommandStack};

/// Scan a `"`-delimited string and push it as `String`.
///
/// `\` and `^` both introduce an escape; the byte after either is never
/// read as a closing quote. Escape offsets are collected in one pass and
/// only decoded once the closing quote is found. A string without escapes
/// is pushed straight from the source.
pub fn scan_string<S: CommandStack + ?Sized>(
    cursor: &mut Cursor<'_>,
    stack: &mut S,
) -> Result<(), ParseError> {
    debug_assert_eq!(cursor.current(), Some(b'"'));
    let start = cursor.pos() + 1;
    cursor.set_pos(start);

    let mut escapes = Vec::new();
    let mut i = start;
    while let Some(c) = cursor.byte(i) {
        match c {
            b'"' => {
                let body = cursor.slice(start, i);
                if escapes.is_empty() {
                    stack.push_argument(Argument::String(body));
                } else {
                    let decoded = decode_escapes(body, &escapes);
                    stack.push_argument(Argument::String(&decoded));
                }
                cursor.set_pos(i);
                return Ok(());
            }
            b'\\' | b'^' => {
                escapes.push(i - start);
                i += 1;
            }
            b'\n' | b'\r' => {
                return Err(cursor.fail(i, ParseErrorKind::StringUnterminatedAtEndOfLine));
            }
            _ => {}
        }
        i += 1;
    }

    Err(cursor.fail(cursor.end(), ParseErrorKind::UnterminatedString))
}

/// Rebuild `body` with each escape (given as an offset into `body`)
/// replaced by the byte it stands for. Unknown escapes decode to nothing.
fn decode_escapes(body: &[u8], escapes: &[usize]) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(body.len());
    let Some(&first) = escapes.first() else {
        return body.to_vec();
    };
    decoded.extend_from_slice(&body[..first]);

    for (n, &at) in escapes.iter().enumerate() {
        match body.get(at + 1) {
            Some(b'"') => decoded.push(b'"'),
            Some(b'\\') => decoded.push(b'\\'),
            Some(b'n') => decoded.push(b'\n'),
            Some(b'r') => decoded.push(b'\r'),
            Some(b't') => decoded.push(b'\t'),
            Some(b'f') => decoded.push(0x0C),
            Some(b'b') => decoded.push(0x08),
            _ => {}
        }
        let next = escapes.get(n + 1).copied().unwrap_or(body.len());
        decoded.extend_from_slice(&body[at + 2..next]);
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStack, Value};

    fn scan(source: &str) -> (Result<(), ParseError>, usize, MemoryStack) {
        let mut stack = MemoryStack::new();
        let mut cursor = Cursor::new(source.as_bytes());
        let result = scan_string(&mut cursor, &mut stack);
        (result, cursor.pos(), stack)
    }

    fn string(source: &str) -> String {
        let (result, _, mut stack) = scan(source);
        assert!(result.is_ok(), "{source:?} failed: {result:?}");
        match stack.pop_value() {
            Some(Value::String(s)) => s,
            other => panic!("expected a string, got {other:?}"),
        }
    }

    #[test]
    fn plain_string_is_copied() {
        assert_eq!(string(r#""hello world""#), "hello world");
        assert_eq!(string(r#""""#), "");
    }

    #[test]
    fn cursor_left_on_closing_quote() {
        let (result, pos, _) = scan(r#""ab" rest"#);
        assert!(result.is_ok());
        assert_eq!(pos, 3);
    }

    #[test]
    fn quote_backslash_and_newline_escapes() {
        assert_eq!(string(r#""a\"b\\c\nd""#), "a\"b\\c\nd");
    }

    #[test]
    fn control_escapes() {
        assert_eq!(string(r#""\t\r\f\b""#), "\t\r\x0C\x08");
    }

    #[test]
    fn caret_is_an_escape_too() {
        assert_eq!(string(r#""x^"y^n""#), "x\"y\n");
    }

    #[test]
    fn unknown_escape_is_dropped() {
        assert_eq!(string(r#""a\qb""#), "ab");
    }

    #[test]
    fn utf8_passes_through() {
        assert_eq!(string("\"héllo\""), "héllo");
    }

    #[test]
    fn decode_keeps_runs_between_escapes() {
        let decoded = decode_escapes(br#"a\"b\\c\nd"#, &[1, 4, 7]);
        assert_eq!(decoded, b"a\"b\\c\nd");
    }

    #[test]
    fn raw_newline_ends_with_error() {
        let (result, pos, stack) = scan("\"abc\ndef\"");
        assert_eq!(
            result.map_err(|e| e.kind),
            Err(ParseErrorKind::StringUnterminatedAtEndOfLine)
        );
        assert_eq!(pos, 4);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn raw_carriage_return_ends_with_error() {
        let (result, _, _) = scan("\"abc\r\"");
        assert_eq!(
            result.map_err(|e| e.kind),
            Err(ParseErrorKind::StringUnterminatedAtEndOfLine)
        );
    }

    #[test]
    fn escaped_quote_does_not_close() {
        let (result, pos, _) = scan(r#""abc\""#);
        assert_eq!(result.map_err(|e| e.kind), Err(ParseErrorKind::UnterminatedString));
        assert_eq!(pos, 6);
    }

    #[test]
    fn end_of_buffer_is_unterminated() {
        let (result, _, _) = scan("\"abc");
        assert_eq!(result.map_err(|e| e.kind), Err(ParseErrorKind::UnterminatedString));
    }
}
