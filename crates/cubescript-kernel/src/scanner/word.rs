use crate::classify::{classify, TokenClass};
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::stack::{Argument, CommandStack};

/// Running guess at what an unquoted word holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordKind {
    Integer,
    Real,
    String,
}

impl WordKind {
    /// Refine the guess after seeing `c`. A leading `e` makes the word a
    /// string; a later one keeps it numeric (`1e5`).
    fn step(self, c: u8, leading: bool) -> Self {
        match self {
            WordKind::String => self,
            _ if c.is_ascii_digit() || c == b'-' || (c == b'e' && !leading) => self,
            _ if c == b'.' => WordKind::Real,
            _ => WordKind::String,
        }
    }
}

/// Scan an unquoted word and push it as `Int`, `Float` or `String`.
///
/// The word is the maximal run of ordinary bytes. Any other non-error byte
/// ends it; an error-class byte, or an empty run, is an invalid character.
pub fn scan_word<S: CommandStack + ?Sized>(
    cursor: &mut Cursor<'_>,
    stack: &mut S,
) -> Result<(), ParseError> {
    let start = cursor.pos();
    let mut kind = WordKind::Integer;
    let mut i = start;

    while let Some(c) = cursor.byte(i) {
        match classify(c) {
            TokenClass::OrdinaryChar => {}
            TokenClass::Error => return Err(cursor.fail(i, ParseErrorKind::InvalidCharacter)),
            _ if i == start => return Err(cursor.fail(i, ParseErrorKind::InvalidCharacter)),
            _ => {
                cursor.set_pos(i - 1);
                push_word(cursor.slice(start, i), kind, stack);
                return Ok(());
            }
        }
        kind = kind.step(c, i == start);
        i += 1;
    }

    Err(cursor.fail(cursor.end(), ParseErrorKind::UnterminatedWord))
}

fn push_word<S: CommandStack + ?Sized>(text: &[u8], kind: WordKind, stack: &mut S) {
    let number = match kind {
        WordKind::String => None,
        WordKind::Integer | WordKind::Real => parse_number(text),
    };
    match (kind, number) {
        (WordKind::Integer, Some(n)) => stack.push_argument(Argument::Int(n as i64)),
        (WordKind::Real, Some(n)) => stack.push_argument(Argument::Float(n)),
        _ => stack.push_argument(Argument::String(text)),
    }
}

/// Parse the longest prefix of `text` that reads as a decimal number, the
/// way `scanf("%f")` does. `None` when there is no digit to start from.
pub(crate) fn parse_number(text: &[u8]) -> Option<f64> {
    let digits = |from: usize| text[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(text.first(), Some(b'-' | b'+')));
    let mut mantissa = digits(end);
    end += mantissa;
    if text.get(end) == Some(&b'.') {
        let fraction = digits(end + 1);
        mantissa += fraction;
        end += 1 + fraction;
    }
    if mantissa == 0 {
        return None;
    }

    if matches!(text.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(text.get(exponent), Some(b'-' | b'+')) {
            exponent += 1;
        }
        let count = digits(exponent);
        if count > 0 {
            end = exponent + count;
        }
    }

    std::str::from_utf8(&text[..end]).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStack, Value};

    fn scan(source: &str) -> (Result<(), ParseError>, usize, MemoryStack) {
        let mut stack = MemoryStack::new();
        let mut cursor = Cursor::new(source.as_bytes());
        let result = scan_word(&mut cursor, &mut stack);
        (result, cursor.pos(), stack)
    }

    fn word(source: &str) -> Value {
        let (result, _, mut stack) = scan(source);
        assert!(result.is_ok(), "{source:?} failed: {result:?}");
        stack.pop_value().unwrap_or(Value::Nil)
    }

    #[test]
    fn integer_word() {
        assert_eq!(word("42 "), Value::Int(42));
        assert_eq!(word("-7;"), Value::Int(-7));
    }

    #[test]
    fn real_word() {
        assert_eq!(word("2.75\n"), Value::Float(2.75));
        assert_eq!(word(".5)"), Value::Float(0.5));
    }

    #[test]
    fn scientific_notation_stays_numeric() {
        assert_eq!(word("1e5 "), Value::Int(100_000));
        assert_eq!(word("2.5e-1 "), Value::Float(0.25));
    }

    #[test]
    fn leading_e_is_a_string() {
        assert_eq!(word("e5 "), Value::String("e5".into()));
    }

    #[test]
    fn other_letters_make_a_string() {
        assert_eq!(word("12abc "), Value::String("12abc".into()));
        assert_eq!(word("1E5 "), Value::String("1E5".into()));
        assert_eq!(word("hello-world "), Value::String("hello-world".into()));
    }

    #[test]
    fn numeric_prefix_is_used() {
        assert_eq!(word("1-2 "), Value::Int(1));
        assert_eq!(word("1.5.2 "), Value::Float(1.5));
        assert_eq!(word("3.9 "), Value::Float(3.9));
    }

    #[test]
    fn integer_is_truncated() {
        assert_eq!(word("7e-1 "), Value::Int(0));
    }

    #[test]
    fn word_without_digits_falls_back_to_string() {
        assert_eq!(word("- "), Value::String("-".into()));
        assert_eq!(word(". "), Value::String(".".into()));
    }

    #[test]
    fn cursor_left_on_last_byte() {
        let (result, pos, _) = scan("123 next");
        assert!(result.is_ok());
        assert_eq!(pos, 2);
    }

    #[test]
    fn error_byte_is_invalid_character() {
        let (result, pos, stack) = scan("ab\x01c ");
        assert_eq!(result.map_err(|e| e.kind), Err(ParseErrorKind::InvalidCharacter));
        assert_eq!(pos, 2);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn empty_run_is_invalid_character() {
        let (result, pos, _) = scan(" x");
        assert_eq!(result.map_err(|e| e.kind), Err(ParseErrorKind::InvalidCharacter));
        assert_eq!(pos, 0);
    }

    #[test]
    fn end_of_buffer_is_unterminated() {
        let (result, pos, _) = scan("abc");
        assert_eq!(result.map_err(|e| e.kind), Err(ParseErrorKind::UnterminatedWord));
        assert_eq!(pos, 3);
    }

    #[test]
    fn parse_number_reads_prefix() {
        assert_eq!(parse_number(b"12"), Some(12.0));
        assert_eq!(parse_number(b"-1.5x"), Some(-1.5));
        assert_eq!(parse_number(b"1e"), Some(1.0));
        assert_eq!(parse_number(b"1e+2"), Some(100.0));
        assert_eq!(parse_number(b"-"), None);
        assert_eq!(parse_number(b"e5"), None);
        assert_eq!(parse_number(b""), None);
    }
}
