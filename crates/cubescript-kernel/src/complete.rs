//! Input-completeness check for incremental callers.
//!
//! A line-driven host accumulates input and asks [`is_complete_code`]
//! before each evaluation. The check mirrors the evaluator's bookkeeping
//! for parentheses, brackets, quotes and comments without pushing anything
//! or calling the backend.

use crate::classify::{classify, TokenClass};

/// True when `source` holds at least one statement and nothing is left
/// open: no unclosed `(`, `[`, `"` or trailing `//` comment.
///
/// Input that can never become valid, such as a stray `)` or a quoted
/// string broken by a newline, counts as complete so that evaluation gets
/// to report the error.
pub fn is_complete_code(source: &[u8]) -> bool {
    let mut parens = 0usize;
    let mut statement = false;
    let mut i = 0;

    while let Some(&c) = source.get(i) {
        match classify(c) {
            TokenClass::Whitespace | TokenClass::StatementTerminator => {}
            TokenClass::CommentSigil if source.get(i + 1) == Some(&b'/') => {
                match comment_end(source, i + 2) {
                    Some(last) => i = last,
                    None => return false,
                }
            }
            TokenClass::CommentSigil if i + 1 == source.len() => return false,
            TokenClass::QuoteDelimiter => {
                statement = true;
                match string_end(source, i + 1) {
                    Some(last) => i = last,
                    None => return false,
                }
            }
            TokenClass::MultilineOpen => {
                statement = true;
                match bracket_end(source, i + 1) {
                    Some(last) => i = last,
                    None => return false,
                }
            }
            TokenClass::OpenParen => {
                statement = true;
                parens += 1;
            }
            TokenClass::CloseParen => {
                statement = true;
                parens = parens.saturating_sub(1);
            }
            _ => statement = true,
        }
        i += 1;
    }

    statement && parens == 0
}

/// Index of the last byte of a comment whose text starts at `from`.
fn comment_end(source: &[u8], from: usize) -> Option<usize> {
    source[from..]
        .iter()
        .position(|b| classify(*b) == TokenClass::StatementTerminator)
        .map(|n| from + n - 1)
}

/// Index of the last byte consumed by a quoted string whose body starts at
/// `from`: the closing quote, or the byte before a raw line break.
fn string_end(source: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while let Some(&c) = source.get(i) {
        match c {
            b'"' => return Some(i),
            b'\\' | b'^' => i += 1,
            b'\n' | b'\r' => return Some(i - 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the `]` closing a multi-line string whose body starts at `from`.
fn bracket_end(source: &[u8], from: usize) -> Option<usize> {
    let mut nested = 1usize;
    for (n, &c) in source[from..].iter().enumerate() {
        match c {
            b'[' => nested += 1,
            b']' => {
                nested -= 1;
                if nested == 0 {
                    return Some(from + n);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(source: &str) -> bool {
        is_complete_code(source.as_bytes())
    }

    #[test]
    fn terminated_statement_is_complete() {
        assert!(complete("echo hi\n"));
        assert!(complete("echo hi;"));
    }

    #[test]
    fn balanced_statement_at_end_of_buffer_is_complete() {
        assert!(complete("echo hi"));
        assert!(complete("echo (add 1 2)"));
    }

    #[test]
    fn blank_input_is_not_complete() {
        assert!(!complete(""));
        assert!(!complete("   \n;\n"));
        assert!(!complete("// just a note\n"));
    }

    #[test]
    fn open_paren_is_not_complete() {
        assert!(!complete("echo (add 1\n"));
        assert!(!complete("echo ((a)\n"));
        assert!(complete("echo (add 1\n 2)\n"));
    }

    #[test]
    fn open_quote_is_not_complete() {
        assert!(!complete("echo \"abc"));
        assert!(!complete("echo \"abc\\\""));
        assert!(!complete("echo \"abc\\"));
        assert!(complete("echo \"a(b\"\n"));
    }

    #[test]
    fn quote_broken_by_newline_is_left_to_eval() {
        assert!(complete("echo \"abc\n"));
    }

    #[test]
    fn open_bracket_is_not_complete() {
        assert!(!complete("echo [abc\n"));
        assert!(!complete("echo [a [b] c\n"));
        assert!(complete("echo [a [b] c]\n"));
        assert!(complete("echo [a ( b]\n"));
    }

    #[test]
    fn trailing_comment_is_not_complete() {
        assert!(!complete("echo hi // note"));
        assert!(!complete("echo hi /"));
        assert!(complete("echo hi // note (\n"));
    }

    #[test]
    fn stray_close_paren_is_left_to_eval() {
        assert!(complete("echo )\n"));
    }
}
