//! Error model: parse failures, runtime failures, and success.
//!
//! Any scanner failure aborts the whole evaluation. There is no
//! statement-level recovery; the error carries the byte offset where the
//! cursor stopped so the host can point at it.

use thiserror::Error;

/// Why the source could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid character")]
    InvalidCharacter,
    #[error("unterminated word")]
    UnterminatedWord,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("string unterminated at end of line")]
    StringUnterminatedAtEndOfLine,
    #[error("unterminated multi-line string")]
    UnterminatedMultilineString,
    #[error("unterminated symbol")]
    UnterminatedSymbol,
    #[error("unterminated symbol in multi-line string")]
    UnterminatedInterpolationSymbol,
    #[error("expected \"//\"")]
    ExpectedCommentStart,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unexpected ')'")]
    UnexpectedCloseParen,
    #[error("unexpected ';'")]
    UnexpectedSemicolon,
    #[error("unterminated expression")]
    UnterminatedExpression,
    #[error("interpolation not closed before ']'")]
    UnclosedInterpolation,
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ParseErrorKind {
    /// True when more input could still complete the construct.
    ///
    /// A string broken by a raw newline is not in this set: no later input
    /// can repair it. Neither is anything cut off by the `]` bounding a
    /// multi-line interpolation.
    pub fn is_unterminated(&self) -> bool {
        matches!(
            self,
            ParseErrorKind::UnterminatedWord
                | ParseErrorKind::UnterminatedString
                | ParseErrorKind::UnterminatedMultilineString
                | ParseErrorKind::UnterminatedSymbol
                | ParseErrorKind::UnterminatedComment
                | ParseErrorKind::UnterminatedExpression
        )
    }
}

/// Parse failure with the byte offset where scanning stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Coarse outcome category, for hosts that present the two differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Runtime,
}

/// Errors that end an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Malformed source.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// The backend reported a failed call.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Parse(_) => ErrorKind::Parse,
            EvalError::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// The message without the category prefix.
    pub fn message(&self) -> String {
        match self {
            EvalError::Parse(err) => err.kind.to_string(),
            EvalError::Runtime(message) => message.clone(),
        }
    }

    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            EvalError::Parse(err) => Some(err),
            EvalError::Runtime(_) => None,
        }
    }

    /// Keep parse offsets within a source of `len` bytes.
    pub(crate) fn clamped(self, len: usize) -> Self {
        match self {
            EvalError::Parse(err) => {
                EvalError::Parse(ParseError::new(err.kind, err.offset.min(len)))
            }
            runtime => runtime,
        }
    }
}

/// Result type for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;
