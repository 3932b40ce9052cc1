//! The recursive-descent evaluator.
//!
//! There is no AST. The evaluator walks the source once, pushing arguments
//! and triggering calls on the [`CommandStack`] as it goes. A statement is a
//! call: its first argument names the command and is always scanned as a
//! symbol, whatever it looks like. Parenthesized arguments recurse, and so
//! do `@(...)` interpolations inside multi-line strings.
//!
//! # Stack discipline
//!
//! Each call opens a [`Frame`](crate::Frame) and closes it exactly once
//! before returning: with [`CommandStack::call`] on success, or with
//! [`CommandStack::discard`] when a parse error unwinds through it. A
//! failed call's result is popped too, so an error never leaves anything
//! from the failing statement behind.

use crate::classify::{classify, TokenClass};
use crate::config::EvalConfig;
use crate::cursor::Cursor;
use crate::error::{EvalError, EvalResult, ParseError, ParseErrorKind};
use crate::scanner;
use crate::stack::{Argument, CommandStack};

/// Drives a [`CommandStack`] from source text.
pub struct Evaluator<'s, S: CommandStack + ?Sized> {
    stack: &'s mut S,
    config: EvalConfig,
    depth: usize,
}

impl<'s, S: CommandStack + ?Sized> Evaluator<'s, S> {
    pub fn new(stack: &'s mut S) -> Self {
        Self::with_config(stack, EvalConfig::default())
    }

    pub fn with_config(stack: &'s mut S, config: EvalConfig) -> Self {
        Self {
            stack,
            config,
            depth: 0,
        }
    }

    /// Evaluate every statement from `*pos` to the end of `source`.
    ///
    /// Blank statements and comment-only lines are skipped. The end of the
    /// buffer closes the last statement as a newline would. Each statement's
    /// result is dropped before the next one starts, so on success exactly
    /// one value is left on the stack: the last statement's result, or `Nil`
    /// if there was no statement at all. On error nothing is left.
    pub fn eval(&mut self, source: &[u8], pos: &mut usize) -> EvalResult<()> {
        let mut terminated;
        let buf = match source.last() {
            Some(&last) if classify(last) != TokenClass::StatementTerminator => {
                terminated = Vec::with_capacity(source.len() + 1);
                terminated.extend_from_slice(source);
                terminated.push(b'\n');
                terminated.as_slice()
            }
            _ => source,
        };
        let implied_newline = buf.len() > source.len();

        let mut cursor = Cursor::at(buf, *pos);
        let result = self.statements(&mut cursor);
        *pos = cursor.pos().min(source.len());

        result.map_err(|err| {
            let err = match err {
                // A quote still open at the implied newline ran off the real input.
                EvalError::Parse(parse)
                    if implied_newline
                        && parse.kind == ParseErrorKind::StringUnterminatedAtEndOfLine
                        && parse.offset == source.len() =>
                {
                    ParseError::new(ParseErrorKind::UnterminatedString, parse.offset).into()
                }
                other => other.clamped(source.len()),
            };
            tracing::debug!(offset = *pos, "evaluation failed: {}", err);
            err
        })
    }

    fn statements(&mut self, cursor: &mut Cursor<'_>) -> EvalResult<()> {
        let mut produced = false;

        while let Some(c) = cursor.current() {
            match classify(c) {
                TokenClass::Whitespace | TokenClass::StatementTerminator => {}
                TokenClass::CommentSigil => {
                    if let Err(err) = scanner::skip_comment(cursor) {
                        if produced {
                            self.stack.pop();
                        }
                        return Err(err.into());
                    }
                }
                _ => {
                    if produced {
                        self.stack.pop();
                    }
                    tracing::trace!(offset = cursor.pos(), "statement");
                    self.expression(cursor)?;
                    produced = true;
                }
            }
            cursor.advance();
        }

        if !produced {
            self.stack.push_argument(Argument::Nil);
        }
        Ok(())
    }

    /// Evaluate one call: a root statement, or a sub-expression when the
    /// cursor is on `(`.
    ///
    /// A root statement ends at `;` or a newline. A sub-expression ends only
    /// at its matching `)`; newlines inside it are skipped and a bare `;` is
    /// an error. On success the cursor is left on the terminator and the
    /// call's single result is on top of the stack.
    pub fn expression(&mut self, cursor: &mut Cursor<'_>) -> EvalResult<()> {
        if self.depth >= self.config.max_depth {
            let limit = self.config.max_depth;
            return Err(cursor
                .fail(cursor.pos(), ParseErrorKind::NestingTooDeep { limit })
                .into());
        }

        self.depth += 1;
        let result = self.call(cursor);
        self.depth -= 1;
        result
    }

    fn call(&mut self, cursor: &mut Cursor<'_>) -> EvalResult<()> {
        let subexpression = cursor.current() == Some(b'(');
        let frame = self.stack.push_command();
        tracing::trace!(
            depth = self.depth,
            offset = cursor.pos(),
            frame = frame.index(),
            "open frame"
        );

        if let Err(err) = self.arguments(cursor, subexpression) {
            self.stack.discard(frame);
            return Err(err);
        }

        if let Err(message) = self.stack.call(frame) {
            self.stack.pop();
            return Err(EvalError::Runtime(message));
        }
        Ok(())
    }

    fn arguments(&mut self, cursor: &mut Cursor<'_>, subexpression: bool) -> EvalResult<()> {
        let mut i = if subexpression {
            cursor.pos() + 1
        } else {
            cursor.pos()
        };
        let mut first = true;

        while let Some(c) = cursor.byte(i) {
            cursor.set_pos(i);
            let pushed = match classify(c) {
                TokenClass::Whitespace => false,
                TokenClass::CloseParen if subexpression => return Ok(()),
                TokenClass::CloseParen => {
                    return Err(cursor.fail(i, ParseErrorKind::UnexpectedCloseParen).into());
                }
                TokenClass::StatementTerminator if !subexpression => return Ok(()),
                TokenClass::StatementTerminator if c == b';' => {
                    return Err(cursor.fail(i, ParseErrorKind::UnexpectedSemicolon).into());
                }
                TokenClass::StatementTerminator => false,
                TokenClass::CommentSigil => {
                    scanner::skip_comment(cursor)?;
                    false
                }
                TokenClass::OpenParen => {
                    self.expression(cursor)?;
                    true
                }
                TokenClass::SymbolSigil => {
                    scanner::scan_symbol(cursor, &mut *self.stack)?;
                    true
                }
                TokenClass::QuoteDelimiter => {
                    scanner::scan_string(cursor, &mut *self.stack)?;
                    true
                }
                TokenClass::MultilineOpen => {
                    self.multiline(cursor)?;
                    true
                }
                TokenClass::OrdinaryChar if first => {
                    scanner::scan_symbol(cursor, &mut *self.stack)?;
                    true
                }
                TokenClass::OrdinaryChar => {
                    scanner::scan_word(cursor, &mut *self.stack)?;
                    true
                }
                TokenClass::Error | TokenClass::MultilineClose => {
                    return Err(cursor.fail(i, ParseErrorKind::InvalidCharacter).into());
                }
            };
            first &= !pushed;
            i = cursor.pos() + 1;
        }

        Err(cursor
            .fail(cursor.end(), ParseErrorKind::UnterminatedExpression)
            .into())
    }

    /// Scan a `[...]` string and push it as `String`, splicing in any
    /// interpolations.
    ///
    /// Brackets nest: the string ends at the `]` that brings the depth back
    /// to zero. A run of `@` counts as an interpolation only when it is at
    /// least as long as the current depth, so `[a [b @x]]` keeps `@x` as
    /// text (for whoever evaluates the inner block later) while
    /// `[a [b @@x]]` splices `x` in now.
    pub fn multiline(&mut self, cursor: &mut Cursor<'_>) -> EvalResult<()> {
        debug_assert_eq!(cursor.current(), Some(b'['));
        let start = cursor.pos() + 1;
        cursor.set_pos(start);

        let mut markers = Vec::new();
        let mut nested = 1usize;
        let mut i = start;
        while let Some(c) = cursor.byte(i) {
            match c {
                b'[' => nested += 1,
                b']' => {
                    nested -= 1;
                    if nested == 0 {
                        if markers.is_empty() {
                            self.stack
                                .push_argument(Argument::String(cursor.slice(start, i)));
                        } else {
                            let text = self.interpolate(cursor, start, i, &markers)?;
                            self.stack.push_argument(Argument::String(&text));
                        }
                        cursor.set_pos(i);
                        return Ok(());
                    }
                }
                b'@' => {
                    let run = cursor.run_length(i, b'@');
                    if run >= nested {
                        markers.push(i);
                    }
                    i += run - 1;
                }
                _ => {}
            }
            i += 1;
        }

        Err(cursor
            .fail(cursor.end(), ParseErrorKind::UnterminatedMultilineString)
            .into())
    }

    /// Build the text of a multi-line string whose body is `start..close`.
    ///
    /// Each marker's `@` run is skipped; a following `(` is evaluated as a
    /// call, anything else as a bare name. Either way the value is popped,
    /// stringified and spliced in. Markers inside a span an earlier `@(...)`
    /// already consumed are skipped. A construct left open at the closing
    /// `]` fails as [`ParseErrorKind::UnclosedInterpolation`], since no
    /// further input can close it.
    fn interpolate(
        &mut self,
        cursor: &mut Cursor<'_>,
        start: usize,
        close: usize,
        markers: &[usize],
    ) -> EvalResult<Vec<u8>> {
        let mut text = Vec::with_capacity(close - start);
        let mut literal_from = start;

        for &marker in markers {
            if marker < literal_from {
                continue;
            }
            text.extend_from_slice(cursor.slice(literal_from, marker));

            let mut inner = cursor.bounded(close);
            inner.set_pos(marker + inner.run_length(marker, b'@'));
            let spliced = if inner.current() == Some(b'(') {
                self.expression(&mut inner)
            } else {
                scanner::scan_interpolation_symbol(&mut inner, &mut *self.stack)
                    .map_err(EvalError::from)
            };
            if let Err(err) = spliced {
                cursor.set_pos(inner.pos());
                return Err(match err {
                    EvalError::Parse(parse) if parse.kind.is_unterminated() => {
                        ParseError::new(ParseErrorKind::UnclosedInterpolation, parse.offset).into()
                    }
                    other => other,
                });
            }

            text.extend_from_slice(self.stack.pop_string().as_bytes());
            literal_from = inner.pos() + 1;
        }

        text.extend_from_slice(cursor.slice(literal_from, close));
        Ok(text)
    }
}
