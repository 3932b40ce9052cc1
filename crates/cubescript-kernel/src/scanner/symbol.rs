use crate::classify::{classify, TokenClass};
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::stack::{Argument, CommandStack};

/// Scan a bare or `$`-prefixed name and push it as `Symbol`.
///
/// The sigil is consumed but not part of the name. Resolution, including
/// any dotted paths, is the backend's business.
pub fn scan_symbol<S: CommandStack + ?Sized>(
    cursor: &mut Cursor<'_>,
    stack: &mut S,
) -> Result<(), ParseError> {
    if cursor.current() == Some(b'$') {
        cursor.advance();
    }
    let start = cursor.pos();

    let mut i = start;
    while let Some(c) = cursor.byte(i) {
        match classify(c) {
            TokenClass::OrdinaryChar => i += 1,
            TokenClass::Error => return Err(cursor.fail(i, ParseErrorKind::InvalidCharacter)),
            _ if i == start => return Err(cursor.fail(i, ParseErrorKind::InvalidCharacter)),
            _ => return push_symbol(cursor, start, i, stack),
        }
    }

    Err(cursor.fail(cursor.end(), ParseErrorKind::UnterminatedSymbol))
}

/// Scan the name after an `@` run inside a multi-line string.
///
/// The cursor is bounded by the string's closing `]`, so reaching the bound
/// ends the name normally. An empty name cannot be resolved and fails.
pub fn scan_interpolation_symbol<S: CommandStack + ?Sized>(
    cursor: &mut Cursor<'_>,
    stack: &mut S,
) -> Result<(), ParseError> {
    let start = cursor.pos();

    let mut i = start;
    loop {
        match cursor.byte(i).map(classify) {
            Some(TokenClass::OrdinaryChar) => i += 1,
            Some(TokenClass::Error) => {
                return Err(cursor.fail(i, ParseErrorKind::InvalidCharacter));
            }
            _ if i == start => {
                return Err(cursor.fail(i, ParseErrorKind::UnterminatedInterpolationSymbol));
            }
            _ => return push_symbol(cursor, start, i, stack),
        }
    }
}

/// Push `start..end` as a symbol and leave the cursor on its last byte.
fn push_symbol<S: CommandStack + ?Sized>(
    cursor: &mut Cursor<'_>,
    start: usize,
    end: usize,
    stack: &mut S,
) -> Result<(), ParseError> {
    // Ordinary bytes are printable ASCII, so this only fails on a broken table.
    let name = std::str::from_utf8(cursor.slice(start, end))
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidCharacter, start))?;
    stack.push_argument(Argument::Symbol(name));
    cursor.set_pos(end - 1);
    Ok(())
}
