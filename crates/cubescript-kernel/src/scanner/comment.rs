use crate::classify::{classify, TokenClass};
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};

/// Skip a `//` line comment.
///
/// Entered on the first `/`. Stops on the byte before the next statement
/// terminator so the caller still sees the terminator. Produces no argument.
pub fn skip_comment(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    let second = cursor.pos() + 1;
    if cursor.byte(second) != Some(b'/') {
        return Err(cursor.fail(second, ParseErrorKind::ExpectedCommentStart));
    }

    let mut i = second + 1;
    while let Some(c) = cursor.byte(i) {
        if classify(c) == TokenClass::StatementTerminator {
            cursor.set_pos(i - 1);
            return Ok(());
        }
        i += 1;
    }

    Err(cursor.fail(cursor.end(), ParseErrorKind::UnterminatedComment))
}
