//! Byte classification.
//!
//! Every byte value maps to exactly one [`TokenClass`] through a table built
//! at compile time. Printable ASCII that is not otherwise special is
//! [`TokenClass::OrdinaryChar`]; every other control byte, DEL, and all
//! bytes above 0x7F are [`TokenClass::Error`]. Quoted strings, multi-line
//! strings and comments read their interiors without consulting the table,
//! which is how UTF-8 text survives inside them.

/// Lexical class of a single source byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// May never appear outside strings and comments.
    Error,
    /// Space or tab.
    Whitespace,
    /// Part of a word or symbol.
    OrdinaryChar,
    /// `;` or line feed.
    StatementTerminator,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `$`
    SymbolSigil,
    /// `"`
    QuoteDelimiter,
    /// `[`
    MultilineOpen,
    /// `]`
    MultilineClose,
    /// `/`
    CommentSigil,
}

const fn build_table() -> [TokenClass; 256] {
    let mut table = [TokenClass::Error; 256];

    let mut byte = 0x21;
    while byte < 0x7F {
        table[byte] = TokenClass::OrdinaryChar;
        byte += 1;
    }

    table[b' ' as usize] = TokenClass::Whitespace;
    table[b'\t' as usize] = TokenClass::Whitespace;
    table[b';' as usize] = TokenClass::StatementTerminator;
    table[b'\n' as usize] = TokenClass::StatementTerminator;
    table[b'(' as usize] = TokenClass::OpenParen;
    table[b')' as usize] = TokenClass::CloseParen;
    table[b'$' as usize] = TokenClass::SymbolSigil;
    table[b'"' as usize] = TokenClass::QuoteDelimiter;
    table[b'[' as usize] = TokenClass::MultilineOpen;
    table[b']' as usize] = TokenClass::MultilineClose;
    table[b'/' as usize] = TokenClass::CommentSigil;
    table
}

static TABLE: [TokenClass; 256] = build_table();

/// Classify a single byte.
#[inline]
pub fn classify(byte: u8) -> TokenClass {
    TABLE[byte as usize]
}
