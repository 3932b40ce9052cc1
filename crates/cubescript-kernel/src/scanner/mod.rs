//! Leaf scanners: words, quoted strings, symbols, and comments.
//!
//! Each scanner is a plain function over a [`Cursor`](crate::Cursor) and a
//! [`CommandStack`](crate::CommandStack). All of them follow the cursor
//! return convention described in [`crate::cursor`]. Multi-line strings
//! recurse into the evaluator and live in [`crate::eval`].

mod comment;
mod string;
mod symbol;
mod word;

pub use comment::skip_comment;
pub use string::scan_string;
pub use symbol::{scan_interpolation_symbol, scan_symbol};
pub use word::scan_word;
