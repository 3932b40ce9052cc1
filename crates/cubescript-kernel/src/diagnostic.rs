//! Positional diagnostics for parse errors.

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};

use crate::error::ParseError;

/// 1-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl ParseError {
    /// Line and column of the error within `source`.
    pub fn location(&self, source: &[u8]) -> Location {
        let offset = self.offset.min(source.len());
        let before = &source[..offset];
        let line = before.iter().filter(|b| **b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |nl| nl + 1);
        Location {
            line,
            column: offset - line_start + 1,
        }
    }

    /// Render a plain-text report that points at the offending byte.
    pub fn report(&self, source: &str) -> String {
        let start = self.offset.min(source.len());
        let end = (start + 1).min(source.len());

        let mut out = Vec::new();
        let written = Report::build(ReportKind::Error, start..end)
            .with_config(
                Config::default()
                    .with_color(false)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(self.kind.to_string())
            .with_label(Label::new(start..end).with_message(self.kind.to_string()))
            .finish()
            .write(Source::from(source), &mut out);

        match written {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(err) => {
                tracing::warn!("diagnostic rendering failed: {}", err);
                format!("error: {} at {}", self.kind, self.location(source.as_bytes()))
            }
        }
    }
}
