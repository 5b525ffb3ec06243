use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

/// Workspace load errors, with a source location when one is known.
#[derive(Debug, Clone)]
pub struct LoadError {
    pub message: String,
    pub span: Option<Range<usize>>,
    pub file_id: usize,
    pub severity: Severity,
    pub notes: Vec<String>,
}

impl LoadError {
    pub fn error(message: impl Into<String>, file_id: usize) -> Self {
        LoadError {
            message: message.into(),
            span: None,
            file_id,
            severity: Severity::Error,
            notes: Vec::new(),
        }
    }

    pub fn at(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        LoadError {
            span: Some(span),
            ..LoadError::error(message, file_id)
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.span {
            Some(span) => vec![Label::primary(self.file_id, span.clone())],
            None => Vec::new(),
        };
        Diagnostic::new(self.severity)
            .with_message(&self.message)
            .with_labels(labels)
            .with_notes(self.notes.clone())
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LoadError {}

/// Byte offset of a 1-based line/column position, clamped to the source.
pub(crate) fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
