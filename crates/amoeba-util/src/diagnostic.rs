//! Diagnostic collection.
//!
//! Parse-time problems are plain strings by contract (spec.md §4.D, §7):
//! callers read them back with [`Handler::messages`]. This is deliberately
//! much smaller than a full compiler's diagnostic stack (no severity
//! levels, no error codes, no source snippets) because Amoeba only ever
//! needs a flat list a REPL can print.

use crate::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span }
    }
}

/// Accumulates diagnostics produced while lexing or parsing a single
/// program. Shared by reference within one parse; never reused across
/// parses.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::new(message, span));
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The flat message list `Parser::errors()` exposes to callers.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }
}
