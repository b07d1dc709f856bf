//! Error type for the rare cases that cross a crate boundary as a
//! structured `Result` rather than an accumulated diagnostic string (the
//! lexer and parser never fail this way; only host I/O at the driver edge
//! does).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read source file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
