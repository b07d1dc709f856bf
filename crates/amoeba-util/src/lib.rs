//! Shared foundation types used across the Amoeba workspace: source spans,
//! diagnostic collection, and the small error types that sit at crate
//! boundaries.

mod diagnostic;
mod error;
mod span;

pub use diagnostic::{Diagnostic, Handler};
pub use error::SourceError;
pub use span::Span;
