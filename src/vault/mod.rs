//! Vault model: sanitized paths, the file index, reference resolution and
//! markdown rewriting.
//!
//! - [`sanitize`]: filesystem-safe path segments
//! - [`index`]: vault-wide filename and path lookup
//! - [`resolve`]: `![[...]]` resolution policy
//! - [`relative`]: document-relative link paths
//! - [`rewrite`]: the five-phase content pipeline
//! - [`diagnostic`]: structured warnings collected during a run

pub mod diagnostic;
pub mod index;
pub mod relative;
pub mod resolve;
pub mod rewrite;
pub mod sanitize;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use index::FileIndex;
pub use rewrite::Rewriter;
pub use sanitize::SanitizedPath;
