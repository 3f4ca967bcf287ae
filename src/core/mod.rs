//! Core types shared across the codebase.

mod kind;
mod link;

pub use kind::ContentKind;
pub use link::LinkKind;
