//! Path and link utilities.
//!
//! - [`fs`]: filesystem path normalization (`normalize_path`, `resolve_user_path`)
//! - [`route`]: link strings (`is_external_link`, `split_path_fragment`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, resolve_user_path};
