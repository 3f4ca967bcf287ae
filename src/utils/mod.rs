//! Shared helpers.

pub mod name;
pub mod path;
mod plural;

pub use name::prettify_folder_name;
pub use plural::{plural_count, plural_s};
