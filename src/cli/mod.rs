//! Command-line interface module.

mod args;
pub mod build;
pub mod manifest;
pub mod validate;

pub use args::{Cli, Commands, StageArgs};

use crate::log;
use crate::utils::plural_count;
use crate::vault::Diagnostics;

/// Print collected diagnostics and a one-line summary.
///
/// Warnings never fail a command.
fn report_diagnostics(diagnostics: &Diagnostics) {
    diagnostics.print();
    let warnings = diagnostics.warning_count();
    if warnings > 0 {
        log!("warning"; "{}", plural_count(warnings, "warning"));
    }
}
