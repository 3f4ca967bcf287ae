//! `validate` command.

use anyhow::{Context, Result};

use super::report_diagnostics;
use crate::config::VaultConfig;
use crate::log;
use crate::stage::validate_vault;
use crate::utils::plural_count;
use crate::vault::Diagnostics;

/// Resolve every reference in memory and report what would go wrong.
pub fn validate_vault_links(config: &VaultConfig, json: bool) -> Result<()> {
    let diagnostics = Diagnostics::new();
    let checked = validate_vault(config, &diagnostics)?;

    if json {
        let out = serde_json::to_string_pretty(&diagnostics.sorted())
            .context("failed to serialize diagnostics")?;
        println!("{out}");
        return Ok(());
    }

    log!("validate"; "checked {}", plural_count(checked, "document"));
    if diagnostics.is_empty() {
        log!("validate"; "all references resolved");
    }
    report_diagnostics(&diagnostics);
    Ok(())
}
