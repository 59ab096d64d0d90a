//! `passvault delete` — remove a service's entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, service: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry for '{service}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (session, store) = unlock(cli)?;

    store.remove(&session, service)?;
    output::success(&format!("Deleted entry for '{service}'"));

    session.logout();
    Ok(())
}
