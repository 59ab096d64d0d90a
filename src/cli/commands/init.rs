//! `passvault init` — first-run master password setup.

use std::fs;

use crate::cli::output;
use crate::cli::{master_gate, prompt_new_password, Cli};
use crate::errors::Result;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let vault_dir = cwd.join(&cli.vault_dir);

    // 1. Create the vault directory if it doesn't exist.
    if !vault_dir.exists() {
        fs::create_dir_all(&vault_dir)?;
        let dir_display = vault_dir.display();
        output::info(&format!("Created vault directory: {dir_display}"));
    }

    // 2. Refuse to overwrite an existing master record.
    let gate = master_gate(cli)?;
    if gate.is_initialized() {
        output::tip("Use `passvault set` to store secrets in the existing vault.");
        return Err(crate::errors::PassVaultError::AlreadyInitialized(
            gate.path().to_path_buf(),
        ));
    }

    // 3. Prompt for a new master password (with confirmation) and set up.
    let password = prompt_new_password()?;
    gate.setup(&password)?;

    output::success(&format!(
        "Vault initialized at {}",
        vault_dir.display()
    ));

    // 4. Show helpful tips.
    output::tip("Run `passvault set <SERVICE>` to store a secret.");
    output::tip("Run `passvault generate` for a random strong password.");

    Ok(())
}
