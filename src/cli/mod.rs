//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::{validate_master_password, MasterGate, Session};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// PassVault CLI: local credential vault behind one master password.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local credential vault behind one master password",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .passvault)
    #[arg(long, default_value = ".passvault", global = true)]
    pub vault_dir: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set up the vault with a new master password
    Init,

    /// Store a secret for a service (add or update)
    Set {
        /// Service name (e.g. github)
        service: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
        /// Generate a random secret instead of supplying one
        #[arg(long, conflicts_with = "value")]
        generate: bool,
        /// Length of the generated secret (with --generate)
        #[arg(long, default_value = "12")]
        length: usize,
    },

    /// Retrieve a service's secret
    Get {
        /// Service name
        service: String,
    },

    /// List all stored service names
    List,

    /// Delete a service's entry
    Delete {
        /// Service name
        service: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random strong password (no vault access)
    Generate {
        /// Password length (minimum 8; shorter requests become 12)
        #[arg(long, default_value = "12")]
        length: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (CI/scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PASSVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PASSVAULT_PASSWORD` for scripted/CI usage.  The
/// strength policy is checked here for immediate feedback; `setup`
/// enforces it again regardless of where the password came from.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PASSVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if let Err(e) = validate_master_password(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Build the full path to the master record from the CLI arguments.
pub fn master_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(&cli.vault_dir).join("master.json"))
}

/// Build the full path to the vault record from the CLI arguments.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(&cli.vault_dir).join("vault.json"))
}

/// Build a `MasterGate` over the configured record path, with Argon2
/// parameters from `.passvault.toml` (or defaults).
pub fn master_gate(cli: &Cli) -> Result<MasterGate> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok(MasterGate::with_params(
        master_path(cli)?,
        settings.argon2_params(),
    ))
}

/// Unlock the vault and open the store — the shared preamble of every
/// command that touches entries.
pub fn unlock(cli: &Cli) -> Result<(Session, VaultStore)> {
    let gate = master_gate(cli)?;
    let password = prompt_password()?;
    let session = gate.unlock(&password)?;
    let store = VaultStore::open(vault_path(cli)?)?;
    Ok((session, store))
}
