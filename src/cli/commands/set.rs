//! `passvault set` — store a secret for a service (add or update).

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;
use crate::generator;

/// Execute the `set` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    value: Option<&str>,
    generate: bool,
    length: usize,
) -> Result<()> {
    // Determine the secret value from one of four sources.
    let secret_value = if generate {
        // Source 1: Freshly generated random secret.  Shown once so the
        // user can copy it into the service's password form.
        let generated = generator::generate(length);
        println!("{generated}");
        generated
    } else if let Some(v) = value {
        // Source 2: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 3: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 4: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter secret for {service}"))
            .interact()
            .map_err(|e| {
                crate::errors::PassVaultError::CommandFailed(format!("input prompt: {e}"))
            })?
    };

    // Unlock the vault and store the entry.
    let (session, store) = unlock(cli)?;

    let existed = store.list_names(&session).contains(service);
    store.put(&session, service, &secret_value)?;

    if existed {
        output::success(&format!(
            "Secret for '{}' updated ({} total)",
            service,
            store.len()
        ));
    } else {
        output::success(&format!(
            "Secret for '{}' stored ({} total)",
            service,
            store.len()
        ));
    }

    session.logout();
    Ok(())
}
