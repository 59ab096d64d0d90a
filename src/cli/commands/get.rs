//! `passvault get` — retrieve and print a single service's secret.

use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, service: &str) -> Result<()> {
    let (session, store) = unlock(cli)?;

    // Decrypt and print the secret value to stdout.
    let value = store.get(&session, service)?;
    println!("{value}");

    session.logout();
    Ok(())
}
