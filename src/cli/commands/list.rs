//! `passvault list` — display all stored service names.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (session, store) = unlock(cli)?;

    let services = store.list_names(&session);

    output::info(&format!("{} service(s) stored", services.len()));
    output::print_services_table(&services);

    session.logout();
    Ok(())
}
