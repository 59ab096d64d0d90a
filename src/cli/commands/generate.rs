//! `passvault generate` — print a random strong password.
//!
//! Needs no vault access and no master password.

use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(length: usize) -> Result<()> {
    println!("{}", generator::generate(length));
    Ok(())
}
