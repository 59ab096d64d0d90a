//! Master password gate — setup, unlock, and the session capability.
//!
//! This module provides:
//! - Master password strength rules (`policy`)
//! - `MasterGate` and the `Session` capability token (`gate`)

pub mod gate;
pub mod policy;

// Re-export the most commonly used items.
pub use gate::{MasterGate, MasterRecord, Session};
pub use policy::validate_master_password;
