//! Operator console adapter for depot
//!
//! Pure translation: operator text in, token facade calls, text plus a
//! status out. No domain logic lives here; errors from the facade are
//! rendered as a FAILED status and a message, never a panic.

pub mod commands;
pub mod context;

pub use commands::Console;
pub use context::{CommandContext, CommandStatus};
