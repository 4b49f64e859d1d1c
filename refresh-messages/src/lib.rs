//! refresh-messages
//!
//! Centralized messaging for the measure-refresh CLI.
//! Provides the template registry, a message builder, and the `msg!` macro
//! for user-facing output.

pub mod builder;
pub mod macros;
pub mod messages;

pub use messages::{Messages, MESSAGES};
