//! foreman-messages
//!
//! Centralized user-facing text for the Foreman setting tool.
//! Templates use `{name}` placeholders which are filled in with [`msg!`].

pub mod builder;
pub mod macros;
pub mod messages;

pub use messages::MESSAGES;
