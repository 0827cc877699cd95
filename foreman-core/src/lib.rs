//! Shared foundation for the Foreman setting tool.
//!
//! Every crate in the workspace reports failures through [`error::ForemanError`]
//! so the binary has a single place to turn them into a failure payload.

pub mod error;

pub use error::{ForemanError, Result};
