//! Connection configuration for the Foreman API.
//!
//! Values are layered `file < environment < command line`; see
//! [`ConnectionConfig::merge`] and [`ConnectionConfig::resolve`].

pub mod connection;
pub mod paths;

pub use connection::{Connection, ConnectionConfig};
