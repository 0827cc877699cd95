//! Access to the Foreman settings resource.
//!
//! [`SettingsApi`] is the seam the reconciler works against; [`ForemanClient`]
//! is the HTTP implementation of it.

pub mod client;
pub mod entity;

pub use client::ForemanClient;
pub use entity::{Setting, SettingId};

use foreman_core::Result;
use serde_json::Value;

/// Lookup and update of settings on a Foreman server
pub trait SettingsApi {
    /// Fetch the full entity for the setting called `name`.
    ///
    /// Fails with `NotFound` when nothing matches and `Ambiguous` when the
    /// search is not unique.
    fn find_setting(&self, name: &str) -> Result<Setting>;

    /// Store `value` (already in wire form) and return the updated entity
    fn update_setting(&self, setting: &Setting, value: &Value) -> Result<Setting>;
}
