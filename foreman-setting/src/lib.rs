//! Idempotently set one named setting on a Foreman server.
//!
//! ```no_run
//! use foreman_api::ForemanClient;
//! use foreman_config::ConnectionConfig;
//! use foreman_setting::{reconcile, DesiredSetting, ReconcileOptions};
//!
//! # fn main() -> foreman_core::Result<()> {
//! let connection = ConnectionConfig::from_env()?.resolve("config.yaml".as_ref())?;
//! let client = ForemanClient::new(&connection)?;
//! let desired = DesiredSetting::new("http_proxy", Some("http://localhost:8088".into()));
//! let report = reconcile(&client, &desired, ReconcileOptions::default())?;
//! println!("changed: {}", report.changed);
//! # Ok(())
//! # }
//! ```

pub mod params;
pub mod reconcile;
pub mod report;
pub mod value;

pub use params::{Invocation, ModuleArgs};
pub use reconcile::{reconcile, DesiredSetting, ReconcileOptions};
pub use report::{FailureReport, ReconcileReport};
pub use value::{SettingValue, SettingsType};
