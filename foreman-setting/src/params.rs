//! Module-style invocation: all parameters in one JSON file.
//!
//! Automation tools that run binary modules pass the path of a JSON object
//! as the only argument. Unknown keys (`_ansible_*` bookkeeping and such)
//! are ignored.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use foreman_config::{connection::parse_bool, ConnectionConfig};
use foreman_core::{ForemanError, Result};
use foreman_messages::{msg, MESSAGES};

use crate::reconcile::{DesiredSetting, ReconcileOptions};
use crate::value::SettingValue;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleArgs {
    #[serde(default)]
    pub name: Option<String>,

    /// Any JSON value; `null` means "reset to default"
    #[serde(default)]
    pub value: Option<Value>,

    #[serde(default)]
    pub server_url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Either a JSON boolean or one of the usual strings
    #[serde(default)]
    pub validate_certs: Option<Value>,

    #[serde(default)]
    pub timeout: Option<u64>,

    #[serde(default, rename = "_ansible_check_mode")]
    pub check_mode: bool,

    #[serde(default, rename = "_ansible_diff")]
    pub diff: bool,
}

/// Everything one run needs, however it was supplied
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub desired: DesiredSetting,
    pub options: ReconcileOptions,
    pub connection: ConnectionConfig,
}

impl ModuleArgs {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| invalid_args_file(path, e))?;
        serde_json::from_str(&contents).map_err(|e| invalid_args_file(path, e))
    }

    pub fn into_invocation(self, path: &Path) -> Result<Invocation> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid_args_file(path, "missing required parameter 'name'"))?;

        let validate_certs = match self.validate_certs {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(b),
            Some(Value::String(s)) => Some(parse_bool(&s, "validate_certs")?),
            Some(other) => Some(parse_bool(&other.to_string(), "validate_certs")?),
        };

        Ok(Invocation {
            desired: DesiredSetting::new(name, self.value.map(SettingValue::from)),
            options: ReconcileOptions {
                check_mode: self.check_mode,
                diff: self.diff,
            },
            connection: ConnectionConfig {
                server_url: self.server_url,
                username: self.username,
                password: self.password,
                validate_certs,
                timeout: self.timeout,
            },
        })
    }
}

fn invalid_args_file(path: &Path, error: impl ToString) -> ForemanError {
    ForemanError::Config(msg!(
        MESSAGES.config.args_file_invalid,
        path = path.display().to_string(),
        error = error.to_string()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_args(dir: &TempDir, body: Value) -> std::path::PathBuf {
        let path = dir.path().join("args.json");
        std::fs::write(&path, body.to_string()).unwrap();
        path
    }

    #[test]
    fn test_full_args_file() {
        let dir = TempDir::new().unwrap();
        let path = write_args(
            &dir,
            json!({
                "name": "foo_int",
                "value": 42,
                "server_url": "https://satellite.example.com",
                "username": "admin",
                "password": "changeme",
                "validate_certs": "no",
                "_ansible_check_mode": true,
                "_ansible_diff": true,
                "_ansible_module_name": "setting"
            }),
        );

        let invocation = ModuleArgs::load(&path)
            .unwrap()
            .into_invocation(&path)
            .unwrap();

        assert_eq!(invocation.desired.name, "foo_int");
        assert_eq!(invocation.desired.value, Some(SettingValue::Integer(42)));
        assert!(invocation.options.check_mode);
        assert!(invocation.options.diff);
        assert_eq!(invocation.connection.validate_certs, Some(false));
        assert_eq!(invocation.connection.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_null_value_means_reset() {
        let dir = TempDir::new().unwrap();
        let path = write_args(&dir, json!({ "name": "http_proxy", "value": null }));

        let invocation = ModuleArgs::load(&path)
            .unwrap()
            .into_invocation(&path)
            .unwrap();

        assert_eq!(invocation.desired.value, None);
        assert_eq!(invocation.options, ReconcileOptions::default());
        assert_eq!(invocation.connection, ConnectionConfig::default());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_args(&dir, json!({ "value": "x" }));

        let err = ModuleArgs::load(&path)
            .unwrap()
            .into_invocation(&path)
            .unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let err = ModuleArgs::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
