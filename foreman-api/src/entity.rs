use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings are addressed by a numeric id on older servers and by name on
/// newer ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingId {
    Number(u64),
    Name(String),
}

impl fmt::Display for SettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingId::Number(id) => write!(f, "{id}"),
            SettingId::Name(name) => write!(f, "{name}"),
        }
    }
}

/// A setting as returned by `GET /api/settings/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SettingId>,

    pub name: String,

    /// Current value in the server's serialization
    #[serde(default)]
    pub value: Value,

    #[serde(default)]
    pub default: Value,

    #[serde(default = "default_settings_type")]
    pub settings_type: String,

    /// Everything else the server sends (description, category, ...)
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

fn default_settings_type() -> String {
    "string".to_string()
}

impl Setting {
    /// Path segment used to address this setting in the API
    pub fn resource_id(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }
}
