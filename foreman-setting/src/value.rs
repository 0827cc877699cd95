//! Typed setting values.
//!
//! Callers hand in loosely typed input (a CLI string, any JSON scalar from an
//! argument file). [`SettingValue::coerce`] resolves it against the
//! `settings_type` the server declares, and [`to_wire`] produces the form the
//! server stores, which is what idempotence is decided on.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Number, Value};

use foreman_core::{ForemanError, Result};

/// Declared type of a setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsType {
    Integer,
    Float,
    Boolean,
    String,
    Text,
    Array,
    Hash,
    Other(String),
}

impl SettingsType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "integer" => SettingsType::Integer,
            "float" | "real" => SettingsType::Float,
            "boolean" => SettingsType::Boolean,
            "string" => SettingsType::String,
            "text" => SettingsType::Text,
            "array" => SettingsType::Array,
            "hash" | "yaml" | "json" => SettingsType::Hash,
            other => SettingsType::Other(other.to_string()),
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, SettingsType::Integer | SettingsType::Float)
    }

    fn is_structured(&self) -> bool {
        matches!(self, SettingsType::Array | SettingsType::Hash)
    }
}

/// A desired or reported setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Arrays, hashes and anything else JSON can carry
    Structured(Value),
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => SettingValue::Boolean(b),
            Value::String(s) => SettingValue::String(s),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => SettingValue::Integer(i),
                (None, Some(f)) => SettingValue::Float(f),
                _ => SettingValue::Structured(Value::Number(n)),
            },
            other => SettingValue::Structured(other),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(s) => write!(f, "{s}"),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl SettingValue {
    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::Boolean(b) => Value::Bool(*b),
            SettingValue::Integer(i) => Value::Number((*i).into()),
            SettingValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SettingValue::String(s) => Value::String(s.clone()),
            SettingValue::Structured(v) => v.clone(),
        }
    }

    /// The empty string an empty default resolves to
    pub fn is_blank(&self) -> bool {
        matches!(self, SettingValue::String(s) if s.is_empty())
    }

    /// Resolve this value against the declared type of setting `name`
    pub fn coerce(self, settings_type: &SettingsType, name: &str, tag: &str) -> Result<Self> {
        let coerced = match (settings_type, &self) {
            (SettingsType::Integer, SettingValue::Integer(_)) => Some(self.clone()),
            (SettingsType::Integer, SettingValue::String(s)) => {
                s.trim().parse::<i64>().ok().map(SettingValue::Integer)
            }
            (SettingsType::Integer, SettingValue::Float(f)) => integral(*f).map(SettingValue::Integer),

            (SettingsType::Float, SettingValue::Float(_)) => Some(self.clone()),
            (SettingsType::Float, SettingValue::Integer(i)) => Some(SettingValue::Float(*i as f64)),
            (SettingsType::Float, SettingValue::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(SettingValue::Float),

            (SettingsType::Boolean, SettingValue::Boolean(_)) => Some(self.clone()),
            (SettingsType::Boolean, SettingValue::String(s)) => {
                parse_bool(s).map(SettingValue::Boolean)
            }
            (SettingsType::Boolean, SettingValue::Integer(i @ (0 | 1))) => {
                Some(SettingValue::Boolean(*i == 1))
            }

            (SettingsType::Array, SettingValue::Structured(Value::Array(_)))
            | (SettingsType::Hash, SettingValue::Structured(Value::Object(_))) => {
                Some(self.clone())
            }
            (SettingsType::Array | SettingsType::Hash, SettingValue::String(s)) => {
                serde_json::from_str::<Value>(s)
                    .ok()
                    .filter(|v| match settings_type {
                        SettingsType::Array => v.is_array(),
                        _ => v.is_object(),
                    })
                    .map(SettingValue::Structured)
            }

            (SettingsType::Integer | SettingsType::Float | SettingsType::Boolean, _)
            | (SettingsType::Array | SettingsType::Hash, _) => None,

            _ => Some(self.clone()),
        };

        coerced.ok_or_else(|| ForemanError::TypeCoercion {
            name: name.to_string(),
            value: self.to_string(),
            settings_type: tag.to_string(),
        })
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64)
        .then_some(f as i64)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A declared default that is missing or empty resolves to the empty string.
///
/// `0` and `false` are real defaults and are kept.
pub fn resolve_default(default: &Value) -> SettingValue {
    let empty = match default {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    };

    if empty {
        SettingValue::String(String::new())
    } else {
        SettingValue::from(default.clone())
    }
}

/// Serialize `value` the way the server stores a setting of `settings_type`.
///
/// Numbers become decimal strings, arrays and hashes become JSON text with
/// sorted keys and `", "` / `": "` separators, everything else passes
/// through. An empty string stays empty for every type.
pub fn to_wire(value: &Value, settings_type: &SettingsType) -> Value {
    if settings_type.is_numeric() {
        return match value {
            Value::Number(n) => Value::String(n.to_string()),
            other => other.clone(),
        };
    }

    if settings_type.is_structured() {
        let decoded = match value {
            Value::String(s) if s.is_empty() => return value.clone(),
            Value::String(s) => serde_json::from_str::<Value>(s)
                .ok()
                .filter(|v| v.is_array() || v.is_object()),
            _ => None,
        };
        let structured = decoded.as_ref().unwrap_or(value);
        return Value::String(spaced_json(&sorted(structured)));
    }

    value.clone()
}

/// Compact JSON with a space after each `,` and `:`
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn spaced_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::with_capacity(map.len());
            for key in keys {
                out.insert(key.clone(), sorted(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
