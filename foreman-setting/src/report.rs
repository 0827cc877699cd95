//! Result payloads written to stdout

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use foreman_api::Setting;
use foreman_core::ForemanError;
use foreman_messages::{msg, MESSAGES};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffSide {
    pub value: Value,
}

/// Stored value before and after, in wire form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDiff {
    pub before: DiffSide,
    pub after: DiffSide,
}

/// Successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub changed: bool,
    /// Final entity; `value` holds the caller's typed value
    pub foreman_setting: Setting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<ValueDiff>,
}

impl ReconcileReport {
    /// Short coloured summary for terminals
    pub fn render_human(&self, check_mode: bool) -> String {
        let name = &self.foreman_setting.name;
        let value = display_value(&self.foreman_setting.value);

        let template = match (self.changed, check_mode) {
            (true, false) => MESSAGES.setting.updated,
            (true, true) => MESSAGES.setting.would_update,
            (false, _) => MESSAGES.setting.unchanged,
        };
        let headline = msg!(template, name = name.as_str(), value = value);

        let mut out = if self.changed {
            headline.yellow().to_string()
        } else {
            headline.green().to_string()
        };

        if let Some(diff) = &self.diff {
            let before = msg!(
                MESSAGES.setting.diff_before,
                value = display_value(&diff.before.value)
            );
            let after = msg!(
                MESSAGES.setting.diff_after,
                value = display_value(&diff.after.value)
            );
            out.push_str(&format!("\n{}\n{}", before.red(), after.green()));
        }

        out
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Failed run, in the shape automation tooling expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub failed: bool,
    pub msg: String,
}

impl From<&ForemanError> for FailureReport {
    fn from(err: &ForemanError) -> Self {
        Self {
            failed: true,
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(changed: bool, diff: Option<ValueDiff>) -> ReconcileReport {
        ReconcileReport {
            changed,
            foreman_setting: serde_json::from_value(json!({
                "id": 3,
                "name": "foo_int",
                "settings_type": "integer",
                "value": 42,
                "default": 5
            }))
            .unwrap(),
            diff,
        }
    }

    #[test]
    fn test_report_json_shape() {
        let value = serde_json::to_value(report(true, None)).unwrap();
        assert_eq!(value["changed"], json!(true));
        assert_eq!(value["foreman_setting"]["value"], json!(42));
        assert!(value.get("diff").is_none());
    }

    #[test]
    fn test_report_json_with_diff() {
        let diff = ValueDiff {
            before: DiffSide { value: json!("5") },
            after: DiffSide { value: json!("42") },
        };
        let value = serde_json::to_value(report(true, Some(diff))).unwrap();
        assert_eq!(value["diff"]["before"]["value"], json!("5"));
        assert_eq!(value["diff"]["after"]["value"], json!("42"));
    }

    #[test]
    fn test_render_human_mentions_name_and_value() {
        colored::control::set_override(false);
        let text = report(false, None).render_human(false);
        assert_eq!(text, "✓ Setting 'foo_int' already set to 42");

        let diff = ValueDiff {
            before: DiffSide { value: json!("5") },
            after: DiffSide { value: json!("42") },
        };
        let text = report(true, Some(diff)).render_human(true);
        assert!(text.contains("would change to 42"));
        assert!(text.contains("  - 5"));
        assert!(text.contains("  + 42"));
    }

    #[test]
    fn test_failure_report_from_error() {
        let err = ForemanError::Config("no server".to_string());
        let failure = FailureReport::from(&err);
        assert_eq!(
            serde_json::to_value(failure).unwrap(),
            json!({ "failed": true, "msg": "Configuration error: no server" })
        );
    }
}
