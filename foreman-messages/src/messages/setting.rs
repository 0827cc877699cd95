//! Messages describing the outcome of a setting reconcile

pub struct SettingMessages {
    pub diff_after: &'static str,
    pub diff_before: &'static str,
    pub reset_to_default: &'static str,
    pub unchanged: &'static str,
    pub updated: &'static str,
    pub would_update: &'static str,
}

pub const SETTING_MESSAGES: SettingMessages = SettingMessages {
    diff_after: "  + {value}",
    diff_before: "  - {value}",
    reset_to_default: "No value given for '{name}', resetting to default {value}",
    unchanged: "✓ Setting '{name}' already set to {value}",
    updated: "✅ Setting '{name}' updated to {value}",
    would_update: "🔍 Setting '{name}' would change to {value} (check mode)",
};
