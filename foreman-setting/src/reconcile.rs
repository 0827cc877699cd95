//! Converge one setting to its desired value

use tracing::{debug, info, info_span};

use foreman_api::SettingsApi;
use foreman_core::Result;
use foreman_messages::{msg, MESSAGES};

use crate::report::{DiffSide, ReconcileReport, ValueDiff};
use crate::value::{resolve_default, to_wire, SettingValue, SettingsType};

/// What the caller wants the setting to be
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredSetting {
    pub name: String,
    /// `None` resets the setting to its declared default
    pub value: Option<SettingValue>,
}

impl DesiredSetting {
    pub fn new(name: impl Into<String>, value: Option<SettingValue>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Report what would change without writing
    pub check_mode: bool,
    /// Include before/after wire values in the report
    pub diff: bool,
}

/// Look up `desired.name`, update it if its stored value differs, and report
/// the entity with the caller's (typed, unserialized) value.
///
/// At most one update call is made; nothing is written when the wire forms
/// already match or in check mode.
pub fn reconcile<A>(
    api: &A,
    desired: &DesiredSetting,
    options: ReconcileOptions,
) -> Result<ReconcileReport>
where
    A: SettingsApi + ?Sized,
{
    let span = info_span!("reconcile", name = %desired.name);
    let _enter = span.enter();

    let mut entity = api.find_setting(&desired.name)?;
    let tag = entity.settings_type.clone();
    let settings_type = SettingsType::parse(&tag);

    let new_value = match &desired.value {
        Some(value) => value.clone().coerce(&settings_type, &desired.name, &tag)?,
        None => {
            let default = resolve_default(&entity.default);
            info!(
                "{}",
                msg!(
                    MESSAGES.setting.reset_to_default,
                    name = &desired.name,
                    value = default.to_string()
                )
            );
            // An empty default is sent as "" for any type except integer
            if default.is_blank() && settings_type != SettingsType::Integer {
                default
            } else {
                default.coerce(&settings_type, &desired.name, &tag)?
            }
        }
    };

    let desired_wire = to_wire(&new_value.to_json(), &settings_type);
    let current_wire = to_wire(&entity.value, &settings_type);
    let changed = desired_wire != current_wire;

    debug!(
        settings_type = %tag,
        current = %current_wire,
        desired = %desired_wire,
        changed,
        "Compared wire values"
    );

    let diff = options.diff.then(|| ValueDiff {
        before: DiffSide {
            value: current_wire.clone(),
        },
        after: DiffSide {
            value: desired_wire.clone(),
        },
    });

    if changed && !options.check_mode {
        entity = api.update_setting(&entity, &desired_wire)?;
        info!(
            "{}",
            msg!(
                MESSAGES.setting.updated,
                name = &desired.name,
                value = new_value.to_string()
            )
        );
    } else if changed {
        info!(
            "{}",
            msg!(
                MESSAGES.setting.would_update,
                name = &desired.name,
                value = new_value.to_string()
            )
        );
    } else {
        info!(
            "{}",
            msg!(
                MESSAGES.setting.unchanged,
                name = &desired.name,
                value = new_value.to_string()
            )
        );
    }

    entity.value = new_value.to_json();

    Ok(ReconcileReport {
        changed,
        foreman_setting: entity,
        diff,
    })
}
