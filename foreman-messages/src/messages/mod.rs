//! Central registry for all user-facing message templates.
//!
//! - `setting` - reconcile outcomes (updated, unchanged, check mode)
//! - `config` - connection configuration problems
//! - `common` - generic failure text and hints
//!
//! ```rust
//! use foreman_messages::MESSAGES;
//!
//! let msg = MESSAGES.setting.unchanged;
//! ```

mod common;
mod config;
mod setting;

pub use common::{CommonMessages, COMMON_MESSAGES};
pub use config::{ConfigMessages, CONFIG_MESSAGES};
pub use setting::{SettingMessages, SETTING_MESSAGES};

pub struct Messages {
    pub setting: SettingMessages,
    pub config: ConfigMessages,
    pub common: CommonMessages,
}

pub const MESSAGES: Messages = Messages {
    setting: SETTING_MESSAGES,
    config: CONFIG_MESSAGES,
    common: COMMON_MESSAGES,
};
