// External crates
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

// Internal imports
use foreman_api::ForemanClient;
use foreman_config::{paths::default_config_path, ConnectionConfig};
use foreman_core::Result;
use foreman_setting::{
    reconcile, DesiredSetting, Invocation, ModuleArgs, ReconcileOptions, ReconcileReport,
    SettingValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable result payload
    Json,
    /// Coloured one-line summary
    Human,
}

/// Ensure a Foreman setting has the desired value.
///
/// Looks the setting up by name, coerces the value to the setting's declared
/// type, and writes it only when it differs from what the server stores.
/// Connection parameters fall back to FOREMAN_* environment variables and
/// the config file.
#[derive(Debug, Parser)]
#[command(name = "foreman-setting")]
#[command(about = "Idempotently set a Foreman setting")]
#[command(version)]
pub struct Args {
    /// JSON file holding all parameters (binary module convention)
    #[arg(value_name = "ARGS_FILE", conflicts_with_all = ["name", "value"])]
    pub args_file: Option<PathBuf>,

    /// Name of the setting
    #[arg(short, long, required_unless_present = "args_file")]
    pub name: Option<String>,

    /// Value to set; omit to reset the setting to its default
    #[arg(long)]
    pub value: Option<String>,

    /// Base URL of the Foreman server
    #[arg(long)]
    pub server_url: Option<String>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(short, long)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub no_validate_certs: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Report what would change without writing
    #[arg(long)]
    pub check: bool,

    /// Include the stored value before and after in the result
    #[arg(long)]
    pub diff: bool,

    /// Connection config file (default: ~/.config/foreman/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Flags given next to an args file override or extend what the file says
    fn invocation(&self) -> Result<Invocation> {
        if let Some(path) = &self.args_file {
            let mut invocation = ModuleArgs::load(path)?.into_invocation(path)?;
            invocation.options.check_mode |= self.check;
            invocation.options.diff |= self.diff;
            invocation.connection = invocation.connection.merge(self.connection_flags());
            return Ok(invocation);
        }

        Ok(Invocation {
            desired: DesiredSetting::new(
                self.name.clone().unwrap_or_default(),
                self.value.as_deref().map(SettingValue::from),
            ),
            options: ReconcileOptions {
                check_mode: self.check,
                diff: self.diff,
            },
            connection: self.connection_flags(),
        })
    }

    fn connection_flags(&self) -> ConnectionConfig {
        ConnectionConfig {
            server_url: self.server_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            validate_certs: self.no_validate_certs.then_some(false),
            timeout: self.timeout,
        }
    }
}

/// Run one reconcile; also returns whether check mode was in effect
pub fn execute(args: &Args) -> Result<(ReconcileReport, bool)> {
    let invocation = args.invocation()?;

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let connection = ConnectionConfig::load_optional(&config_path)?
        .merge(ConnectionConfig::from_env()?)
        .merge(invocation.connection)
        .resolve(&config_path)?;
    debug!(?connection, "Resolved connection");

    let client = ForemanClient::new(&connection)?;
    let report = reconcile(&client, &invocation.desired, invocation.options)?;
    Ok((report, invocation.options.check_mode))
}
