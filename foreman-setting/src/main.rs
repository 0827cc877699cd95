mod cli;

use clap::Parser;
use colored::Colorize;
use serde_json::json;
use tracing::error;

use foreman_core::ForemanError;
use foreman_logging::{init_subscriber, LogSettings};
use foreman_messages::{msg, MESSAGES};
use foreman_setting::FailureReport;

use cli::{Args, OutputFormat};

fn main() {
    let args = Args::parse();
    let _log_guard = init_subscriber(&LogSettings::from_env().with_verbosity(args.verbose));

    match cli::execute(&args) {
        Ok((report, check_mode)) => match args.output {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Human => println!("{}", report.render_human(check_mode)),
        },
        Err(e) => {
            error!(error = %e, local = e.is_local(), "Setting run failed");
            match args.output {
                OutputFormat::Json => print_json(&FailureReport::from(&e)),
                OutputFormat::Human => print_human_failure(&e, &args),
            }
            std::process::exit(1);
        }
    }
}

fn print_human_failure(e: &ForemanError, args: &Args) {
    eprintln!(
        "{}",
        msg!(MESSAGES.common.error_generic, error = e.to_string()).red()
    );

    if e.is_auth_failure() {
        let url = args.server_url.as_deref().unwrap_or("the server");
        eprintln!("{}", msg!(MESSAGES.common.auth_hint, url = url));
    } else if matches!(e, ForemanError::Transport { context, .. } if context.contains("certificate"))
    {
        eprintln!("{}", MESSAGES.common.tls_hint);
    }
}

fn print_json<T: serde::Serialize>(payload: &T) {
    match serde_json::to_string(payload) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            let fallback = json!({ "failed": true, "msg": format!("Failed to serialize result: {e}") });
            println!("{fallback}");
            std::process::exit(1);
        }
    }
}
