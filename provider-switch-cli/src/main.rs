use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use provider_switch_core::{get_global_settings_path, get_project_settings_path, get_secrets_path};
use std::path::PathBuf;

mod commands;
mod output;

use commands::Target;

#[derive(Parser)]
#[command(name = "switch-provider")]
#[command(author, version, about = "Switch the upstream API provider in Claude settings", long_about = None)]
struct Cli {
    /// default-provider, alternate-provider or status (toggles when omitted)
    target: Option<String>,

    /// Settings document to edit [default: .claude/settings.local.json]
    #[arg(long, env = "SWITCH_PROVIDER_SETTINGS")]
    settings: Option<PathBuf>,

    /// Secrets file holding ANTHROPIC_AUTH_TOKEN [default: .env]
    #[arg(long, env = "SWITCH_PROVIDER_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Edit the user-level ~/.claude/settings.json instead of the project file
    #[arg(short, long)]
    global: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors share exit code 1 with every other failure
            e.print()?;
            std::process::exit(1);
        }
    };

    let Some(target) = Target::parse(cli.target.as_deref()) else {
        eprintln!("{}", Cli::command().render_usage());
        anyhow::bail!(
            "Invalid argument: '{}'. Valid choices: {}",
            cli.target.unwrap_or_default(),
            Target::choices()
        );
    };

    let settings_path = cli.settings.unwrap_or_else(|| {
        if cli.global {
            get_global_settings_path()
        } else {
            get_project_settings_path()
        }
    });
    let secrets_path = cli.env_file.unwrap_or_else(get_secrets_path);
    log::debug!(
        "Using settings {} and secrets {}",
        settings_path.display(),
        secrets_path.display()
    );

    commands::provider::handle(target, settings_path, secrets_path, cli.format)
}
