use super::Target;
use crate::output::env_table;
use crate::OutputFormat;
use anyhow::Result;
use provider_switch_core::{FileSettingsStore, ProviderState, StatusReport, SwitchOutcome, Switcher};
use std::path::PathBuf;

pub fn handle(
    target: Target,
    settings_path: PathBuf,
    secrets_path: PathBuf,
    format: OutputFormat,
) -> Result<()> {
    let switcher = Switcher::new(FileSettingsStore::new(settings_path), secrets_path);

    match target {
        Target::Status => status(&switcher, format),
        Target::Toggle => {
            let outcome = switcher.toggle()?;
            if let SwitchOutcome::Switched {
                from: ProviderState::Unknown,
                ..
            } = outcome
            {
                eprintln!("Warning: unrecognized provider configuration, fell back to the default provider");
            }
            report(&switcher, outcome, format)
        }
        Target::Switch(kind) => {
            let outcome = switcher.switch_to(kind)?;
            report(&switcher, outcome, format)
        }
    }
}

fn status(switcher: &Switcher<FileSettingsStore>, format: OutputFormat) -> Result<()> {
    let report = switcher.status()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_status(switcher, &report),
    }
    Ok(())
}

fn report(
    switcher: &Switcher<FileSettingsStore>,
    outcome: SwitchOutcome,
    format: OutputFormat,
) -> Result<()> {
    let path = switcher.store().path();

    if let SwitchOutcome::AlreadyActive(kind) = outcome {
        eprintln!("Warning: already using {}", kind.label());
    }

    if format == OutputFormat::Json {
        let report = switcher.status()?;
        let body = serde_json::json!({
            "switched": matches!(outcome, SwitchOutcome::Switched { .. }),
            "target": outcome.target(),
            "settings": path.display().to_string(),
            "status": report,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if let SwitchOutcome::Switched { to, .. } = outcome {
        println!("✓ Switched to {}", to.label());
        println!("  Updated: {}", path.display());
    }

    println!();
    status(switcher, format)
}

fn print_status(switcher: &Switcher<FileSettingsStore>, report: &StatusReport) {
    println!("Current provider: {}", report.state.label());
    println!("Settings: {}", switcher.store().path().display());

    match report.state {
        ProviderState::Alternate => {
            let none = "(not set)";
            println!("  Endpoint: {}", report.base_url.as_deref().unwrap_or(none));
            if let Some(models) = &report.models {
                println!("  Haiku model: {}", models.haiku.as_deref().unwrap_or(none));
                println!("  Sonnet model: {}", models.sonnet.as_deref().unwrap_or(none));
                println!("  Opus model: {}", models.opus.as_deref().unwrap_or(none));
                println!("  Timeout (ms): {}", models.timeout_ms.as_deref().unwrap_or(none));
            }
        }
        ProviderState::Unknown => {
            println!(
                "  Base URL: {} (matches neither known provider)",
                report.base_url.as_deref().unwrap_or("")
            );
        }
        ProviderState::Default => {}
    }

    println!("\nEnvironment overrides:");
    match &report.env {
        Some(env) if !env.is_empty() => println!("{}", env_table(env)),
        Some(_) => println!("  (env is empty)"),
        None => println!("  (none; using default provider configuration)"),
    }
}
