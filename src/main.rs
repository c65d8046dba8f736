//! byldr - a first-person brick building sandbox
//!
//! Headless runner: loads config, replays input and command scripts against
//! a session and prints the final status.

mod command_script;
mod commands;
mod config;
mod headless;
mod scripted_input;

use anyhow::Result;
use config::SandboxConfig;
use headless::HeadlessConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting byldr v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config = match cli.config.as_deref() {
        Some(path) => SandboxConfig::load_from_path(path),
        None => SandboxConfig::load(),
    };
    if let Some(path) = cli.save_config.as_deref() {
        config.save_to_path(path)?;
        info!(path = %path.display(), "Wrote effective config");
    }

    let has_script = cli.scripted_input.is_some() || cli.command_script.is_some();
    if cli.exit_when_script_finished && !has_script {
        tracing::warn!("--exit-when-script-finished has no effect without a script");
    }

    let status = headless::run(HeadlessConfig {
        config,
        scripted_input: cli.scripted_input,
        command_script: cli.command_script,
        max_ticks: cli.max_ticks,
        tick_rate: cli.tick_rate,
        event_log: cli.event_log,
        exit_when_script_finished: cli.exit_when_script_finished,
    })?;

    info!(
        bricks = status.brick_count,
        mode = ?status.mode,
        can_undo = status.can_undo,
        can_redo = status.can_redo,
        "Session finished"
    );
    println!("{}", serde_json::to_string(&status)?);
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    save_config: Option<PathBuf>,
    scripted_input: Option<PathBuf>,
    command_script: Option<PathBuf>,
    max_ticks: Option<u64>,
    tick_rate: Option<f32>,
    event_log: Option<PathBuf>,
    exit_when_script_finished: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--save-config" => {
                    if let Some(path) = args.next() {
                        opts.save_config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--save-config requires a file path");
                    }
                }
                "--scripted-input" => {
                    if let Some(path) = args.next() {
                        opts.scripted_input = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scripted-input requires a file path");
                    }
                }
                "--command-script" => {
                    if let Some(path) = args.next() {
                        opts.command_script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--command-script requires a file path");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(
                                    %err,
                                    value = %raw,
                                    "--max-ticks must be an integer"
                                );
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--tick-rate" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<f32>() {
                            Ok(value) if value.is_finite() && value > 0.0 => {
                                opts.tick_rate = Some(value);
                            }
                            Ok(value) => {
                                tracing::error!(value, "--tick-rate must be positive");
                            }
                            Err(err) => {
                                tracing::error!(
                                    %err,
                                    value = %raw,
                                    "--tick-rate must be a number"
                                );
                            }
                        }
                    } else {
                        tracing::error!("--tick-rate requires a number");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--exit-when-script-finished" => opts.exit_when_script_finished = true,
                other => tracing::warn!(arg = other, "Ignoring unknown argument"),
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_known_flags() {
        let opts = parse(&[
            "--command-script",
            "run.json",
            "--max-ticks",
            "120",
            "--tick-rate",
            "30",
            "--exit-when-script-finished",
            "--save-config",
            "out/byldr.toml",
        ]);
        assert_eq!(opts.command_script, Some(PathBuf::from("run.json")));
        assert_eq!(opts.max_ticks, Some(120));
        assert_eq!(opts.tick_rate, Some(30.0));
        assert!(opts.exit_when_script_finished);
        assert!(opts.scripted_input.is_none());
        assert_eq!(opts.save_config, Some(PathBuf::from("out/byldr.toml")));
    }

    #[test]
    fn bad_values_are_dropped() {
        let opts = parse(&["--max-ticks", "lots", "--tick-rate", "-5", "--event-log"]);
        assert_eq!(opts.max_ticks, None);
        assert_eq!(opts.tick_rate, None);
        assert_eq!(opts.event_log, None);
    }
}
