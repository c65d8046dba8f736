use crate::command_script::CommandScriptPlayer;
use crate::commands::{execute_command, CommandContext};
use crate::config::SandboxConfig;
use crate::scripted_input::ScriptedInputPlayer;
use anyhow::{Context, Result};
use byldr_input::{InputEvent, InputQueue};
use byldr_testkit::{EventRecord, JsonlSink};
use byldr_world::{SelectionSummary, Session, SessionStatus};
use glam::Vec3;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Ticks to run when nothing else says when to stop.
const DEFAULT_MAX_TICKS: u64 = 600;

pub struct HeadlessConfig {
    pub config: SandboxConfig,
    pub scripted_input: Option<PathBuf>,
    pub command_script: Option<PathBuf>,
    pub max_ticks: Option<u64>,
    /// Overrides `session.tick_rate` from the config file.
    pub tick_rate: Option<f32>,
    pub event_log: Option<PathBuf>,
    pub exit_when_script_finished: bool,
}

/// Session plus the input queue commands feed into.
struct HeadlessRunner {
    session: Session,
    input: InputQueue,
}

impl CommandContext for HeadlessRunner {
    fn player_position(&self) -> Vec3 {
        self.session.player().position()
    }

    fn teleport_player(&mut self, position: Vec3) {
        self.session.teleport(position);
    }

    fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    fn status(&self) -> SessionStatus {
        self.session.status()
    }

    fn selection(&self) -> SelectionSummary {
        self.session.selection().summary()
    }
}

/// Run the sandbox without a window until the scripts finish or the tick
/// budget runs out, returning the final status.
pub fn run(cfg: HeadlessConfig) -> Result<SessionStatus> {
    let tick_rate = cfg
        .tick_rate
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .unwrap_or(cfg.config.session.tick_rate);
    let dt = 1.0 / tick_rate;

    let mut runner = HeadlessRunner {
        session: Session::new(cfg.config.session_settings()),
        input: InputQueue::with_settings(cfg.config.controls),
    };

    let mut scripted = cfg
        .scripted_input
        .as_deref()
        .map(ScriptedInputPlayer::from_path)
        .transpose()
        .context("failed to load scripted input")?;
    let catalog = runner.session.catalog();
    let palette = runner.session.palette();
    let mut script = cfg
        .command_script
        .as_deref()
        .map(|path| CommandScriptPlayer::from_path(path, &catalog, &palette))
        .transpose()?;
    let mut event_log = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let has_script = scripted.is_some() || script.is_some();
    let max_ticks = match cfg.max_ticks {
        Some(limit) => Some(limit),
        None if cfg.exit_when_script_finished && has_script => None,
        None => {
            warn!(
                ticks = DEFAULT_MAX_TICKS,
                "No --max-ticks and nothing to wait for; stopping after default budget"
            );
            Some(DEFAULT_MAX_TICKS)
        }
    };

    info!(tick_rate, ?max_ticks, "Headless run starting");

    loop {
        let tick = runner.session.current_tick();
        if max_ticks.is_some_and(|limit| tick.0 >= limit) {
            break;
        }

        if let Some(player) = scripted.as_mut() {
            for event in player.advance(dt) {
                runner.input.push(event);
            }
        }

        if let Some(player) = script.as_mut() {
            for (source, command) in player.drain_ready_commands(tick) {
                let output = execute_command(&mut runner, command);
                for line in output.lines {
                    info!(tick = tick.0, command = %source, "{line}");
                }
            }
        }

        let frame = runner.input.drain_frame();
        let report = runner.session.tick(dt, &frame);
        if !report.contacts.is_empty() {
            debug!(tick = tick.0, contacts = ?report.contacts, "player contacts");
        }

        if let Some(sink) = event_log.as_mut() {
            for event in &report.events {
                sink.write(&EventRecord {
                    tick: report.tick,
                    kind: event.kind(),
                    payload: event,
                })?;
            }
        }

        if cfg.exit_when_script_finished && scripts_finished(scripted.as_ref(), script.as_ref())
        {
            info!(tick = tick.0, "Scripts finished");
            break;
        }
    }

    if let Some(mut sink) = event_log {
        sink.flush()?;
        info!(lines = sink.lines(), "Event log written");
    }

    Ok(runner.session.status())
}

fn scripts_finished(
    scripted: Option<&ScriptedInputPlayer>,
    script: Option<&CommandScriptPlayer>,
) -> bool {
    if scripted.is_none() && script.is_none() {
        return false;
    }
    scripted.map_or(true, ScriptedInputPlayer::on_last_step)
        && script.map_or(true, CommandScriptPlayer::is_finished)
}
