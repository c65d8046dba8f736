use crate::commands::{parse_command, SandboxCommand};
use anyhow::{Context, Result};
use byldr_core::{BrickCatalog, Palette, SimTick};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct CommandScriptFile {
    steps: Vec<CommandScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommandScriptStepDef {
    tick: u64,
    command: String,
}

#[derive(Debug, Clone)]
struct CommandScriptStep {
    tick: SimTick,
    source: String,
    command: SandboxCommand,
}

/// Deterministic command script runner.
///
/// Scripts are a list of `{tick, command}` steps sorted by tick. Every
/// command is parsed when the script is loaded, so a typo fails the run
/// before the first tick instead of halfway through.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    pending: VecDeque<CommandScriptStep>,
}

impl CommandScriptPlayer {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path, catalog: &BrickCatalog, palette: &Palette) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read command script {}", path.display()))?;
        Self::from_str(&contents, catalog, palette)
            .with_context(|| format!("invalid command script {}", path.display()))
    }

    /// Load a command script from an in-memory JSON string.
    pub fn from_str(contents: &str, catalog: &BrickCatalog, palette: &Palette) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick: Option<u64> = None;
        for (index, step) in file.steps.into_iter().enumerate() {
            let source = step.command.trim().to_string();
            if source.is_empty() {
                anyhow::bail!("command script step {index} is empty");
            }

            if last_tick.is_some_and(|prev| step.tick < prev) {
                anyhow::bail!("command script steps must be sorted by tick");
            }
            last_tick = Some(step.tick);

            let command = parse_command(&source, catalog, palette)
                .with_context(|| format!("step {index} (tick {}): `{source}`", step.tick))?;
            pending.push_back(CommandScriptStep {
                tick: SimTick(step.tick),
                source,
                command,
            });
        }

        Ok(Self { pending })
    }

    /// Drain and return all commands scheduled for ticks `<= tick`, with
    /// their source text.
    pub fn drain_ready_commands(&mut self, tick: SimTick) -> Vec<(String, SandboxCommand)> {
        let mut commands = Vec::new();
        while let Some(step) = self.pending.front() {
            if step.tick > tick {
                break;
            }
            if let Some(step) = self.pending.pop_front() {
                commands.push((step.source, step.command));
            }
        }
        commands
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
