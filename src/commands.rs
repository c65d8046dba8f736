use std::fmt;

use byldr_core::{BrickCatalog, CatalogError, Mode, Palette};
use byldr_input::InputEvent;
use byldr_world::{SelectionSummary, SessionStatus};
use glam::Vec3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<CatalogError> for CommandError {
    fn from(err: CatalogError) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordArg {
    Absolute(f32),
    Relative(f32),
}

impl CoordArg {
    pub fn resolve(self, base: f32) -> f32 {
        match self {
            Self::Absolute(v) => v,
            Self::Relative(delta) => base + delta,
        }
    }
}

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxCommand {
    Help,
    Status,
    Undo,
    Redo,
    Mode(Mode),
    Brick(usize),
    Color(usize),
    Rotate,
    Action,
    Jump,
    Look { yaw: f32, pitch: f32 },
    Tp { x: CoordArg, y: CoordArg, z: CoordArg },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

/// What a command may touch. Everything except teleport goes through the
/// input queue so it is applied by the next tick like UI input.
pub trait CommandContext {
    fn player_position(&self) -> Vec3;
    fn teleport_player(&mut self, position: Vec3);
    fn push_input(&mut self, event: InputEvent);
    fn status(&self) -> SessionStatus;
    fn selection(&self) -> SelectionSummary;
}

pub fn execute_command(ctx: &mut impl CommandContext, cmd: SandboxCommand) -> CommandOutput {
    let mut out = CommandOutput::default();
    match cmd {
        SandboxCommand::Help => out.lines.extend(help_lines()),
        SandboxCommand::Status => {
            let status = ctx.status();
            out.lines.push(format!(
                "{} bricks, mode {:?}, undo {}, redo {}",
                status.brick_count,
                status.mode,
                if status.can_undo { "on" } else { "off" },
                if status.can_redo { "on" } else { "off" },
            ));
            let selection = ctx.selection();
            out.lines.push(format!(
                "Brick {}, colour {}, rotation {}°",
                selection.brick_type, selection.color, selection.rotation
            ));
        }
        SandboxCommand::Undo => {
            ctx.push_input(InputEvent::Undo);
            out.lines.push("Undo queued".to_string());
        }
        SandboxCommand::Redo => {
            ctx.push_input(InputEvent::Redo);
            out.lines.push("Redo queued".to_string());
        }
        SandboxCommand::Mode(mode) => {
            ctx.push_input(InputEvent::SetMode { mode });
            out.lines.push(format!("Mode set to {mode:?}"));
        }
        SandboxCommand::Brick(index) => {
            ctx.push_input(InputEvent::SelectBrick { index });
            out.lines.push(format!("Brick #{index} selected"));
        }
        SandboxCommand::Color(index) => {
            ctx.push_input(InputEvent::SelectColor { index });
            out.lines.push(format!("Colour #{index} selected"));
        }
        SandboxCommand::Rotate => {
            ctx.push_input(InputEvent::ToggleRotation);
            out.lines.push("Rotation toggled".to_string());
        }
        SandboxCommand::Action => {
            ctx.push_input(InputEvent::Action);
            out.lines.push("Action queued".to_string());
        }
        SandboxCommand::Jump => {
            ctx.push_input(InputEvent::Jump);
            out.lines.push("Jump queued".to_string());
        }
        SandboxCommand::Look { yaw, pitch } => {
            ctx.push_input(InputEvent::Look { yaw, pitch });
            out.lines.push(format!("Look by {yaw:.2} {pitch:.2}"));
        }
        SandboxCommand::Tp { x, y, z } => {
            let base = ctx.player_position();
            let target = Vec3::new(x.resolve(base.x), y.resolve(base.y), z.resolve(base.z));
            ctx.teleport_player(target);
            out.lines.push(format!(
                "Teleported to {:.2} {:.2} {:.2}",
                target.x, target.y, target.z
            ));
        }
    }
    out
}

pub fn parse_command(
    input: &str,
    catalog: &BrickCatalog,
    palette: &Palette,
) -> Result<SandboxCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input).trim();
    if input.is_empty() {
        return Ok(SandboxCommand::Help);
    }

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let no_args = |command: SandboxCommand| {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(CommandError::new(format!("/{cmd} takes no arguments")))
        }
    };

    match cmd.as_str() {
        "help" | "?" => no_args(SandboxCommand::Help),
        "status" => no_args(SandboxCommand::Status),
        "undo" => no_args(SandboxCommand::Undo),
        "redo" => no_args(SandboxCommand::Redo),
        "rotate" => no_args(SandboxCommand::Rotate),
        "action" | "place" => no_args(SandboxCommand::Action),
        "jump" => no_args(SandboxCommand::Jump),
        "mode" => match args.as_slice() {
            [mode] => Ok(SandboxCommand::Mode(Mode::parse(mode)?)),
            _ => Err(CommandError::new("Usage: /mode <build|erase>")),
        },
        "brick" => match args.as_slice() {
            [token] => parse_brick(token, catalog).map(SandboxCommand::Brick),
            _ => Err(CommandError::new("Usage: /brick <id|index>")),
        },
        "color" | "colour" => match args.as_slice() {
            [token] => parse_color(token, palette).map(SandboxCommand::Color),
            _ => Err(CommandError::new("Usage: /color <name|index>")),
        },
        "look" => match args.as_slice() {
            [yaw, pitch] => Ok(SandboxCommand::Look {
                yaw: parse_angle(yaw)?,
                pitch: parse_angle(pitch)?,
            }),
            _ => Err(CommandError::new("Usage: /look <yaw> <pitch>")),
        },
        "tp" | "teleport" => match args.as_slice() {
            [x, y, z] => Ok(SandboxCommand::Tp {
                x: parse_coord(x)?,
                y: parse_coord(y)?,
                z: parse_coord(z)?,
            }),
            _ => Err(CommandError::new("Usage: /tp <x> <y> <z>")),
        },
        _ => Err(CommandError::new(format!(
            "Unknown command: {cmd}. Try /help"
        ))),
    }
}

fn parse_brick(token: &str, catalog: &BrickCatalog) -> Result<usize, CommandError> {
    match token.parse::<usize>() {
        Ok(index) if index < catalog.len() => Ok(index),
        Ok(index) => Err(CommandError::new(format!(
            "Brick index {index} out of range (0..{})",
            catalog.len()
        ))),
        Err(_) => Ok(catalog.index_of(token)?),
    }
}

fn parse_color(token: &str, palette: &Palette) -> Result<usize, CommandError> {
    match token.parse::<usize>() {
        Ok(index) if index < palette.len() => Ok(index),
        Ok(index) => Err(CommandError::new(format!(
            "Colour index {index} out of range (0..{})",
            palette.len()
        ))),
        Err(_) => Ok(palette.index_of(token)?),
    }
}

fn parse_angle(s: &str) -> Result<f32, CommandError> {
    s.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::new(format!("Invalid angle: {s}")))
}

fn parse_coord(s: &str) -> Result<CoordArg, CommandError> {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix('~') {
        if rest.is_empty() {
            return Ok(CoordArg::Relative(0.0));
        }
        let delta = rest
            .parse::<f32>()
            .map_err(|_| CommandError::new(format!("Invalid relative coordinate: {s}")))?;
        return Ok(CoordArg::Relative(delta));
    }
    let value = s
        .parse::<f32>()
        .map_err(|_| CommandError::new(format!("Invalid coordinate: {s}")))?;
    Ok(CoordArg::Absolute(value))
}

fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  /help".to_string(),
        "  /status".to_string(),
        "  /undo, /redo".to_string(),
        "  /mode <build|erase>".to_string(),
        "  /brick <id|index>          id = b11 | b21 | b41 | b22 | b24 | p11 | p12".to_string(),
        "  /color <name|index>".to_string(),
        "  /rotate".to_string(),
        "  /action".to_string(),
        "  /jump".to_string(),
        "  /look <yaw> <pitch>        (radians, relative)".to_string(),
        "  /tp <x> <y> <z>            (supports ~offset)".to_string(),
    ]
}
