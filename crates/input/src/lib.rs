#![warn(missing_docs)]
//! Input event queue.
//!
//! Presentation code (joystick, pointer, picker buttons) pushes
//! [`InputEvent`]s as they happen; the simulation drains them once per tick
//! into a [`FrameInput`]. Nothing in the simulation polls UI state directly.

use byldr_core::Mode;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// A raw event from an input or UI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Joystick position; `x` strafes, `y` walks forward. Held until the next `Move`.
    Move {
        /// Strafe axis in `[-1, 1]`.
        x: f32,
        /// Forward axis in `[-1, 1]`.
        y: f32,
    },
    /// Look delta in radians.
    Look {
        /// Yaw delta.
        yaw: f32,
        /// Pitch delta.
        pitch: f32,
    },
    /// Pointer pressed on the 3D view (pixels).
    PointerDown {
        /// Screen x.
        x: f32,
        /// Screen y.
        y: f32,
    },
    /// Pointer moved (pixels).
    PointerMove {
        /// Screen x.
        x: f32,
        /// Screen y.
        y: f32,
    },
    /// Pointer released (pixels).
    PointerUp {
        /// Screen x.
        x: f32,
        /// Screen y.
        y: f32,
    },
    /// Jump button.
    Jump,
    /// Build or erase at the crosshair.
    Action,
    /// Pick a catalog entry.
    SelectBrick {
        /// Catalog index.
        index: usize,
    },
    /// Pick a palette entry.
    SelectColor {
        /// Palette index.
        index: usize,
    },
    /// Flip between 0° and 90°.
    ToggleRotation,
    /// Switch between build and erase.
    SetMode {
        /// New mode.
        mode: Mode,
    },
    /// Undo the last placement or removal.
    Undo,
    /// Redo the last undone action.
    Redo,
}

/// A discrete command for the session, in the order it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Commit BUILD or ERASE at the crosshair.
    Action,
    /// Undo.
    Undo,
    /// Redo.
    Redo,
    /// Select catalog entry.
    SelectBrick(usize),
    /// Select palette entry.
    SelectColor(usize),
    /// Toggle rotation.
    ToggleRotation,
    /// Set mode.
    SetMode(Mode),
}

/// Everything the simulation needs from input for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Held movement axis (x strafe, y forward), each in `[-1, 1]`.
    pub move_axis: Vec2,
    /// Accumulated look delta in radians (x yaw, y pitch).
    pub look_delta: Vec2,
    /// Jump requested this tick.
    pub jump: bool,
    /// Discrete commands in arrival order.
    pub commands: Vec<Command>,
}

/// Pointer drag-look tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerSettings {
    /// Radians of rotation per pixel dragged.
    pub look_sensitivity: f32,
    /// A press/release that travels less than this many pixels on both axes is a click.
    pub click_slop: f32,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.005,
            click_slop: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PointerDrag {
    start: Vec2,
    last: Vec2,
}

/// FIFO of input events, drained once per tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
    move_axis: Vec2,
    drag: Option<PointerDrag>,
    settings: PointerSettings,
}

impl InputQueue {
    /// Create an empty queue with default pointer settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with custom pointer settings.
    pub fn with_settings(settings: PointerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Enqueue an event.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Number of events waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drain every pending event into this tick's input.
    pub fn drain_frame(&mut self) -> FrameInput {
        let mut frame = FrameInput::default();

        while let Some(event) = self.pending.pop_front() {
            match event {
                InputEvent::Move { x, y } => {
                    self.move_axis = Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE);
                }
                InputEvent::Look { yaw, pitch } => {
                    frame.look_delta += Vec2::new(yaw, pitch);
                }
                InputEvent::PointerDown { x, y } => {
                    let at = Vec2::new(x, y);
                    self.drag = Some(PointerDrag { start: at, last: at });
                }
                InputEvent::PointerMove { x, y } => {
                    if let Some(drag) = self.drag.as_mut() {
                        let at = Vec2::new(x, y);
                        frame.look_delta -= (at - drag.last) * self.settings.look_sensitivity;
                        drag.last = at;
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    if let Some(drag) = self.drag.take() {
                        let travel = (Vec2::new(x, y) - drag.start).abs();
                        if travel.max_element() < self.settings.click_slop {
                            debug!(?travel, "pointer click treated as action");
                            frame.commands.push(Command::Action);
                        }
                    }
                }
                InputEvent::Jump => frame.jump = true,
                InputEvent::Action => frame.commands.push(Command::Action),
                InputEvent::SelectBrick { index } => {
                    frame.commands.push(Command::SelectBrick(index));
                }
                InputEvent::SelectColor { index } => {
                    frame.commands.push(Command::SelectColor(index));
                }
                InputEvent::ToggleRotation => frame.commands.push(Command::ToggleRotation),
                InputEvent::SetMode { mode } => frame.commands.push(Command::SetMode(mode)),
                InputEvent::Undo => frame.commands.push(Command::Undo),
                InputEvent::Redo => frame.commands.push(Command::Redo),
            }
        }

        frame.move_axis = self.move_axis;
        frame
    }
}
