use byldr_input::InputEvent;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

/// One timed segment of joystick/look input.
#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    move_x: f32,
    #[serde(default)]
    move_y: f32,
    /// Radians per second.
    #[serde(default)]
    look_yaw: f32,
    /// Radians per second.
    #[serde(default)]
    look_pitch: f32,
    #[serde(default)]
    jump: bool,
    /// Fires once when the step starts.
    #[serde(default)]
    action: bool,
}

/// Replays continuous input by elapsed time. The last step holds forever.
pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    action_fired: Option<usize>,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        if file
            .steps
            .iter()
            .any(|step| !(step.duration.is_finite() && step.duration > 0.0))
        {
            anyhow::bail!("scripted input steps need a positive duration");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            action_fired: None,
        })
    }

    /// Events for a tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Vec<InputEvent> {
        if self.steps.is_empty() {
            return Vec::new();
        }

        self.time_in_step += dt;
        while self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                break;
            }
        }

        let step = &self.steps[self.index];
        let mut events = vec![InputEvent::Move {
            x: step.move_x,
            y: step.move_y,
        }];
        if step.look_yaw != 0.0 || step.look_pitch != 0.0 {
            events.push(InputEvent::Look {
                yaw: step.look_yaw * dt,
                pitch: step.look_pitch * dt,
            });
        }
        if step.jump {
            events.push(InputEvent::Jump);
        }
        if step.action && self.action_fired != Some(self.index) {
            self.action_fired = Some(self.index);
            events.push(InputEvent::Action);
        }
        events
    }

    /// Whether playback has reached the final step.
    pub fn on_last_step(&self) -> bool {
        self.index + 1 >= self.steps.len()
    }
}
