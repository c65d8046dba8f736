//! The simulation context: one explicit owner for everything a sandbox
//! session mutates, stepped once per rendered frame.

use crate::brick::{BrickId, PlacedBrick};
use crate::command_log::{CommandLog, LogEntry};
use crate::player::{PlayerController, PlayerState, PlayerTuning};
use crate::registry::BrickRegistry;
use crate::selection::Selection;
use crate::targeting::{compute_target, Outline, Placement, Target, TargetingConfig};
use byldr_camera::Camera;
use byldr_core::{BrickCatalog, Color, Mode, Palette, SimTick};
use byldr_input::{Command, FrameInput};
use byldr_physics::Contact;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tunables for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Player movement constants.
    pub player: PlayerTuning,
    /// Crosshair ray limits.
    pub targeting: TargetingConfig,
    /// Frame time is clamped to `[0, max_frame_dt]` seconds.
    pub max_frame_dt: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            targeting: TargetingConfig::default(),
            max_frame_dt: 0.1,
        }
    }
}

/// Result of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum CommitOutcome {
    /// A brick was placed at the ghost.
    Placed(BrickId),
    /// The targeted brick was removed.
    Removed(BrickId),
    /// Nothing was targeted.
    Ignored,
}

/// Something that changed the brick set, reported once per tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// BUILD commit.
    Placed {
        /// New brick.
        brick: PlacedBrick,
    },
    /// ERASE commit.
    Removed {
        /// Removed brick.
        brick: PlacedBrick,
    },
    /// Undo reverted an entry.
    Undone {
        /// Reverted entry.
        entry: LogEntry,
    },
    /// Redo re-applied an entry.
    Redone {
        /// Re-applied entry.
        entry: LogEntry,
    },
}

impl SessionEvent {
    /// Short label for event logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Placed { .. } => "placed",
            Self::Removed { .. } => "removed",
            Self::Undone { .. } => "undone",
            Self::Redone { .. } => "redone",
        }
    }
}

/// What the UI shows: brick count, mode and undo/redo availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    /// Bricks in the world.
    pub brick_count: usize,
    /// Current mode.
    pub mode: Mode,
    /// Undo button enabled.
    pub can_undo: bool,
    /// Redo button enabled.
    pub can_redo: bool,
}

/// Translucent preview of the next placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ghost {
    /// Where the brick would go.
    pub placement: Placement,
    /// Selected colour.
    pub color: Color,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    /// Placed bricks in insertion order.
    pub bricks: &'a [PlacedBrick],
    /// Ghost, visible only for a BUILD target.
    pub ghost: Option<Ghost>,
    /// Candidate outline.
    pub outline: Option<Outline>,
    /// Eye camera.
    pub camera: Camera,
}

/// Per-tick summary returned by [`Session::tick`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Tick that was simulated.
    pub tick: SimTick,
    /// Clamped frame time actually used.
    pub dt: f32,
    /// Collision corrections applied to the player.
    pub contacts: Vec<Contact>,
    /// Brick-set changes, in order.
    pub events: Vec<SessionEvent>,
}

/// A running sandbox.
#[derive(Debug)]
pub struct Session {
    catalog: BrickCatalog,
    palette: Palette,
    registry: BrickRegistry,
    log: CommandLog,
    selection: Selection,
    controller: PlayerController,
    player: PlayerState,
    targeting: TargetingConfig,
    max_frame_dt: f32,
    target: Target,
    tick: SimTick,
    events: Vec<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl Session {
    /// Empty world with the built-in catalog and palette.
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_catalog(settings, BrickCatalog::builtin(), Palette::builtin())
    }

    /// Empty world with a custom catalog and palette.
    pub fn with_catalog(
        settings: SessionSettings,
        catalog: BrickCatalog,
        palette: Palette,
    ) -> Self {
        let controller = PlayerController::new(settings.player);
        let mut session = Self {
            catalog,
            palette,
            registry: BrickRegistry::new(),
            log: CommandLog::new(),
            selection: Selection::new(catalog, palette),
            player: controller.spawn(),
            controller,
            targeting: settings.targeting,
            max_frame_dt: settings.max_frame_dt.max(0.0),
            target: Target::None,
            tick: SimTick::ZERO,
            events: Vec::new(),
        };
        session.refresh_target();
        session
    }

    /// Advance one frame: move the player, apply commands in order, retarget.
    pub fn tick(&mut self, dt: f32, frame: &FrameInput) -> TickReport {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };

        let contacts = self
            .controller
            .step(&mut self.player, frame, dt, self.registry.obstacles());

        for command in &frame.commands {
            self.apply(*command);
        }
        self.refresh_target();

        let report = TickReport {
            tick: self.tick,
            dt,
            contacts,
            events: std::mem::take(&mut self.events),
        };
        self.tick = self.tick.advance(1);
        report
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Action => {
                self.commit();
            }
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::SelectBrick(index) => {
                if let Err(err) = self.selection.select_brick_type(index) {
                    warn!(%err, "brick selection rejected");
                }
            }
            Command::SelectColor(index) => {
                if let Err(err) = self.selection.select_color(index) {
                    warn!(%err, "colour selection rejected");
                }
            }
            Command::ToggleRotation => {
                let rotation = self.selection.toggle_rotation();
                debug!(degrees = rotation.degrees(), "rotation toggled");
            }
            Command::SetMode(mode) => self.selection.set_mode(mode),
        }
    }

    /// Candidate for the current camera and selection.
    fn compute_target(&self) -> Target {
        compute_target(
            &self.player.camera().crosshair_ray(),
            &self.registry,
            self.selection.mode(),
            self.selection.brick_type(),
            self.selection.rotation(),
            &self.targeting,
        )
    }

    fn refresh_target(&mut self) {
        self.target = self.compute_target();
    }

    /// Build or erase at the crosshair, recomputing the target first.
    pub fn commit(&mut self) -> CommitOutcome {
        let outcome = match self.compute_target() {
            Target::Build(placement) => {
                let brick_type = self.selection.brick_type();
                let brick = PlacedBrick {
                    id: self.registry.allocate_id(),
                    type_id: brick_type.id,
                    position: placement.position,
                    footprint: placement.footprint,
                    height: placement.height,
                    color: self.selection.color(),
                };
                let id = brick.id;
                debug!(%id, type_id = brick.type_id, position = ?brick.position, "brick placed");
                self.registry.add(brick.clone());
                self.log.record_add(brick.clone());
                self.events.push(SessionEvent::Placed { brick });
                CommitOutcome::Placed(id)
            }
            Target::Erase(target) => match self.registry.remove(target.id) {
                Some(brick) => {
                    debug!(id = %target.id, "brick removed");
                    self.log.record_remove(brick.clone());
                    self.events.push(SessionEvent::Removed { brick });
                    CommitOutcome::Removed(target.id)
                }
                None => CommitOutcome::Ignored,
            },
            Target::None => CommitOutcome::Ignored,
        };
        self.refresh_target();
        outcome
    }

    /// Revert the latest placement or removal.
    pub fn undo(&mut self) -> Option<LogEntry> {
        let entry = self.log.undo(&mut self.registry)?;
        self.events.push(SessionEvent::Undone {
            entry: entry.clone(),
        });
        self.refresh_target();
        Some(entry)
    }

    /// Re-apply the latest undone action.
    pub fn redo(&mut self) -> Option<LogEntry> {
        let entry = self.log.redo(&mut self.registry)?;
        self.events.push(SessionEvent::Redone {
            entry: entry.clone(),
        });
        self.refresh_target();
        Some(entry)
    }

    /// Move the player to `position`, at rest.
    pub fn teleport(&mut self, position: Vec3) {
        self.player.body.position = position;
        self.player.body.velocity_y = 0.0;
        self.refresh_target();
    }

    /// Point the camera at `yaw`/`pitch`.
    pub fn look_at(&mut self, yaw: f32, pitch: f32) {
        let mut camera = Camera::new(self.player.body.position, 0.0, 0.0);
        camera.rotate(yaw, pitch);
        self.player.yaw = camera.yaw;
        self.player.pitch = camera.pitch;
        self.refresh_target();
    }

    /// UI state.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            brick_count: self.registry.len(),
            mode: self.selection.mode(),
            can_undo: self.log.can_undo(),
            can_redo: self.log.can_redo(),
        }
    }

    /// Render state.
    pub fn view(&self) -> FrameView<'_> {
        let ghost = match self.target {
            Target::Build(placement) => Some(Ghost {
                placement,
                color: self.selection.color(),
            }),
            _ => None,
        };
        FrameView {
            bricks: self.registry.all(),
            ghost,
            outline: self.target.outline(),
            camera: self.player.camera(),
        }
    }

    /// Current candidate.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Brick storage.
    pub fn registry(&self) -> &BrickRegistry {
        &self.registry
    }

    /// Undo/redo history.
    pub fn command_log(&self) -> &CommandLog {
        &self.log
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Player pose.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Piece table.
    pub fn catalog(&self) -> BrickCatalog {
        self.catalog
    }

    /// Colour table.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Next tick to be simulated.
    pub fn current_tick(&self) -> SimTick {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn frame(commands: Vec<Command>) -> FrameInput {
        FrameInput {
            commands,
            ..FrameInput::default()
        }
    }

    fn looking_down_at_floor() -> Session {
        let mut session = Session::default();
        session.look_at(0.0, -0.6);
        session
    }

    #[test]
    fn spawn_looks_at_the_horizon() {
        let session = Session::default();
        assert_eq!(session.player().position(), Vec3::new(5.0, 1.8, 10.0));
        assert_eq!(session.target(), Target::None);
        let view = session.view();
        assert!(view.ghost.is_none());
        assert!(view.outline.is_none());
    }

    #[test]
    fn action_places_then_extends_from_the_side() {
        let mut session = looking_down_at_floor();
        let report = session.tick(DT, &frame(vec![Command::Action, Command::Action]));
        assert_eq!(report.events.len(), 2);

        let positions: Vec<Vec3> = session
            .registry()
            .all()
            .iter()
            .map(|b| b.position)
            .collect();
        assert_eq!(
            positions,
            vec![Vec3::new(5.0, 0.6, 7.0), Vec3::new(5.0, 0.6, 8.0)]
        );
        assert_eq!(session.registry().all()[0].color, Color(0x007aff));
    }

    #[test]
    fn commit_without_target_is_ignored() {
        let mut session = Session::default();
        assert_eq!(session.commit(), CommitOutcome::Ignored);
        assert!(session.registry().is_empty());
        assert!(!session.status().can_undo);
    }

    #[test]
    fn erase_removes_the_targeted_brick() {
        let mut session = looking_down_at_floor();
        let CommitOutcome::Placed(id) = session.commit() else {
            panic!("expected a placement");
        };
        session.tick(DT, &frame(vec![Command::SetMode(Mode::Erase)]));
        assert!(matches!(session.target(), Target::Erase(t) if t.id == id));
        assert_eq!(session.view().outline.map(|o| o.color), Some(Color::RED));
        assert!(session.view().ghost.is_none());

        assert_eq!(session.commit(), CommitOutcome::Removed(id));
        assert_eq!(session.status().brick_count, 0);
        assert_eq!(session.commit(), CommitOutcome::Ignored);
    }

    #[test]
    fn undo_redo_through_commands() {
        let mut session = looking_down_at_floor();
        session.tick(DT, &frame(vec![Command::Action]));
        let report = session.tick(DT, &frame(vec![Command::Undo, Command::Undo]));
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].kind(), "undone");
        assert_eq!(
            session.status(),
            SessionStatus {
                brick_count: 0,
                mode: Mode::Build,
                can_undo: false,
                can_redo: true,
            }
        );

        session.tick(DT, &frame(vec![Command::Redo]));
        assert_eq!(session.status().brick_count, 1);
        assert!(!session.status().can_redo);
    }

    #[test]
    fn bad_selection_is_ignored() {
        let mut session = Session::default();
        session.tick(DT, &frame(vec![Command::SelectBrick(99), Command::SelectColor(3)]));
        assert_eq!(session.selection().brick_type_index(), 0);
        assert_eq!(session.selection().color_index(), 3);
    }

    #[test]
    fn frame_time_is_clamped() {
        let mut session = Session::default();
        assert_eq!(session.tick(5.0, &FrameInput::default()).dt, 0.1);
        assert_eq!(session.tick(-1.0, &FrameInput::default()).dt, 0.0);
        assert_eq!(session.tick(f32::NAN, &FrameInput::default()).dt, 0.0);
        assert_eq!(session.current_tick(), SimTick(3));
    }

    #[test]
    fn rotated_selection_changes_the_ghost_footprint() {
        let mut session = looking_down_at_floor();
        session.tick(DT, &frame(vec![Command::SelectBrick(4), Command::ToggleRotation]));
        let ghost = session.view().ghost.expect("ghost over floor");
        assert_eq!(ghost.placement.footprint, byldr_core::Footprint::new(4, 2));
        assert_eq!(ghost.placement.position.x.fract().abs(), 0.5);
    }

    #[test]
    fn walking_into_a_brick_is_stopped() {
        let mut session = looking_down_at_floor();
        session.commit();
        let walk = FrameInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..FrameInput::default()
        };
        for _ in 0..120 {
            session.tick(DT, &walk);
        }
        // brick face at z = 7.5, player radius 0.4
        assert!((session.player().position().z - 7.9).abs() < 1e-4);
    }
}
