//! Undo/redo history of placements and removals.

use crate::brick::PlacedBrick;
use crate::registry::BrickRegistry;
use serde::Serialize;
use tracing::debug;

/// Which way an entry changed the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// The brick was added.
    Add,
    /// The brick was removed.
    Remove,
}

/// One recorded action. Holds a snapshot of the brick so it can be restored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// Action taken.
    pub kind: LogKind,
    /// Brick affected.
    pub brick: PlacedBrick,
}

/// Two-stack command log.
///
/// Recording a new action clears the redo stack. Both stacks are unbounded.
#[derive(Debug, Default)]
pub struct CommandLog {
    undo: Vec<LogEntry>,
    redo: Vec<LogEntry>,
}

impl CommandLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `brick` was added.
    pub fn record_add(&mut self, brick: PlacedBrick) {
        self.record(LogEntry {
            kind: LogKind::Add,
            brick,
        });
    }

    /// Record that `brick` was removed.
    pub fn record_remove(&mut self, brick: PlacedBrick) {
        self.record(LogEntry {
            kind: LogKind::Remove,
            brick,
        });
    }

    fn record(&mut self, entry: LogEntry) {
        self.redo.clear();
        self.undo.push(entry);
    }

    /// Revert the most recent action. Returns the entry that was reverted.
    pub fn undo(&mut self, registry: &mut BrickRegistry) -> Option<LogEntry> {
        let entry = self.undo.pop()?;
        match entry.kind {
            LogKind::Add => {
                registry.remove(entry.brick.id);
            }
            LogKind::Remove => registry.add(entry.brick.clone()),
        }
        debug!(kind = ?entry.kind, id = %entry.brick.id, "undo");
        self.redo.push(entry.clone());
        Some(entry)
    }

    /// Re-apply the most recently undone action. Returns the entry applied.
    pub fn redo(&mut self, registry: &mut BrickRegistry) -> Option<LogEntry> {
        let entry = self.redo.pop()?;
        match entry.kind {
            LogKind::Add => registry.add(entry.brick.clone()),
            LogKind::Remove => {
                registry.remove(entry.brick.id);
            }
        }
        debug!(kind = ?entry.kind, id = %entry.brick.id, "redo");
        self.undo.push(entry.clone());
        Some(entry)
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Entries on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Entries on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byldr_core::{Color, Footprint};
    use glam::Vec3;

    fn add_brick(registry: &mut BrickRegistry, log: &mut CommandLog, x: f32) -> PlacedBrick {
        let brick = PlacedBrick {
            id: registry.allocate_id(),
            type_id: "b11",
            position: Vec3::new(x, 0.6, 0.0),
            footprint: Footprint::new(1, 1),
            height: 1.2,
            color: Color(0x34c759),
        };
        registry.add(brick.clone());
        log.record_add(brick.clone());
        brick
    }

    #[test]
    fn empty_log_is_a_no_op() {
        let mut registry = BrickRegistry::new();
        let mut log = CommandLog::new();
        assert!(log.undo(&mut registry).is_none());
        assert!(log.redo(&mut registry).is_none());
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn undo_then_redo_restores_the_same_brick() {
        let mut registry = BrickRegistry::new();
        let mut log = CommandLog::new();
        let brick = add_brick(&mut registry, &mut log, 0.0);

        let undone = log.undo(&mut registry).expect("entry");
        assert_eq!(undone.kind, LogKind::Add);
        assert!(registry.is_empty());
        assert!(log.can_redo());

        log.redo(&mut registry).expect("entry");
        assert_eq!(registry.all(), &[brick]);
        assert_eq!((log.undo_depth(), log.redo_depth()), (1, 0));
    }

    #[test]
    fn undoing_a_removal_brings_the_brick_back() {
        let mut registry = BrickRegistry::new();
        let mut log = CommandLog::new();
        let brick = add_brick(&mut registry, &mut log, 0.0);
        let removed = registry.remove(brick.id).expect("present");
        log.record_remove(removed);

        log.undo(&mut registry);
        assert_eq!(registry.get(brick.id), Some(&brick));
        log.redo(&mut registry);
        assert!(registry.is_empty());
    }

    #[test]
    fn new_action_clears_redo() {
        let mut registry = BrickRegistry::new();
        let mut log = CommandLog::new();
        add_brick(&mut registry, &mut log, 0.0);
        add_brick(&mut registry, &mut log, 1.0);
        log.undo(&mut registry);
        assert!(log.can_redo());

        add_brick(&mut registry, &mut log, 2.0);
        assert!(!log.can_redo());
        assert_eq!(log.undo_depth(), 2);
    }
}
