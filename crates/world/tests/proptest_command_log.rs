use byldr_core::{Color, Footprint};
use byldr_world::{BrickId, BrickRegistry, CommandLog, PlacedBrick};
use glam::Vec3;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    Build { x: i8, z: i8 },
    Remove { pick: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-8i8..8, -8i8..8).prop_map(|(x, z)| Op::Build { x, z }),
        1 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
    ]
}

fn ids(registry: &BrickRegistry) -> BTreeSet<BrickId> {
    registry.all().iter().map(|brick| brick.id).collect()
}

fn apply(registry: &mut BrickRegistry, log: &mut CommandLog, op: &Op) {
    match *op {
        Op::Build { x, z } => {
            let brick = PlacedBrick {
                id: registry.allocate_id(),
                type_id: "b11",
                position: Vec3::new(x as f32, 0.6, z as f32),
                footprint: Footprint::new(1, 1),
                height: 1.2,
                color: Color(0xffcc00),
            };
            registry.add(brick.clone());
            log.record_add(brick);
        }
        Op::Remove { pick } => {
            if registry.is_empty() {
                return;
            }
            let id = registry.all()[pick % registry.len()].id;
            if let Some(brick) = registry.remove(id) {
                log.record_remove(brick);
            }
        }
    }
}

proptest! {
    #[test]
    fn undo_all_then_redo_all_round_trips(ops in prop::collection::vec(op(), 0..40)) {
        let mut registry = BrickRegistry::new();
        let mut log = CommandLog::new();
        for op in &ops {
            apply(&mut registry, &mut log, op);
        }
        let after = ids(&registry);
        let bricks_after = registry.all().to_vec();

        let depth = log.undo_depth();
        for _ in 0..depth {
            prop_assert!(log.undo(&mut registry).is_some());
        }
        prop_assert!(registry.is_empty());
        prop_assert!(!log.can_undo());
        prop_assert_eq!(log.redo_depth(), depth);

        for _ in 0..depth {
            prop_assert!(log.redo(&mut registry).is_some());
        }
        prop_assert_eq!(ids(&registry), after);
        for brick in &bricks_after {
            prop_assert_eq!(registry.get(brick.id), Some(brick));
        }
        prop_assert!(!log.can_redo());
    }

    #[test]
    fn each_undo_restores_the_previous_set(ops in prop::collection::vec(op(), 1..30)) {
        let mut registry = BrickRegistry::new();
        let mut log = CommandLog::new();
        let mut history = vec![ids(&registry)];
        for op in &ops {
            let before = log.undo_depth();
            apply(&mut registry, &mut log, op);
            if log.undo_depth() > before {
                history.push(ids(&registry));
            }
        }

        while log.can_undo() {
            history.pop();
            log.undo(&mut registry);
            prop_assert_eq!(Some(&ids(&registry)), history.last());
        }
    }

    #[test]
    fn new_action_after_undo_clears_redo(
        ops in prop::collection::vec(op(), 1..20),
        undos in 1usize..5,
        x in -8i8..8,
    ) {
        let mut registry = BrickRegistry::new();
        let mut log = CommandLog::new();
        for op in &ops {
            apply(&mut registry, &mut log, op);
        }
        for _ in 0..undos {
            log.undo(&mut registry);
        }

        apply(&mut registry, &mut log, &Op::Build { x, z: 0 });
        prop_assert!(!log.can_redo());
        prop_assert!(log.redo(&mut registry).is_none());
    }
}
