use crate::brick::{BrickId, BrickPart, PlacedBrick};
use byldr_physics::Aabb;
use tracing::trace;

/// In-memory brick storage.
///
/// Bricks are kept in insertion order; collision and picking visit them in
/// that order. Ids are allocated monotonically and never reused, so an id
/// removed by erase and restored by undo still refers to the same brick.
#[derive(Debug, Default)]
pub struct BrickRegistry {
    bricks: Vec<PlacedBrick>,
    next_id: u64,
}

impl BrickRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next brick id.
    pub fn allocate_id(&mut self) -> BrickId {
        let id = BrickId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append `brick` to the insertion order.
    pub fn add(&mut self, brick: PlacedBrick) {
        self.next_id = self.next_id.max(brick.id.0 + 1);
        trace!(id = %brick.id, position = ?brick.position, "brick added");
        self.bricks.push(brick);
    }

    /// Remove and return the brick with `id`.
    pub fn remove(&mut self, id: BrickId) -> Option<PlacedBrick> {
        let index = self.bricks.iter().position(|brick| brick.id == id)?;
        Some(self.bricks.remove(index))
    }

    /// Look up a brick by id.
    pub fn get(&self, id: BrickId) -> Option<&PlacedBrick> {
        self.bricks.iter().find(|brick| brick.id == id)
    }

    /// Every brick, in insertion order.
    pub fn all(&self) -> &[PlacedBrick] {
        &self.bricks
    }

    /// Number of bricks.
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Every pickable sub-part (bodies and studs).
    pub fn parts(&self) -> impl Iterator<Item = BrickPart> + '_ {
        self.bricks.iter().flat_map(PlacedBrick::parts)
    }

    /// Body bounds of every brick, for player collision.
    pub fn obstacles(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.bricks.iter().map(PlacedBrick::aabb)
    }
}
