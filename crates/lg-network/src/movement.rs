//! Positions and straight-line movement.

use lg_core::Vec2;
use lg_world::{Entity, World};

/// Where a node or carrier sits on the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location(pub Vec2);

impl Location {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// An entity heading toward another entity at `speed` units per millisecond.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovingObject {
    /// `None` while there is nowhere to go.
    pub target: Option<Entity>,
    pub speed:  f32,
}

impl MovingObject {
    /// Distance covered in `elapsed_ms`; also the arrival threshold.
    #[inline]
    pub fn reach(&self, elapsed_ms: u32) -> f32 {
        self.speed * elapsed_ms as f32
    }
}

/// Step every mover toward its target's current location.
///
/// Moves at most `speed * elapsed_ms` and never past the target.  Movers
/// without a live, located target stay put.
pub fn move_objects(world: &mut World, elapsed_ms: u32) {
    for entity in world.entities_with2::<MovingObject, Location>() {
        let Some(&mover) = world.get::<MovingObject>(entity) else {
            continue;
        };
        let Some(&Location(goal)) = mover.target.and_then(|t| world.get::<Location>(t)) else {
            continue;
        };
        if let Some(Location(pos)) = world.get_mut::<Location>(entity) {
            *pos = pos.step_toward(goal, mover.reach(elapsed_ms));
        }
    }
}
