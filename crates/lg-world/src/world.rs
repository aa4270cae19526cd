//! The `World`: entity lifetimes plus their attached components.

use crate::{Component, ComponentMap, Entity, WorldError, WorldResult};

/// Owns every entity and its components.
///
/// All access is through [`Entity`] handles; any access through a handle
/// whose entity has been despawned resolves to "gone".
#[derive(Default)]
pub struct World {
    /// Current generation of every slot.
    generations: Vec<u32>,
    /// Whether the slot is currently occupied.
    alive:       Vec<bool>,
    /// Recycled slots, most recently freed last.
    free:        Vec<u32>,
    live_count:  usize,
    components:  ComponentMap,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lifetimes ─────────────────────────────────────────────────────────

    /// Create an empty entity.
    pub fn spawn(&mut self) -> Entity {
        self.live_count += 1;
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return Entity { index, generation: self.generations[slot] };
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.alive.push(true);
        Entity { index, generation: 0 }
    }

    /// Destroy `entity` and drop all of its components.
    ///
    /// Returns `false` if it was already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = entity.slot();
        self.components.clear_slot(slot);
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(entity.index);
        self.live_count -= 1;
        true
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.slot();
        slot < self.alive.len() && self.alive[slot] && self.generations[slot] == entity.generation
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    // ── Components ────────────────────────────────────────────────────────

    /// Attach `value` to `entity`, replacing any previous `T`.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> WorldResult<()> {
        if !self.is_alive(entity) {
            return Err(WorldError::Dead(entity));
        }
        self.components.insert(entity.slot(), value);
        Ok(())
    }

    /// Detach and return the `T` on `entity`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.components.remove::<T>(entity.slot())
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.components.get::<T>(entity.slot())
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.components.get_mut::<T>(entity.slot())
    }

    /// Like [`get`](Self::get) but says *why* nothing came back.
    pub fn try_get<T: Component>(&self, entity: Entity) -> WorldResult<&T> {
        if !self.is_alive(entity) {
            return Err(WorldError::Dead(entity));
        }
        self.components
            .get::<T>(entity.slot())
            .ok_or(WorldError::MissingComponent {
                entity,
                component: std::any::type_name::<T>(),
            })
    }

    /// Like [`get_mut`](Self::get_mut) but says *why* nothing came back.
    pub fn try_get_mut<T: Component>(&mut self, entity: Entity) -> WorldResult<&mut T> {
        if !self.is_alive(entity) {
            return Err(WorldError::Dead(entity));
        }
        self.components
            .get_mut::<T>(entity.slot())
            .ok_or(WorldError::MissingComponent {
                entity,
                component: std::any::type_name::<T>(),
            })
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Live entities carrying a `T`, in ascending slot order.
    ///
    /// Returns an owned list so callers can mutate the world while walking it.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.components
            .slots_with::<T>()
            .map(|slot| self.handle(slot))
            .collect()
    }

    /// Live entities carrying both an `A` and a `B`, in ascending slot order.
    pub fn entities_with2<A: Component, B: Component>(&self) -> Vec<Entity> {
        self.components
            .slots_with::<A>()
            .filter(|&slot| self.components.contains::<B>(slot))
            .map(|slot| self.handle(slot))
            .collect()
    }

    /// Live entities carrying an `A`, a `B` and a `C`, in ascending slot order.
    pub fn entities_with3<A: Component, B: Component, C: Component>(&self) -> Vec<Entity> {
        self.components
            .slots_with::<A>()
            .filter(|&slot| {
                self.components.contains::<B>(slot) && self.components.contains::<C>(slot)
            })
            .map(|slot| self.handle(slot))
            .collect()
    }

    /// Reference to the raw component storage.
    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    /// Components are cleared on despawn, so any occupied slot is alive.
    fn handle(&self, slot: usize) -> Entity {
        Entity { index: slot as u32, generation: self.generations[slot] }
    }
}
