//! Reusable entity templates.
//!
//! # Usage
//!
//! ```rust
//! use lg_world::{Prototype, World};
//!
//! #[derive(Clone)]
//! struct Capacity(u32);
//! #[derive(Clone)]
//! struct Label(&'static str);
//!
//! let chest = Prototype::new()
//!     .with(Capacity(10))
//!     .with(Label("chest"));
//!
//! let mut world = World::new();
//! let a = chest.spawn(&mut world).unwrap();
//! let b = chest.spawn(&mut world).unwrap();
//! assert_eq!(world.get::<Capacity>(a).unwrap().0, 10);
//! assert_eq!(world.get::<Label>(b).unwrap().0, "chest");
//! ```

use crate::{Component, Entity, World, WorldResult};

type Attach = Box<dyn Fn(&mut World, Entity) -> WorldResult<()> + Send + Sync>;

/// A construction-time list of typed component values.
///
/// Each [`with`](Self::with) call captures one value together with the
/// monomorphised `World::insert::<T>` that attaches a clone of it, so
/// instantiation needs no type registry.
#[derive(Default)]
pub struct Prototype {
    attachers: Vec<Attach>,
}

impl Prototype {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component value.  A later `with` of the same type wins.
    pub fn with<T: Component + Clone>(mut self, value: T) -> Self {
        self.attachers
            .push(Box::new(move |world, entity| world.insert(entity, value.clone())));
        self
    }

    /// Number of component values in the template.
    pub fn len(&self) -> usize {
        self.attachers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachers.is_empty()
    }

    /// Attach every component to an existing entity.
    pub fn apply(&self, world: &mut World, entity: Entity) -> WorldResult<()> {
        for attach in &self.attachers {
            attach(world, entity)?;
        }
        Ok(())
    }

    /// Spawn a new entity carrying every component.
    pub fn spawn(&self, world: &mut World) -> WorldResult<Entity> {
        let entity = world.spawn();
        self.apply(world, entity)?;
        Ok(entity)
    }
}
