//! Type-erased, heterogeneous component storage.
//!
//! # Design
//!
//! Each component type `T` is stored as a `Vec<Option<T>>` behind a
//! `Box<dyn ComponentVec>` in a `HashMap<TypeId, …>`.  Indexing is by entity
//! slot (`vec[entity.slot()]`).  Unlike a dense per-agent array, most
//! entities only carry a few component types, so every slot is optional and
//! vectors grow lazily to the highest slot that has ever held a `T`.
//!
//! # Usage
//!
//! ```rust
//! use lg_world::ComponentMap;
//!
//! struct Speed(f32);
//!
//! let mut map = ComponentMap::new();
//! map.insert(3, Speed(1.5));
//! assert!(map.contains::<Speed>(3));
//! assert!(!map.contains::<Speed>(0));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Marker for types that can be attached to an entity.
///
/// Blanket-implemented for every `Send + Sync + 'static` type, so
/// application code never implements it by hand.
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}

// ── Trait object ──────────────────────────────────────────────────────────────

/// Type-erased interface for a per-slot `Vec<Option<T>>`.
///
/// Sealed via the private `Sealed` supertrait so outside code cannot break
/// the slot-indexing invariant.
pub trait ComponentVec: Send + Sync + 'static + sealed::Sealed {
    /// Drop the value stored at `slot`, if any.
    fn clear_slot(&mut self, slot: usize);

    /// Number of allocated slots (not the number of occupied ones).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

mod sealed {
    pub trait Sealed {}
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// A `Vec<Option<T>>` wrapped so it can be stored as `Box<dyn ComponentVec>`.
pub struct TypedComponentVec<T: Component>(pub Vec<Option<T>>);

impl<T: Component> sealed::Sealed for TypedComponentVec<T> {}

impl<T: Component> ComponentVec for TypedComponentVec<T> {
    fn clear_slot(&mut self, slot: usize) {
        if let Some(value) = self.0.get_mut(slot) {
            *value = None;
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ── ComponentMap ──────────────────────────────────────────────────────────────

/// Registry of component arrays, one `Vec<Option<T>>` per type.
#[derive(Default)]
pub struct ComponentMap {
    map: HashMap<TypeId, Box<dyn ComponentVec>>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Register component type `T` with no occupied slots.
    ///
    /// Calling this twice for the same `T` is a no-op.  [`insert`](Self::insert)
    /// registers on demand, so explicit registration is only needed to make
    /// [`type_count`](Self::type_count) reflect a type before first use.
    pub fn register<T: Component>(&mut self) {
        self.map
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(TypedComponentVec::<T>(Vec::new())));
    }

    /// Store `value` at `slot`, returning the previous value if one was there.
    pub fn insert<T: Component>(&mut self, slot: usize, value: T) -> Option<T> {
        self.register::<T>();
        let vec = self.vec_mut::<T>()?;
        if vec.len() <= slot {
            vec.resize_with(slot + 1, || None);
        }
        vec[slot].replace(value)
    }

    /// Detach and return the `T` at `slot`.
    pub fn remove<T: Component>(&mut self, slot: usize) -> Option<T> {
        self.vec_mut::<T>()?.get_mut(slot)?.take()
    }

    /// Drop every component stored at `slot`.
    pub(crate) fn clear_slot(&mut self, slot: usize) {
        for vec in self.map.values_mut() {
            vec.clear_slot(slot);
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn get<T: Component>(&self, slot: usize) -> Option<&T> {
        self.vec::<T>()?.get(slot)?.as_ref()
    }

    pub fn get_mut<T: Component>(&mut self, slot: usize) -> Option<&mut T> {
        self.vec_mut::<T>()?.get_mut(slot)?.as_mut()
    }

    /// `true` if `slot` currently holds a `T`.
    pub fn contains<T: Component>(&self, slot: usize) -> bool {
        self.get::<T>(slot).is_some()
    }

    /// Ascending slots that currently hold a `T`.
    pub fn slots_with<T: Component>(&self) -> impl Iterator<Item = usize> + '_ {
        self.vec::<T>()
            .into_iter()
            .flat_map(|v| v.iter().enumerate())
            .filter(|(_, c)| c.is_some())
            .map(|(i, _)| i)
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// Number of distinct component types currently registered.
    pub fn type_count(&self) -> usize {
        self.map.len()
    }

    /// `true` if component `T` has been registered.
    pub fn is_registered<T: Component>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    // ── Downcasting ───────────────────────────────────────────────────────

    fn vec<T: Component>(&self) -> Option<&Vec<Option<T>>> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|v| v.as_any().downcast_ref::<TypedComponentVec<T>>())
            .map(|v| &v.0)
    }

    fn vec_mut<T: Component>(&mut self) -> Option<&mut Vec<Option<T>>> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.as_any_mut().downcast_mut::<TypedComponentVec<T>>())
            .map(|v| &mut v.0)
    }
}
