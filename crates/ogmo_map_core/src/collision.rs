//! Rectangle colliders exported by level files

use crate::PixelRect;

/// Sink for the axis-aligned colliders a level exports
///
/// The level manager clears the registry and repopulates it on every level load.
pub trait CollisionRegistry {
    /// Remove every collider
    fn remove_all_colliders(&mut self);

    /// Add an axis-aligned collider
    fn add_collider(&mut self, rect: PixelRect);
}

/// Ordered in-memory collider store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColliderSet {
    colliders: Vec<PixelRect>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All colliders in insertion order
    pub fn colliders(&self) -> &[PixelRect] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Check whether `rect` overlaps any collider
    pub fn intersects(&self, rect: &PixelRect) -> bool {
        self.colliders.iter().any(|c| c.intersects(rect))
    }
}

impl CollisionRegistry for ColliderSet {
    fn remove_all_colliders(&mut self) {
        self.colliders.clear();
    }

    fn add_collider(&mut self, rect: PixelRect) {
        self.colliders.push(rect);
    }
}
