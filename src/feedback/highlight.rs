//! Highlight marking with exact restoration
//!
//! Marking tints every renderable surface under an object and records
//! the pre-marking appearance in the ledger, exactly once per surface.
//! Restoring reapplies the recorded appearance; discarding drops the
//! record without touching the surface (used when the object is being
//! destroyed). All operations silently skip surfaces that no longer
//! exist.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{Appearance, RestorationLedger};

#[derive(SystemParam)]
pub struct Highlighter<'w, 's> {
    ledger: ResMut<'w, RestorationLedger>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    surfaces: Query<'w, 's, &'static mut MeshMaterial3d<StandardMaterial>>,
    children: Query<'w, 's, &'static Children>,
}

impl Highlighter<'_, '_> {
    /// Renderable surfaces under `object`, including the object itself.
    fn surfaces_of(&self, object: Entity) -> Vec<Entity> {
        std::iter::once(object)
            .chain(self.children.iter_descendants(object))
            .filter(|entity| self.surfaces.contains(*entity))
            .collect()
    }

    /// Tint every surface under `object` with `color` and an emissive
    /// glow. A surface already in the ledger keeps its recorded original
    /// and is not re-captured, so repeated marking is a no-op.
    pub fn mark(&mut self, object: Entity, color: Color, emission: f32) {
        for surface in self.surfaces_of(object) {
            if self.ledger.contains(surface) {
                continue;
            }
            let Ok(mut handle) = self.surfaces.get_mut(surface) else {
                continue;
            };
            let original = handle.0.clone();

            let mut tinted = self
                .materials
                .get(&original)
                .cloned()
                .unwrap_or_default();
            tinted.base_color = color;
            tinted.emissive = color.to_linear() * emission;

            handle.0 = self.materials.add(tinted);
            self.ledger.capture(surface, original);
        }
    }

    /// Reapply every recorded appearance under `object` and remove the
    /// records. No-op if nothing under the object is in the ledger.
    pub fn restore(&mut self, object: Entity) {
        for surface in self.surfaces_of(object) {
            if let Some(original) = self.ledger.take(surface) {
                if let Ok(mut handle) = self.surfaces.get_mut(surface) {
                    handle.0 = original;
                }
            }
        }
    }

    /// Drop the records for `object` without restoring. The object is
    /// about to be destroyed; writing to it would be wasted work.
    pub fn discard(&mut self, object: Entity) {
        for surface in self.surfaces_of(object) {
            self.ledger.take(surface);
        }
    }

    /// Swap every surface under `object` to the shared translucent
    /// stand-in. Previews bypass the ledger: they are never restored,
    /// only discarded together with the object.
    pub fn preview(&mut self, object: Entity, ghost: Appearance) {
        for surface in self.surfaces_of(object) {
            if let Ok(mut handle) = self.surfaces.get_mut(surface) {
                handle.0 = ghost.clone();
            }
        }
    }
}
