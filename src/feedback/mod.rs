//! Visual feedback
//!
//! Temporary visual markings on scene objects: highlight tinting with an
//! exact-restoration ledger, ghost previews, a bounding outline around
//! the selection, and a cosmetic guide ray. Logic (ledger, material
//! swaps) is split from drawing (gizmos) so headless tests can run the
//! former without a render pass.

pub mod guide_ray;
pub mod highlight;
pub mod outline;

use bevy::prelude::*;
use std::collections::HashMap;

pub use highlight::Highlighter;
pub use outline::OutlineTarget;

use crate::theme::GHOST_COLOR;

/// Pre-marking appearance of a renderable surface. In this renderer the
/// appearance of a surface is exactly its standard-material handle.
pub type Appearance = Handle<StandardMaterial>;

/// Mapping from marked surface to its pre-marking appearance.
///
/// Every entry is removed exactly once: either restored (clear/cancel)
/// or discarded when the underlying object is destroyed. Entries whose
/// surface has vanished are purged without being written to.
#[derive(Resource, Default)]
pub struct RestorationLedger {
    entries: HashMap<Entity, Appearance>,
}

impl RestorationLedger {
    pub fn capture(&mut self, surface: Entity, appearance: Appearance) {
        self.entries.entry(surface).or_insert(appearance);
    }

    pub fn take(&mut self, surface: Entity) -> Option<Appearance> {
        self.entries.remove(&surface)
    }

    pub fn contains(&self, surface: Entity) -> bool {
        self.entries.contains_key(&surface)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn retain(&mut self, keep: impl FnMut(&Entity, &mut Appearance) -> bool) {
        self.entries.retain(keep);
    }
}

/// Shared translucent stand-in material for placement previews.
#[derive(Resource, Default)]
pub struct GhostMaterial(pub Handle<StandardMaterial>);

fn setup_ghost_material(
    mut ghost: ResMut<GhostMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    ghost.0 = materials.add(StandardMaterial {
        base_color: GHOST_COLOR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
}

/// Freshly spawned previews arrive with a placeholder material; swap
/// every surface to the shared ghost stand-in, bypassing the ledger.
fn paint_ghost_previews(
    ghost: Res<GhostMaterial>,
    fresh: Query<Entity, Added<crate::scene::GhostPreview>>,
    mut highlighter: Highlighter,
) {
    for preview in &fresh {
        highlighter.preview(preview, ghost.0.clone());
    }
}

/// Objects may be destroyed while a stale ledger entry still points at
/// them; drop those entries without attempting restoration.
fn purge_stale_ledger_entries(
    mut ledger: ResMut<RestorationLedger>,
    surfaces: Query<(), With<MeshMaterial3d<StandardMaterial>>>,
) {
    if ledger.is_empty() {
        return;
    }
    ledger.retain(|surface, _| surfaces.contains(*surface));
}

/// Ledger, ghost material and marking state. No drawing.
pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RestorationLedger>()
            .init_resource::<GhostMaterial>()
            .init_resource::<OutlineTarget>()
            .init_resource::<guide_ray::GuideRayVisual>()
            .add_systems(Startup, setup_ghost_material)
            .add_systems(Update, paint_ghost_previews)
            .add_systems(PostUpdate, purge_stale_ledger_entries);
    }
}

/// Gizmo-drawn outline and guide ray. Needs the render app.
pub struct FeedbackVisualsPlugin;

impl Plugin for FeedbackVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (outline::draw_selection_outline, guide_ray::draw_guide_ray),
        );
    }
}
