//! Selection tool
//!
//! Ray-pick a single object. The selection survives switching between
//! the armed modes (Selecting, Moving, Rotating, Scaling) so a picked
//! object can be handed straight to a transform tool; leaving the armed
//! family clears it.

use bevy::prelude::*;

use crate::core::settings::ToolkitSettings;
use crate::feedback::guide_ray::GuideRayVisual;
use crate::feedback::highlight::Highlighter;
use crate::feedback::outline::OutlineTarget;
use crate::pointer::PointerState;
use crate::scene::query::SceneRaycaster;
use crate::theme::HIGHLIGHT_COLOR;

use super::{ActiveTool, ToolEntered, ToolExited};

/// The single selected object, if any.
#[derive(Resource, Default, Debug)]
pub struct Selection {
    pub current: Option<Entity>,
}

/// Makes `target` the selection. Re-selecting the current object is a
/// no-op so the ledger never captures a highlighted appearance.
pub fn select(
    target: Entity,
    selection: &mut Selection,
    highlighter: &mut Highlighter,
    outline: &mut OutlineTarget,
    settings: &ToolkitSettings,
) {
    if selection.current == Some(target) {
        return;
    }
    clear_selection(selection, highlighter, outline);
    selection.current = Some(target);
    highlighter.mark(target, HIGHLIGHT_COLOR, settings.highlight_emission);
    outline.0 = Some(target);
    debug!("selected {target:?}");
}

/// Restores and drops the current selection. Safe to call when nothing
/// is selected.
pub fn clear_selection(
    selection: &mut Selection,
    highlighter: &mut Highlighter,
    outline: &mut OutlineTarget,
) {
    if let Some(current) = selection.current.take() {
        highlighter.restore(current);
    }
    outline.0 = None;
}

pub fn handle_selection_enter(
    mut entered: EventReader<ToolEntered>,
    settings: Res<ToolkitSettings>,
    mut ray_visual: ResMut<GuideRayVisual>,
) {
    for event in entered.read() {
        let armed = matches!(
            event,
            ToolEntered::Selecting
                | ToolEntered::Moving
                | ToolEntered::Rotating
                | ToolEntered::Scaling
        );
        if armed && settings.show_selection_ray {
            ray_visual.0 = true;
        }
    }
}

pub fn handle_selection_exit(
    mut exited: EventReader<ToolExited>,
    active: Res<ActiveTool>,
    mut selection: ResMut<Selection>,
    mut highlighter: Highlighter,
    mut outline: ResMut<OutlineTarget>,
    mut ray_visual: ResMut<GuideRayVisual>,
) {
    let left_armed = exited.read().any(|event| event.0.arms_selection());
    // Only a switch out of the armed family drops the pick; hopping
    // from Selecting to Moving keeps it.
    if left_armed && !active.0.arms_selection() {
        clear_selection(&mut selection, &mut highlighter, &mut outline);
        ray_visual.0 = false;
    }
}

pub fn selection_tick(
    active: Res<ActiveTool>,
    pointer: Res<PointerState>,
    raycaster: SceneRaycaster,
    settings: Res<ToolkitSettings>,
    mut selection: ResMut<Selection>,
    mut highlighter: Highlighter,
    mut outline: ResMut<OutlineTarget>,
    mut ray_visual: ResMut<GuideRayVisual>,
) {
    if !active.0.arms_selection() {
        return;
    }

    if pointer.cancel_pressed_this_tick() {
        clear_selection(&mut selection, &mut highlighter, &mut outline);
        return;
    }

    if !pointer.select_pressed_this_tick() {
        return;
    }
    let Some(ray) = pointer.current_ray() else {
        return;
    };

    // One cast against everything pickable plus the ground; a ground
    // (or missed) result clears instead of selecting.
    let mask = settings.selectable_mask | settings.ground_mask;
    match raycaster.cast(ray, settings.select_ray_distance, mask) {
        Some(hit) if settings.selectable_mask.contains(hit.category) => {
            select(
                hit.entity,
                &mut selection,
                &mut highlighter,
                &mut outline,
                &settings,
            );
        }
        _ => clear_selection(&mut selection, &mut highlighter, &mut outline),
    }
    if settings.hide_ray_after_pick {
        ray_visual.0 = false;
    }
}
