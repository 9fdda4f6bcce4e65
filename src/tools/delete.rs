//! Delete tool
//!
//! Mark-then-commit destruction. Picking toggles a red marking on
//! objects; nothing is destroyed until an explicit confirmation.
//! Cancelling (or being forced out by a mode switch) restores every
//! marked object to its recorded appearance.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::core::settings::ToolkitSettings;
use crate::feedback::guide_ray::GuideRayVisual;
use crate::feedback::highlight::Highlighter;
use crate::pointer::PointerState;
use crate::scene::query::SceneRaycaster;
use crate::theme::DELETE_COLOR;

use super::{ActiveTool, ToolEntered, ToolExited, ToolMode, ToolRequest};

/// Commit request for the current marked set. Written by the top panel's
/// confirm button and by the pointer's confirm edge.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct DeleteConfirmed;

/// Objects currently marked for deletion.
#[derive(Resource, Default, Debug)]
pub struct DeleteState {
    pub marked: HashSet<Entity>,
}

pub fn handle_delete_enter(
    mut entered: EventReader<ToolEntered>,
    mut state: ResMut<DeleteState>,
    settings: Res<ToolkitSettings>,
    mut ray_visual: ResMut<GuideRayVisual>,
) {
    for event in entered.read() {
        if matches!(event, ToolEntered::Deleting) {
            state.marked.clear();
            if settings.show_delete_ray {
                ray_visual.0 = true;
            }
        }
    }
}

/// A forced exit behaves like cancel: whatever is still marked gets its
/// appearance back.
pub fn handle_delete_exit(
    mut exited: EventReader<ToolExited>,
    mut state: ResMut<DeleteState>,
    mut highlighter: Highlighter,
    mut ray_visual: ResMut<GuideRayVisual>,
) {
    for event in exited.read() {
        if event.0 != ToolMode::Deleting {
            continue;
        }
        for object in state.marked.drain() {
            highlighter.restore(object);
        }
        ray_visual.0 = false;
    }
}

pub fn delete_tick(
    active: Res<ActiveTool>,
    mut state: ResMut<DeleteState>,
    pointer: Res<PointerState>,
    mut confirmations: EventReader<DeleteConfirmed>,
    raycaster: SceneRaycaster,
    settings: Res<ToolkitSettings>,
    mut highlighter: Highlighter,
    mut commands: Commands,
    mut requests: EventWriter<ToolRequest>,
) {
    if active.0 != ToolMode::Deleting {
        confirmations.clear();
        return;
    }

    if pointer.cancel_pressed_this_tick() {
        // Exit restores the marked set
        requests.write(ToolRequest::Exit);
        confirmations.clear();
        return;
    }

    // A shared physical button (desktop left click) raises select and
    // confirm edges together; that gesture is a pick toggle, never a
    // commit. Commit needs the panel button or a dedicated confirm.
    let confirmed = confirmations.read().next().is_some()
        || (pointer.confirm_pressed_this_tick() && !pointer.select_pressed_this_tick());
    if confirmed {
        let count = state.marked.len();
        for object in state.marked.drain() {
            // The recorded appearances die with the objects
            highlighter.discard(object);
            if let Ok(mut object) = commands.get_entity(object) {
                object.despawn();
            }
        }
        info!("deleted {count} marked object(s)");
        requests.write(ToolRequest::Exit);
        return;
    }

    if !pointer.select_pressed_this_tick() {
        return;
    }
    let Some(ray) = pointer.current_ray() else {
        return;
    };
    if let Some(hit) = raycaster.cast(ray, settings.select_ray_distance, settings.selectable_mask) {
        if state.marked.remove(&hit.entity) {
            highlighter.restore(hit.entity);
        } else {
            highlighter.mark(hit.entity, DELETE_COLOR, settings.delete_emission);
            state.marked.insert(hit.entity);
        }
    }
}
