//! Tool modes
//!
//! The mutually exclusive tool modes and the four tools driving them.
//! Exactly one mode is active at any time; entering a mode first forces
//! the previous one through its exit path, which flushes its ledger
//! entries and hides its previews and rays. That forced exit is the
//! only cross-tool ordering guarantee, and the per-tick system chain
//! below is what provides it:
//!
//! coordinator -> per-tool exits -> per-tool enters -> tool ticks

pub mod delete;
pub mod place;
pub mod select;
pub mod transform;

use bevy::prelude::*;

pub use delete::{DeleteConfirmed, DeleteState};
pub use place::PlacementState;
pub use select::Selection;
pub use transform::TransformState;

use crate::scene::{PlacementContainer, PrimitiveShape};

/// The enumerated, mutually exclusive tool state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolMode {
    #[default]
    Idle,
    Selecting,
    Placing,
    Deleting,
    Moving,
    Rotating,
    Scaling,
}

impl ToolMode {
    /// Modes in which the selection tool is armed for picking.
    pub fn arms_selection(self) -> bool {
        matches!(
            self,
            ToolMode::Selecting | ToolMode::Moving | ToolMode::Rotating | ToolMode::Scaling
        )
    }
}

/// The single active mode. Written only by the coordinator.
#[derive(Resource, Default, Debug)]
pub struct ActiveTool(pub ToolMode);

/// Requests to enter a tool mode (or leave for Idle). Anything may
/// write these; the coordinator applies at most one per tick.
#[derive(Event, Clone, Copy, Debug)]
pub enum ToolRequest {
    Select,
    Place(PrimitiveShape),
    Delete,
    Move,
    Rotate,
    Scale,
    Exit,
}

/// Emitted by the coordinator after a mode was installed.
#[derive(Event, Clone, Copy, Debug)]
pub enum ToolEntered {
    Selecting,
    Placing(PrimitiveShape),
    Deleting,
    Moving,
    Rotating,
    Scaling,
}

/// Emitted by the coordinator when a mode is forced out.
#[derive(Event, Clone, Copy, Debug)]
pub struct ToolExited(pub ToolMode);

/// Panel-visibility requests routed to the external panel coordinator.
/// The core never reads panel state back.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelCommand {
    ToolEnter,
    ToolExit,
    ShowDeleteTopPanel(bool),
}

/// Enforces mode exclusivity: applies the latest request, forcing the
/// previous mode through its exit path before installing the new one.
pub fn apply_tool_requests(
    mut requests: EventReader<ToolRequest>,
    mut active: ResMut<ActiveTool>,
    mut entered: EventWriter<ToolEntered>,
    mut exited: EventWriter<ToolExited>,
    mut panels: EventWriter<PanelCommand>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    let (new_mode, enter_event) = match request {
        ToolRequest::Select => (ToolMode::Selecting, Some(ToolEntered::Selecting)),
        ToolRequest::Place(shape) => (ToolMode::Placing, Some(ToolEntered::Placing(shape))),
        ToolRequest::Delete => (ToolMode::Deleting, Some(ToolEntered::Deleting)),
        ToolRequest::Move => (ToolMode::Moving, Some(ToolEntered::Moving)),
        ToolRequest::Rotate => (ToolMode::Rotating, Some(ToolEntered::Rotating)),
        ToolRequest::Scale => (ToolMode::Scaling, Some(ToolEntered::Scaling)),
        ToolRequest::Exit => (ToolMode::Idle, None),
    };

    let old = active.0;
    // Re-requesting placement restarts it with the new shape; every
    // other repeated request is a no-op.
    if new_mode == old && !matches!(request, ToolRequest::Place(_)) {
        return;
    }

    if old != ToolMode::Idle {
        exited.write(ToolExited(old));
    }
    active.0 = new_mode;

    match enter_event {
        Some(event) => {
            entered.write(event);
            panels.write(PanelCommand::ToolEnter);
            panels.write(PanelCommand::ShowDeleteTopPanel(new_mode == ToolMode::Deleting));
        }
        None => {
            panels.write(PanelCommand::ToolExit);
        }
    }
    info!("tool mode {:?} -> {:?}", old, new_mode);
}

/// All tool state, events and per-tick systems. Pointer drivers and
/// gizmo visuals are installed separately so this plugin runs headless.
pub struct ToolsPlugin;

impl Plugin for ToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveTool>()
            .init_resource::<Selection>()
            .init_resource::<PlacementState>()
            .init_resource::<DeleteState>()
            .init_resource::<TransformState>()
            .init_resource::<PlacementContainer>()
            .add_event::<ToolRequest>()
            .add_event::<ToolEntered>()
            .add_event::<ToolExited>()
            .add_event::<PanelCommand>()
            .add_event::<DeleteConfirmed>()
            .add_systems(
                Update,
                (
                    apply_tool_requests,
                    (
                        select::handle_selection_exit,
                        place::handle_placement_exit,
                        delete::handle_delete_exit,
                        transform::handle_transform_exit,
                    ),
                    (
                        select::handle_selection_enter,
                        place::handle_placement_enter,
                        delete::handle_delete_enter,
                        transform::handle_transform_enter,
                    ),
                    select::selection_tick,
                    transform::transform_tick,
                    place::placement_tick,
                    delete::delete_tick,
                )
                    .chain(),
            );
    }
}
