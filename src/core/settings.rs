//! Settings
//!
//! The full configuration surface of the toolkit. Every tool reads its
//! tunables from here; nothing does implicit scene-wide lookups.

use bevy::prelude::*;

use crate::scene::CategoryMask;

// Snap to Grid ///////////////////////////////////////////////////////////////

// Control whether grid snapping is enabled
pub const SNAP_TO_GRID_ENABLED: bool = true;
// The size of the grid to snap to (world units)
pub const SNAP_TO_GRID_VALUE: f32 = 0.2;

// Raycast ////////////////////////////////////////////////////////////////////

/// Pick range for selection and delete
pub const SELECT_RAY_DISTANCE: f32 = 30.0;
/// Long range for placement previews and move-follow
pub const PLACEMENT_RAY_DISTANCE: f32 = 1000.0;

// Placement //////////////////////////////////////////////////////////////////

/// Uniform edge length for freshly spawned primitives
pub const DEFAULT_PRIMITIVE_SIZE: f32 = 1.0;
/// Target edge length for planes (plane meshes use a base edge of 10)
pub const PLANE_EDGE_LENGTH: f32 = 2.0;
/// Generic lift applied above surfaces so objects don't visually fuse
pub const HOVER_OFFSET: f32 = 0.01;
/// Extra lift for planes to dodge z-fighting
pub const PLANE_LIFT: f32 = 0.01;
/// Minimum half thickness a plane is treated as having when stacking
pub const PLANE_MIN_HALF_THICKNESS: f32 = 0.005;

/// How the Move sub-mode treats the vertical coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalMove {
    /// Keep the object's initial height (desktop behavior)
    Locked,
    /// Raise/lower with the stick's vertical axis (controller behavior)
    Stick {
        /// Units per second at full deflection
        rate: f32,
        /// Optional [min, max] clamp on the tracked height
        clamp: Option<[f32; 2]>,
        /// Optional vertical snap step
        step: Option<f32>,
    },
}

#[derive(Resource, Clone, Debug)]
pub struct ToolkitSettings {
    // Raycast
    pub select_ray_distance: f32,
    pub placement_ray_distance: f32,
    pub selectable_mask: CategoryMask,
    pub ground_mask: CategoryMask,
    pub placement_mask: CategoryMask,

    // Grid
    pub snap_to_grid: bool,
    pub grid_size: f32,

    // Placement
    pub default_size: f32,
    pub plane_edge_length: f32,
    pub hover_offset: f32,
    pub plane_lift: f32,
    pub plane_min_half_thickness: f32,
    pub preview_scale_min: f32,
    pub preview_scale_max: f32,

    // Highlighting
    pub highlight_emission: f32,
    pub delete_emission: f32,

    // Stick / axis behavior
    pub stick_deadzone: f32,
    pub scale_speed: f32,
    /// Degrees per second about the world up axis
    pub rotate_speed: f32,
    pub invert_scale: bool,
    pub invert_rotate: bool,

    // Transform
    pub transform_scale_min: f32,
    pub transform_scale_max: f32,
    pub vertical_move: VerticalMove,

    // Guide ray visuals
    pub show_selection_ray: bool,
    pub show_delete_ray: bool,
    pub hide_ray_after_pick: bool,
    pub ray_visual_max_length: f32,
}

impl Default for ToolkitSettings {
    fn default() -> Self {
        Self {
            select_ray_distance: SELECT_RAY_DISTANCE,
            placement_ray_distance: PLACEMENT_RAY_DISTANCE,
            selectable_mask: CategoryMask::SELECTABLE | CategoryMask::PLACEABLE,
            ground_mask: CategoryMask::GROUND,
            placement_mask: CategoryMask::GROUND | CategoryMask::PLACEABLE,
            snap_to_grid: SNAP_TO_GRID_ENABLED,
            grid_size: SNAP_TO_GRID_VALUE,
            default_size: DEFAULT_PRIMITIVE_SIZE,
            plane_edge_length: PLANE_EDGE_LENGTH,
            hover_offset: HOVER_OFFSET,
            plane_lift: PLANE_LIFT,
            plane_min_half_thickness: PLANE_MIN_HALF_THICKNESS,
            preview_scale_min: 0.1,
            preview_scale_max: 5.0,
            highlight_emission: 0.25,
            delete_emission: 0.5,
            stick_deadzone: 0.2,
            scale_speed: 0.8,
            rotate_speed: 90.0,
            invert_scale: false,
            invert_rotate: false,
            transform_scale_min: 0.1,
            transform_scale_max: 10.0,
            vertical_move: VerticalMove::Locked,
            show_selection_ray: true,
            show_delete_ray: true,
            hide_ray_after_pick: true,
            ray_visual_max_length: SELECT_RAY_DISTANCE,
        }
    }
}

impl ToolkitSettings {
    /// Apply command-line overrides on top of the defaults.
    pub fn with_cli_overrides(mut self, cli: &crate::core::cli::CliArgs) -> Self {
        if let Some(g) = cli.grid_size {
            self.grid_size = g;
        }
        if cli.no_snap {
            self.snap_to_grid = false;
        }
        if cli.hand_ray {
            // Controllers get vertical move on the stick by default
            self.vertical_move = VerticalMove::Stick {
                rate: 1.0,
                clamp: None,
                step: None,
            };
        }
        self
    }
}
