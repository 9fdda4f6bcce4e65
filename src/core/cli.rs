use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

use crate::core::errors::{bail, BlockoutResult};

/// Blockout scene authoring toolkit command line interface
#[derive(Parser, Debug, Clone, Resource)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Drive the pointer from a tracked hand anchor instead of the mouse cursor
    #[arg(long = "hand", default_value_t = false)]
    pub hand_ray: bool,

    /// Grid size for placement/move snapping (world units)
    #[arg(long = "grid-size")]
    pub grid_size: Option<f32>,

    /// Disable grid snapping entirely
    #[arg(long = "no-snap", default_value_t = false)]
    pub no_snap: bool,

    /// Path to a JSON input bindings file
    #[arg(long = "bindings")]
    pub bindings_path: Option<PathBuf>,

    /// Display debug information
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations before the app starts
    pub fn validate(&self) -> BlockoutResult<()> {
        if let Some(g) = self.grid_size {
            if !g.is_finite() || g <= 0.0 {
                bail!("--grid-size must be a positive number, got {g}");
            }
        }
        if let Some(path) = &self.bindings_path {
            if !path.exists() {
                bail!("bindings file not found: {}", path.display());
            }
        }
        Ok(())
    }
}
