//! Blockout
//!
//! An in-scene 3D authoring toolkit: ray-driven tools for selecting,
//! placing, deleting and transforming primitive objects, with visual
//! feedback and grid snapping. The same tools run against a screen
//! cursor or a tracked hand ray.

pub mod core;
pub mod feedback;
pub mod logger;
pub mod pointer;
pub mod scene;
pub mod theme;
pub mod tools;
pub mod ui;

#[cfg(test)]
mod tests;

pub use crate::core::{create_app, BlockoutResult, CliArgs, ToolkitSettings};
