//! Error handling
//!
//! This module provides error handling using anyhow.
//! As an application (not a library), we prioritize ease of use over
//! complex error type hierarchies. Tool-core operations never return
//! errors at all: a missing collaborator (no camera, no surfaces, a
//! destroyed target) degrades that tick's operation to a no-op instead.
//! Only ambient concerns (CLI validation, bindings files) are fallible.

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, ensure, Context, Error};

/// Result type alias for convenience throughout the application
pub type BlockoutResult<T> = anyhow::Result<T>;
