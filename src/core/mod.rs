//! Core application functionality
//!
//! Application assembly, command line interface, configuration and the
//! shared error type.

pub mod app;
pub mod cli;
pub mod errors;
pub mod settings;

pub use app::create_app;
pub use cli::CliArgs;
pub use errors::BlockoutResult;
pub use settings::ToolkitSettings;
