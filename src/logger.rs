//! Log output setup
//!
//! Tracing output tuned for the toolkit binary: timestamps are dropped
//! so mode switches and placement logs read as a clean transcript, wgpu
//! and winit chatter is filtered down to warnings, and `--debug` raises
//! the crate's own level to debug.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;

pub fn init_custom_logger(debug: bool) {
    // Timestamp formatter that prints nothing
    struct NoTime;
    impl FormatTime for NoTime {
        fn format_time(
            &self,
            _: &mut tracing_subscriber::fmt::format::Writer<'_>,
        ) -> std::fmt::Result {
            Ok(())
        }
    }

    let format = format()
        .with_timer(NoTime)
        .with_level(true)
        .with_target(true)
        .with_ansi(true);

    let crate_directive = if debug {
        "blockout=debug"
    } else {
        "blockout=info"
    };
    let filter = EnvFilter::from_default_env()
        .add_directive("info".parse().unwrap())
        .add_directive("wgpu_core=warn".parse().unwrap())
        .add_directive("wgpu_hal=warn".parse().unwrap())
        .add_directive("winit=warn".parse().unwrap())
        .add_directive(crate_directive.parse().unwrap());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_filter(filter),
        )
        .init();
}
