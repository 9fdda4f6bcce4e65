//! An in-scene 3D authoring toolkit made with the Bevy game engine.

use blockout::core::cli::CliArgs;
use blockout::logger::init_custom_logger;

fn main() {
    let cli_args = CliArgs::parse_args();
    init_custom_logger(cli_args.debug);

    match blockout::create_app(cli_args) {
        Ok(mut app) => {
            app.run();
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}
