mod app;
mod cli;
mod effects;
mod render;

use darkroom_logging::LogDestination;

fn main() {
    let args: cli::Args = argh::from_env();
    let destination = if args.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    darkroom_logging::initialize(destination);

    if let Err(err) = app::run(args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
