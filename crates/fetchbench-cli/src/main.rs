use fetchbench_core::logging;

mod cli;

use crate::cli::Cli;

// Not #[tokio::main]: the async strategy builds its own current-thread runtime.
fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("fetchbench error: {:#}", err);
        std::process::exit(1);
    }
}
