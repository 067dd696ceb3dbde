use winks_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // File logging when the state dir is writable, else stderr.
    match logging::init_logging() {
        Ok(path) => tracing::debug!(path = %path.display(), "logging to file"),
        Err(err) => {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable: {err:#}");
        }
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("winks error: {:#}", err);
        std::process::exit(1);
    }
}
