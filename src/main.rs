//! Cryptcrawl - Entry Point
//!
//! Sets up logging and configuration, then hands stdin/stdout to the
//! console driver.

use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;

use cryptcrawl::data::GameConfig;
use cryptcrawl::ui::Console;

const LOG_FILE: &str = "cryptcrawl.log";

fn main() -> ExitCode {
    init_logging();
    log::info!("Starting Cryptcrawl v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config);

    if let Err(e) = console.run() {
        log::error!("Game exited with error: {:#}", e);
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    log::info!("Cryptcrawl shut down cleanly");
    ExitCode::SUCCESS
}

/// Log to a file so log lines never interleave with the game text
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE)
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
}
