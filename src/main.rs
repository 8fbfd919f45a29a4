use log::{error, info};
use std::env;
use std::fs::OpenOptions;
use std::process;

use duel_snake::board::Scoreboard;
use duel_snake::config::Config;
use duel_snake::error::GameError;
use duel_snake::round_log::RoundLogger;
use duel_snake::session::Session;
use duel_snake::terminal::{TerminalDisplay, TerminalKeys};

fn main() {
    // Load configuration once at startup
    let config = Config::load_or_default();
    init_logging(&config);

    info!("Starting duel snake...");

    let round_log = RoundLogger::new(config.debug.enabled, &config.debug.log_file_path);
    let exit_code = match play(config, round_log) {
        Ok(scoreboard) => {
            info!("Final scoreboard: {:?}", scoreboard);
            0
        }
        Err(e) => {
            error!("Session failed: {}", e);
            eprintln!("duel-snake: {}", e);
            1
        }
    };

    process::exit(exit_code);
}

// The terminal is restored when the session (and its display) is dropped at the end
// of this function, before anything is printed to stderr.
fn play(config: Config, round_log: RoundLogger) -> Result<Scoreboard, GameError> {
    let display = TerminalDisplay::new()
        .map_err(|e| GameError::Setup(format!("terminal unavailable: {}", e)))?;
    let mut session = Session::new(config, display, TerminalKeys::new())?.with_round_log(round_log);
    session.run()
}

fn init_logging(config: &Config) {
    // We default to the configured level. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", &config.logging.level);
    }

    let mut builder = env_logger::Builder::from_default_env();

    // The game owns the terminal, so log lines go to a file
    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file_path)
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!(
                "Warning: Could not open log file {} ({}), logging disabled",
                config.logging.file_path, e
            );
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.init();
}
