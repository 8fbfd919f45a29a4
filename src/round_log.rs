// Round logging module
//
// Appends one JSON line per finished round so a session can be inspected
// afterwards. Write failures are logged and never interrupt the game.

use log::error;
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::board::Scoreboard;
use crate::types::Outcome;

/// Represents a single round log entry
#[derive(Debug, Serialize)]
struct RoundLogEntry<'a> {
    round: u32,
    outcome: Outcome,
    frames: u64,
    scoreboard: &'a Scoreboard,
    error: Option<String>,
    timestamp: String,
}

/// Round logger state, owned by the session and written from the tick-loop thread
pub struct RoundLogger {
    file: Mutex<Option<File>>,
    enabled: bool,
}

impl RoundLogger {
    /// Creates a new round logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return RoundLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Round logging enabled: {}", log_file_path);
                RoundLogger {
                    file: Mutex::new(Some(file)),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create round log file '{}': {}", log_file_path, e);
                RoundLogger::disabled()
            }
        }
    }

    /// Creates a disabled round logger (no-op)
    pub fn disabled() -> Self {
        RoundLogger {
            file: Mutex::new(None),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Writes the result of a finished round
    pub fn log_round(
        &self,
        round: u32,
        outcome: Outcome,
        frames: u64,
        scoreboard: &Scoreboard,
        error: Option<String>,
    ) {
        if !self.enabled {
            return;
        }

        let mut file_guard = self.file.lock();
        let file = match file_guard.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = RoundLogEntry {
            round,
            outcome,
            frames,
            scoreboard,
            error,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                let line_with_newline = format!("{}\n", json_line);
                if let Err(e) = file.write_all(line_with_newline.as_bytes()) {
                    error!("Failed to write round log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush round log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize round log entry: {}", e);
            }
        }
    }
}
