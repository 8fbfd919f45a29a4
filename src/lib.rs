// Library exports for the two-player snake duel
// The binary wires these to the terminal; tests drive them with in-memory fakes

pub mod board;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod input;
pub mod player;
pub mod round_log;
pub mod session;
pub mod snake;
pub mod terminal;
pub mod types;
