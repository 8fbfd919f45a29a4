// Drawing surface used by the round loop and the game-over screen

use std::io;

use crate::board::{Corners, Scoreboard};
use crate::error::GameError;
use crate::types::{Coord, Outcome, PlayerId};

/// What a cell is painted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Border,
    Snake(PlayerId),
    Collision,
}

/// Everything the game-over screen shows
#[derive(Debug)]
pub struct RoundSummary<'a> {
    pub outcome: Outcome,
    pub scoreboard: &'a Scoreboard,
    pub collisions: &'a [Coord],
    pub corners: Corners,
    /// Set when a failure ended the round early
    pub error: Option<&'a GameError>,
}

pub trait Display {
    /// Size of the drawing surface as (width, height) in cells
    fn surface_size(&self) -> io::Result<(u16, u16)>;

    fn clear(&mut self) -> io::Result<()>;

    fn draw_cell(&mut self, pos: Coord, layer: Layer) -> io::Result<()>;

    /// Flushes everything drawn since the last `clear`
    fn present(&mut self) -> io::Result<()>;

    fn show_round_over(&mut self, summary: &RoundSummary<'_>) -> io::Result<()>;
}
