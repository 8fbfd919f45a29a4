// Fixed-rate round loop
//
// Each frame advances both snakes, asks the board for a verdict, draws the frame
// and then sleeps for whatever is left of the tick interval. The loop ends on
// the first frame with a decided verdict.

use log::{debug, info};
use std::thread;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::display::{Display, Layer};
use crate::error::GameError;
use crate::player::Player;
use crate::types::Verdict;

pub struct RoundEngine {
    tick_interval: Duration,
    frame_count: u64,
}

impl RoundEngine {
    pub fn new(tick_interval: Duration) -> Self {
        RoundEngine {
            tick_interval,
            frame_count: 0,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Frames played in the current round
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn reset(&mut self) {
        self.frame_count = 0;
    }

    /// Advances both players for the current frame and returns the board's verdict.
    /// Does not count the frame; `run` does that once the frame is drawn.
    pub fn update(
        &self,
        player_one: &mut Player,
        player_two: &mut Player,
        board: &mut Board,
    ) -> Verdict {
        let tick = self.frame_count;
        let one = player_one.update(tick);
        let two = player_two.update(tick);
        board.evaluate(one, two)
    }

    /// Plays frames until a verdict is reached
    pub fn run<D: Display>(
        &mut self,
        player_one: &mut Player,
        player_two: &mut Player,
        board: &mut Board,
        display: &mut D,
    ) -> Result<Verdict, GameError> {
        info!("Round started");

        loop {
            let start_time = Instant::now();

            let verdict = self.update(player_one, player_two, board);
            render(display, player_one, player_two, board).map_err(GameError::Display)?;

            let elapsed = start_time.elapsed();
            thread::sleep(self.tick_interval.saturating_sub(elapsed));
            self.frame_count += 1;

            if verdict.is_decided() {
                info!("Round over after {} frames: {:?}", self.frame_count, verdict);
                return Ok(verdict);
            }

            if self.frame_count % 100 == 0 {
                debug!("Frame {} (last frame took {:?})", self.frame_count, elapsed);
            }
        }
    }
}

fn render<D: Display>(
    display: &mut D,
    player_one: &Player,
    player_two: &Player,
    board: &Board,
) -> std::io::Result<()> {
    display.clear()?;

    for cell in board.geometry().border_cells() {
        display.draw_cell(cell, Layer::Border)?;
    }
    for player in [player_one, player_two] {
        for cell in player.snake().body() {
            display.draw_cell(*cell, Layer::Snake(player.id()))?;
        }
    }
    for cell in board.collisions() {
        display.draw_cell(*cell, Layer::Collision)?;
    }

    display.present()
}
