// In-memory display and channel-driven key source shared by the integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};

use duel_snake::board::Scoreboard;
use duel_snake::config::Config;
use duel_snake::display::{Display, Layer, RoundSummary};
use duel_snake::input::{Key, KeySource};
use duel_snake::types::{Coord, Outcome};

/// What the fake display saw on a game-over screen
#[derive(Debug, Clone)]
pub struct RecordedSummary {
    pub outcome: Outcome,
    pub scoreboard: Scoreboard,
    pub error: Option<String>,
    pub collisions: Vec<Coord>,
}

pub struct FakeDisplay {
    sizes: Vec<(u16, u16)>,
    size_queries: Cell<usize>,
    pub presents: usize,
    pub frame: Vec<(Coord, Layer)>,
    pub summaries: Vec<RecordedSummary>,
    fail_present_at: Option<usize>,
    round_over: Option<Sender<Outcome>>,
}

impl FakeDisplay {
    pub fn new(width: u16, height: u16) -> Self {
        FakeDisplay {
            sizes: vec![(width, height)],
            size_queries: Cell::new(0),
            presents: 0,
            frame: Vec::new(),
            summaries: Vec::new(),
            fail_present_at: None,
            round_over: None,
        }
    }

    /// Reports each size in turn, then keeps repeating the last one
    pub fn with_sizes(sizes: Vec<(u16, u16)>) -> Self {
        let mut display = FakeDisplay::new(0, 0);
        display.sizes = sizes;
        display
    }

    /// The present call with this zero-based index fails
    pub fn failing_present_at(mut self, index: usize) -> Self {
        self.fail_present_at = Some(index);
        self
    }

    /// Sends the outcome on `notify` every time the game-over screen is shown
    pub fn notifying(mut self, notify: Sender<Outcome>) -> Self {
        self.round_over = Some(notify);
        self
    }
}

impl Display for FakeDisplay {
    fn surface_size(&self) -> io::Result<(u16, u16)> {
        let index = self.size_queries.get();
        self.size_queries.set(index + 1);
        Ok(self.sizes[index.min(self.sizes.len() - 1)])
    }

    fn clear(&mut self) -> io::Result<()> {
        self.frame.clear();
        Ok(())
    }

    fn draw_cell(&mut self, pos: Coord, layer: Layer) -> io::Result<()> {
        self.frame.push((pos, layer));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let index = self.presents;
        self.presents += 1;
        if self.fail_present_at == Some(index) {
            return Err(io::Error::new(io::ErrorKind::Other, "screen went away"));
        }
        Ok(())
    }

    fn show_round_over(&mut self, summary: &RoundSummary<'_>) -> io::Result<()> {
        self.summaries.push(RecordedSummary {
            outcome: summary.outcome,
            scoreboard: *summary.scoreboard,
            error: summary.error.map(|e| e.to_string()),
            collisions: summary.collisions.to_vec(),
        });
        if let Some(notify) = &self.round_over {
            let _ = notify.send(summary.outcome);
        }
        Ok(())
    }
}

/// Key source fed from a channel; a closed channel reads as a failed device
pub struct ChannelKeys(Receiver<Key>);

impl KeySource for ChannelKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        self.0
            .recv()
            .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "key channel closed"))
    }
}

pub fn channel_keys() -> (ChannelKeys, Sender<Key>) {
    let (sender, receiver) = mpsc::channel();
    (ChannelKeys(receiver), sender)
}

/// Default config with a fast frame rate so rounds finish quickly
pub fn fast_config() -> Config {
    let mut config = Config::default_hardcoded();
    config.timing.ticks_per_second = 200;
    config
}
