// Snake body and heading
//
// The body is only ever touched by the tick loop. The heading is shared with the
// background key reader, so it lives behind a read-mostly lock that both sides
// hold through an `Arc<Heading>`.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::types::{Coord, Direction};

/// Growth period in ticks at the default 20 ticks per second (one segment every 2 seconds)
pub const DEFAULT_GROWTH_PERIOD: u64 = 40;

/// Current direction of a snake, safe to read and write from different threads
#[derive(Debug)]
pub struct Heading {
    direction: RwLock<Direction>,
}

impl Heading {
    pub fn new(direction: Direction) -> Self {
        Heading {
            direction: RwLock::new(direction),
        }
    }

    pub fn get(&self) -> Direction {
        *self.direction.read()
    }

    /// Turns to `new_dir` unless it points straight back into the neck
    pub fn change(&self, new_dir: Direction) {
        let mut direction = self.direction.write();
        if new_dir != direction.opposite() {
            *direction = new_dir;
        }
    }
}

/// A snake: body with the head at index 0, a target length and a shared heading
#[derive(Debug)]
pub struct Snake {
    body: VecDeque<Coord>,
    length: usize,
    growth_period: u64,
    heading: Arc<Heading>,
}

impl Snake {
    /// Creates a one-cell snake at `start`. A target length of zero is treated as one.
    pub fn new(start: Coord, heading: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_front(start);

        Snake {
            body,
            length: length.max(1),
            growth_period: DEFAULT_GROWTH_PERIOD,
            heading: Arc::new(Heading::new(heading)),
        }
    }

    /// Grow by one segment every `period` ticks instead of the default
    pub fn with_growth_period(mut self, period: u64) -> Self {
        self.growth_period = period.max(1);
        self
    }

    pub fn head(&self) -> Coord {
        // Never empty: created with one cell, and advance pushes before it can drain
        self.body[0]
    }

    /// Body including the head
    pub fn body(&self) -> &VecDeque<Coord> {
        &self.body
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.heading.get()
    }

    pub fn heading(&self) -> Arc<Heading> {
        Arc::clone(&self.heading)
    }

    pub fn change_direction(&self, new_dir: Direction) {
        self.heading.change(new_dir);
    }

    /// Moves the snake one cell along its heading for frame `tick`.
    ///
    /// Every `growth_period` ticks (never on tick 0) the target length grows by one.
    /// The tail is dropped whenever the body is already at the target length, so
    /// the body never outgrows it.
    pub fn advance(&mut self, tick: u64) -> &VecDeque<Coord> {
        if tick > 0 && tick % self.growth_period == 0 {
            self.length += 1;
        }

        let next = self.heading.get().apply(&self.head());

        while self.body.len() >= self.length {
            self.body.pop_back();
        }
        self.body.push_front(next);

        &self.body
    }
}
