// Players: identity, key bindings and the snake they steer

use std::collections::VecDeque;
use std::sync::Arc;

use crate::input::Key;
use crate::snake::{Heading, Snake};
use crate::types::{Coord, Direction, PlayerId};

/// The four keys a player steers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
}

impl KeyBindings {
    pub fn wasd() -> Self {
        KeyBindings {
            up: Key::Char('w'),
            down: Key::Char('s'),
            left: Key::Char('a'),
            right: Key::Char('d'),
        }
    }

    pub fn arrows() -> Self {
        KeyBindings {
            up: Key::Up,
            down: Key::Down,
            left: Key::Left,
            right: Key::Right,
        }
    }

    /// Maps a key press to a direction, ignoring letter case
    pub fn direction_for(&self, key: Key) -> Option<Direction> {
        if key.matches(self.up) {
            Some(Direction::Up)
        } else if key.matches(self.down) {
            Some(Direction::Down)
        } else if key.matches(self.left) {
            Some(Direction::Left)
        } else if key.matches(self.right) {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Steering handle for one player, handed to the key reader thread
#[derive(Debug, Clone)]
pub struct Controller {
    id: PlayerId,
    bindings: KeyBindings,
    heading: Arc<Heading>,
}

impl Controller {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Turns the snake if `key` is one of this player's bindings; other keys are ignored
    pub fn handle_key(&self, key: Key) {
        if let Some(direction) = self.bindings.direction_for(key) {
            self.heading.change(direction);
        }
    }
}

pub struct Player {
    controller: Controller,
    snake: Snake,
}

impl Player {
    pub fn new(id: PlayerId, bindings: KeyBindings, snake: Snake) -> Self {
        let controller = Controller {
            id,
            bindings,
            heading: snake.heading(),
        };
        Player { controller, snake }
    }

    /// Convenience constructor mirroring a fresh round: a one-cell snake at `start`
    pub fn spawn(
        id: PlayerId,
        bindings: KeyBindings,
        start: Coord,
        heading: Direction,
        length: usize,
        growth_period: u64,
    ) -> Self {
        let snake = Snake::new(start, heading, length).with_growth_period(growth_period);
        Player::new(id, bindings, snake)
    }

    pub fn id(&self) -> PlayerId {
        self.controller.id
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn controller(&self) -> Controller {
        self.controller.clone()
    }

    pub fn handle_key(&self, key: Key) {
        self.controller.handle_key(key);
    }

    /// Advances the snake for frame `tick` and returns its body
    pub fn update(&mut self, tick: u64) -> &VecDeque<Coord> {
        self.snake.advance(tick)
    }
}
