// Arena geometry, collision detection and the running scoreboard

use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

use crate::error::GameError;
use crate::types::{Coord, Outcome, PlayerId, Verdict};

pub const MIN_SURFACE_WIDTH: u16 = 8;
pub const MIN_SURFACE_HEIGHT: u16 = 5;

/// Playable rectangle: `left <= x < left + width`, `top <= y < top + height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Arena {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Arena { left, top, width, height }
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= self.left
            && coord.x < self.left + self.width
            && coord.y >= self.top
            && coord.y < self.top + self.height
    }
}

/// The four corners of the drawing surface, outermost border cells included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub top_left: Coord,
    pub top_right: Coord,
    pub bottom_left: Coord,
    pub bottom_right: Coord,
}

/// Layout of one round: an arena framed by a one-cell border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    arena: Arena,
    player_one_start: Coord,
    player_two_start: Coord,
    initial_width: i32,
    initial_height: i32,
}

impl Geometry {
    /// Lays out a round on a `width` x `height` drawing surface
    pub fn from_surface(width: u16, height: u16) -> Result<Self, GameError> {
        if width < MIN_SURFACE_WIDTH || height < MIN_SURFACE_HEIGHT {
            return Err(GameError::Setup(format!(
                "surface of {}x{} is too small, need at least {}x{}",
                width, height, MIN_SURFACE_WIDTH, MIN_SURFACE_HEIGHT
            )));
        }

        let (width, height) = (i32::from(width), i32::from(height));
        Ok(Self::around(Arena::new(1, 1, width - 2, height - 2)))
    }

    /// Lays out a round whose border sits directly outside `arena`
    pub fn around(arena: Arena) -> Self {
        let surface_left = arena.left - 1;
        let surface_top = arena.top - 1;
        let surface_width = arena.width + 2;
        let surface_height = arena.height + 2;

        let quarter_x = surface_width / 4;
        let half_y = surface_top + surface_height / 2;

        Geometry {
            arena,
            player_one_start: Coord::new(surface_left + quarter_x, half_y),
            player_two_start: Coord::new(surface_left + quarter_x * 3, half_y),
            initial_width: surface_width - 3,
            initial_height: surface_height - 3,
        }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn start_for(&self, id: PlayerId) -> Coord {
        match id {
            PlayerId::One => self.player_one_start,
            PlayerId::Two => self.player_two_start,
        }
    }

    pub fn initial_width(&self) -> i32 {
        self.initial_width
    }

    pub fn initial_height(&self) -> i32 {
        self.initial_height
    }

    pub fn corners(&self) -> Corners {
        let left = self.arena.left - 1;
        let top = self.arena.top - 1;
        let right = self.arena.left + self.arena.width;
        let bottom = self.arena.top + self.arena.height;

        Corners {
            top_left: Coord::new(left, top),
            top_right: Coord::new(right, top),
            bottom_left: Coord::new(left, bottom),
            bottom_right: Coord::new(right, bottom),
        }
    }

    /// Every cell of the surrounding border, row by row
    pub fn border_cells(&self) -> Vec<Coord> {
        let corners = self.corners();
        let (left, right) = (corners.top_left.x, corners.top_right.x);
        let (top, bottom) = (corners.top_left.y, corners.bottom_left.y);

        let mut cells = Vec::new();
        for y in top..=bottom {
            if y == top || y == bottom {
                cells.extend((left..=right).map(|x| Coord::new(x, y)));
            } else {
                cells.push(Coord::new(left, y));
                cells.push(Coord::new(right, y));
            }
        }
        cells
    }
}

/// Cumulative round tally. Every outcome is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub no_winner: u32,
    pub draw: u32,
    pub player_one: u32,
    pub player_two: u32,
}

impl Scoreboard {
    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::NoWinner => self.no_winner,
            Outcome::Draw => self.draw,
            Outcome::Winner(PlayerId::One) => self.player_one,
            Outcome::Winner(PlayerId::Two) => self.player_two,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        let slot = match outcome {
            Outcome::NoWinner => &mut self.no_winner,
            Outcome::Draw => &mut self.draw,
            Outcome::Winner(PlayerId::One) => &mut self.player_one,
            Outcome::Winner(PlayerId::Two) => &mut self.player_two,
        };
        *slot += 1;
    }

    /// Number of rounds tallied so far
    pub fn total(&self) -> u32 {
        self.no_winner + self.draw + self.player_one + self.player_two
    }
}

pub struct Board {
    geometry: Geometry,
    collisions: Vec<Coord>,
    scoreboard: Scoreboard,
}

impl Board {
    pub fn new(geometry: Geometry) -> Self {
        Board {
            geometry,
            collisions: Vec::new(),
            scoreboard: Scoreboard::default(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Cells where a head collided during the last evaluation
    pub fn collisions(&self) -> &[Coord] {
        &self.collisions
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.scoreboard.record(outcome);
    }

    /// Clears collision marks and lays the board out again for a new round.
    /// The scoreboard is kept. On error the previous layout stays in place,
    /// but the collision marks are cleared either way.
    pub fn reset(&mut self, surface_width: u16, surface_height: u16) -> Result<(), GameError> {
        self.collisions.clear();
        self.geometry = Geometry::from_surface(surface_width, surface_height)?;
        Ok(())
    }

    /// Checks both freshly moved snakes against the border, themselves and each other.
    ///
    /// Both players are judged from the same snapshot before a verdict is formed,
    /// so heads meeting on one cell, or swapping cells, collide for both.
    pub fn evaluate(
        &mut self,
        player_one: &VecDeque<Coord>,
        player_two: &VecDeque<Coord>,
    ) -> Verdict {
        let one_collided = self.check_player(player_one, player_two);
        let two_collided = self.check_player(player_two, player_one);

        let verdict = Verdict::from_collisions(one_collided, two_collided);
        if verdict.is_decided() {
            debug!("Collision verdict {:?} at {:?}", verdict, self.collisions);
        }
        verdict
    }

    fn check_player(&mut self, body: &VecDeque<Coord>, other: &VecDeque<Coord>) -> bool {
        let head = match body.front() {
            Some(head) => *head,
            None => return false,
        };

        let hit_border = !self.geometry.arena.contains(&head);
        let hit_self = body.iter().skip(1).any(|cell| *cell == head);
        let hit_other = other.contains(&head);

        let collided = hit_border || hit_self || hit_other;
        if collided {
            self.collisions.push(head);
        }
        collided
    }
}
