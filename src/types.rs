// Core value types shared by every part of the engine

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// 2D cell on the terminal grid. `y` grows downwards.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

// Row-major: compare y first, then x
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Heading of a snake. `None` means the snake stands still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions, including `None`
    pub fn all() -> [Direction; 5] {
        [
            Direction::None,
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// Returns the direction pointing the other way. `None` is its own opposite.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
            Direction::None => *coord,
        }
    }
}

/// Identity of one of the two players
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn number(&self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Result of evaluating one tick for collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nobody collided; the round continues
    None,
    Player1Lost,
    Player2Lost,
    /// Both players collided in the same tick
    Draw,
}

impl Verdict {
    pub fn from_collisions(player_one_collided: bool, player_two_collided: bool) -> Verdict {
        match (player_one_collided, player_two_collided) {
            (true, true) => Verdict::Draw,
            (true, false) => Verdict::Player1Lost,
            (false, true) => Verdict::Player2Lost,
            (false, false) => Verdict::None,
        }
    }

    pub fn is_decided(&self) -> bool {
        *self != Verdict::None
    }
}

/// How a round ended, as tallied on the scoreboard
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NoWinner,
    Draw,
    Winner(PlayerId),
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::None => Outcome::NoWinner,
            Verdict::Draw => Outcome::Draw,
            Verdict::Player1Lost => Outcome::Winner(PlayerId::Two),
            Verdict::Player2Lost => Outcome::Winner(PlayerId::One),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoWinner => write!(f, "no winner"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Winner(id) => write!(f, "{} won", id),
        }
    }
}
