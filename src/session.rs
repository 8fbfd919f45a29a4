// Session: repeated rounds, scoring and the replay prompt
//
// A session plays a round, tallies its outcome exactly once, shows the game-over
// screen and waits for the next key: q quits, anything else starts a new round.
// Failures before the first round propagate to the caller. Once a round has
// started, non-fatal failures end that round with no winner and the replay
// prompt is still offered.

use log::{info, warn};

use crate::board::{Board, Geometry, Scoreboard};
use crate::config::Config;
use crate::display::{Display, RoundSummary};
use crate::engine::RoundEngine;
use crate::error::GameError;
use crate::input::{InputReader, KeySource};
use crate::player::{KeyBindings, Player};
use crate::round_log::RoundLogger;
use crate::types::{Direction, Outcome, PlayerId};

/// Lifecycle of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    RoundOver,
    AwaitingReplay,
    Terminated,
}

pub struct Session<D: Display, K: KeySource> {
    config: Config,
    display: D,
    reader: InputReader<K>,
    board: Board,
    bindings: [KeyBindings; 2],
    player_one: Player,
    player_two: Player,
    engine: RoundEngine,
    round_log: RoundLogger,
    phase: Phase,
    game_over: bool,
    winner: Outcome,
    started: bool,
    rounds_played: u32,
}

impl<D: Display, K: KeySource> Session<D, K> {
    /// Validates the configuration and lays out the first round
    pub fn new(config: Config, display: D, keys: K) -> Result<Self, GameError> {
        config.timing.validate().map_err(GameError::Setup)?;
        let bindings = [
            config.controls.player_one.to_bindings().map_err(GameError::Setup)?,
            config.controls.player_two.to_bindings().map_err(GameError::Setup)?,
        ];

        let (width, height) = display.surface_size().map_err(GameError::Display)?;
        let board = Board::new(Geometry::from_surface(width, height)?);
        let (player_one, player_two) = spawn_players(&config, &bindings, board.geometry());
        info!(
            "Session ready on a {}x{} surface, {:?} per frame",
            width,
            height,
            config.timing.tick_interval()
        );

        Ok(Session {
            engine: RoundEngine::new(config.timing.tick_interval()),
            round_log: RoundLogger::disabled(),
            config,
            display,
            reader: InputReader::new(keys),
            board,
            bindings,
            player_one,
            player_two,
            phase: Phase::Idle,
            game_over: false,
            winner: Outcome::NoWinner,
            started: false,
            rounds_played: 0,
        })
    }

    pub fn with_round_log(mut self, round_log: RoundLogger) -> Self {
        self.round_log = round_log;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        self.board.scoreboard()
    }

    /// Outcome of the current or last round
    pub fn winner(&self) -> Outcome {
        self.winner
    }

    pub fn frame_count(&self) -> u64 {
        self.engine.frame_count()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Plays rounds until a player quits and returns the final scoreboard
    pub fn run(&mut self) -> Result<Scoreboard, GameError> {
        loop {
            let failure = match self.play_round() {
                Ok(()) => None,
                Err(e) if !self.started || e.is_fatal() => {
                    self.reader.request_stop();
                    self.phase = Phase::Terminated;
                    return Err(e);
                }
                Err(e) => {
                    warn!("Round {} failed: {}", self.rounds_played + 1, e);
                    if !self.game_over {
                        self.conclude(Outcome::NoWinner, Some(&e));
                    }
                    Some(e)
                }
            };

            // Stop before the game-over screen so that only keys pressed after it decide
            self.reader.request_stop();
            if let Err(e) = self.show_round_over(failure.as_ref()) {
                self.phase = Phase::Terminated;
                return Err(e);
            }

            self.phase = Phase::AwaitingReplay;
            let key = match self.reader.finish() {
                Ok(key) => key,
                Err(e) => {
                    self.phase = Phase::Terminated;
                    return Err(e);
                }
            };

            if key.is_quit() {
                info!("Quit after {} rounds: {:?}", self.rounds_played, self.scoreboard());
                self.phase = Phase::Terminated;
                return Ok(*self.scoreboard());
            }
            info!("Restarting on {:?}", key);
        }
    }

    fn play_round(&mut self) -> Result<(), GameError> {
        if self.started {
            self.reset()?;
        }

        self.reader
            .start(vec![self.player_one.controller(), self.player_two.controller()])?;
        self.started = true;
        self.phase = Phase::Running;

        let verdict = self.engine.run(
            &mut self.player_one,
            &mut self.player_two,
            &mut self.board,
            &mut self.display,
        )?;
        self.conclude(verdict.into(), None);
        Ok(())
    }

    /// Records the round outcome. Later calls within the same round are ignored.
    fn conclude(&mut self, outcome: Outcome, error: Option<&GameError>) {
        if self.game_over {
            return;
        }

        self.game_over = true;
        self.winner = outcome;
        self.rounds_played += 1;
        self.board.record(outcome);
        self.phase = Phase::RoundOver;

        info!("Round {} ended: {}", self.rounds_played, outcome);
        self.round_log.log_round(
            self.rounds_played,
            outcome,
            self.engine.frame_count(),
            self.board.scoreboard(),
            error.map(|e| e.to_string()),
        );
    }

    fn show_round_over(&mut self, error: Option<&GameError>) -> Result<(), GameError> {
        let summary = RoundSummary {
            outcome: self.winner,
            scoreboard: self.board.scoreboard(),
            collisions: self.board.collisions(),
            corners: self.board.geometry().corners(),
            error,
        };
        self.display
            .show_round_over(&summary)
            .map_err(GameError::Display)
    }

    /// Fresh players and layout for the next round; the scoreboard carries over
    fn reset(&mut self) -> Result<(), GameError> {
        self.phase = Phase::Idle;
        self.game_over = false;
        self.winner = Outcome::NoWinner;
        self.engine.reset();

        let (width, height) = self.display.surface_size().map_err(GameError::Display)?;
        self.board.reset(width, height)?;

        let (player_one, player_two) =
            spawn_players(&self.config, &self.bindings, self.board.geometry());
        self.player_one = player_one;
        self.player_two = player_two;
        Ok(())
    }
}

fn spawn_players(
    config: &Config,
    bindings: &[KeyBindings; 2],
    geometry: &Geometry,
) -> (Player, Player) {
    let length = config.snake.initial_length(geometry.initial_width());
    let growth_period = config.timing.growth_period_ticks();

    let player_one = Player::spawn(
        PlayerId::One,
        bindings[0],
        geometry.start_for(PlayerId::One),
        Direction::Right,
        length,
        growth_period,
    );
    let player_two = Player::spawn(
        PlayerId::Two,
        bindings[1],
        geometry.start_for(PlayerId::Two),
        Direction::Left,
        length,
        growth_period,
    );
    (player_one, player_two)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Layer;
    use crate::input::Key;
    use crate::types::Coord;
    use std::io;

    struct BlankDisplay;

    impl Display for BlankDisplay {
        fn surface_size(&self) -> io::Result<(u16, u16)> {
            Ok((20, 10))
        }

        fn clear(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn draw_cell(&mut self, _pos: Coord, _layer: Layer) -> io::Result<()> {
            Ok(())
        }

        fn present(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn show_round_over(&mut self, _summary: &RoundSummary<'_>) -> io::Result<()> {
            Ok(())
        }
    }

    struct NoKeys;

    impl KeySource for NoKeys {
        fn next_key(&mut self) -> io::Result<Key> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no keys"))
        }
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = Session::new(Config::default_hardcoded(), BlankDisplay, NoKeys).unwrap();
        assert_eq!(session.phase(), Phase::Idle);

        session.conclude(Outcome::Draw, None);
        session.phase = Phase::AwaitingReplay;

        session.reset().unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.winner(), Outcome::NoWinner);
        assert_eq!(session.frame_count(), 0);
        assert_eq!(session.scoreboard().draw, 1);
    }

    #[test]
    fn test_outcome_is_tallied_once_per_round() {
        let mut session = Session::new(Config::default_hardcoded(), BlankDisplay, NoKeys).unwrap();

        session.conclude(Outcome::Winner(PlayerId::One), None);
        session.conclude(Outcome::NoWinner, None);
        assert_eq!(session.phase(), Phase::RoundOver);
        assert_eq!(session.winner(), Outcome::Winner(PlayerId::One));
        assert_eq!(session.scoreboard().total(), 1);
        assert_eq!(session.rounds_played(), 1);
    }
}
