//! Session lifecycle tests
//!
//! Drives whole sessions against the in-memory display: rounds are played at a
//! fast frame rate and a helper thread answers each game-over screen with a key.

mod common;

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use common::{channel_keys, fast_config, FakeDisplay};
use duel_snake::config::Config;
use duel_snake::display::Layer;
use duel_snake::error::GameError;
use duel_snake::input::Key;
use duel_snake::session::{Phase, Session};
use duel_snake::types::{Coord, Outcome, PlayerId};

/// Answers the game-over screens in order, one key per screen
fn answer_round_overs(
    round_over: Receiver<Outcome>,
    keys: Sender<Key>,
    answers: Vec<Key>,
) -> JoinHandle<Vec<Outcome>> {
    thread::spawn(move || {
        let mut seen = Vec::new();
        for answer in answers {
            seen.push(round_over.recv().expect("session stopped showing rounds"));
            keys.send(answer).expect("session stopped reading keys");
        }
        seen
    })
}

#[test]
fn test_head_on_round_is_draw_then_quit() {
    // 20x10 surface: player one starts at (5, 5), player two at (15, 5), both three long
    let (notify, round_over) = mpsc::channel();
    let (keys, key_sender) = channel_keys();
    let display = FakeDisplay::new(20, 10).notifying(notify);

    let mut session = Session::new(fast_config(), display, keys).unwrap();
    assert_eq!(session.phase(), Phase::Idle);

    let answers = answer_round_overs(round_over, key_sender, vec![Key::Char('q')]);
    let scoreboard = session.run().unwrap();

    assert_eq!(answers.join().unwrap(), vec![Outcome::Draw]);
    assert_eq!(scoreboard.draw, 1);
    assert_eq!(scoreboard.total(), 1);
    assert_eq!(session.winner(), Outcome::Draw);
    assert_eq!(session.phase(), Phase::Terminated);
    // Heads meet at (10, 5) on the fifth frame
    assert_eq!(session.frame_count(), 5);

    let display = session.display();
    assert_eq!(display.presents, 5);
    let border = display.frame.iter().filter(|(_, layer)| *layer == Layer::Border).count();
    assert_eq!(border, 2 * 20 + 2 * 8);
    assert!(display.frame.contains(&(Coord::new(10, 5), Layer::Collision)));
    assert!(display.frame.contains(&(Coord::new(8, 5), Layer::Snake(PlayerId::One))));
    assert!(display.frame.contains(&(Coord::new(12, 5), Layer::Snake(PlayerId::Two))));
}

#[test]
fn test_scores_accumulate_across_restarts() {
    let (notify, round_over) = mpsc::channel();
    let (keys, key_sender) = channel_keys();
    let display = FakeDisplay::new(20, 10).notifying(notify);

    let mut session = Session::new(fast_config(), display, keys).unwrap();
    let answers = answer_round_overs(
        round_over,
        key_sender,
        vec![Key::Char('r'), Key::Char('x'), Key::Char('Q')],
    );
    let scoreboard = session.run().unwrap();

    assert_eq!(answers.join().unwrap().len(), 3);
    assert_eq!(scoreboard.draw, 3);
    assert_eq!(scoreboard.total(), 3);
    assert_eq!(session.rounds_played(), 3);

    let tallies: Vec<u32> = session
        .display()
        .summaries
        .iter()
        .map(|s| s.scoreboard.total())
        .collect();
    assert_eq!(tallies, vec![1, 2, 3]);
}

#[test]
fn test_steering_into_wall_loses() {
    let (notify, round_over) = mpsc::channel();
    let (keys, key_sender) = channel_keys();
    let display = FakeDisplay::new(20, 10).notifying(notify);

    // Queued before the round: the reader forwards it as soon as it starts
    key_sender.send(Key::Char('W')).unwrap();

    // Default 20 frames per second leaves the reader plenty of time to turn the snake
    let mut session = Session::new(Config::default_hardcoded(), display, keys).unwrap();
    let answers = answer_round_overs(round_over, key_sender, vec![Key::Char('q')]);
    let scoreboard = session.run().unwrap();

    assert_eq!(answers.join().unwrap(), vec![Outcome::Winner(PlayerId::Two)]);
    assert_eq!(scoreboard.player_two, 1);
    assert_eq!(scoreboard.player_one, 0);
    assert_eq!(scoreboard.total(), 1);
}

#[test]
fn test_mid_round_failure_ends_round_without_winner() {
    let (notify, round_over) = mpsc::channel();
    let (keys, key_sender) = channel_keys();
    let display = FakeDisplay::new(20, 10).failing_present_at(2).notifying(notify);

    let mut session = Session::new(fast_config(), display, keys).unwrap();
    let answers = answer_round_overs(round_over, key_sender, vec![Key::Char('r'), Key::Char('q')]);
    let scoreboard = session.run().unwrap();

    assert_eq!(answers.join().unwrap(), vec![Outcome::NoWinner, Outcome::Draw]);
    assert_eq!(scoreboard.no_winner, 1);
    assert_eq!(scoreboard.draw, 1);
    assert_eq!(scoreboard.total(), 2);

    let summaries = &session.display().summaries;
    let error = summaries[0].error.as_deref().expect("failure should be shown");
    assert!(error.contains("screen went away"));
    assert!(summaries[1].error.is_none());
}

#[test]
fn test_failed_reset_is_tallied_once() {
    let (notify, round_over) = mpsc::channel();
    let (keys, key_sender) = channel_keys();
    // The terminal shrinks below the minimum after the first round
    let display = FakeDisplay::with_sizes(vec![(20, 10), (4, 4)]).notifying(notify);

    let mut session = Session::new(fast_config(), display, keys).unwrap();
    let answers = answer_round_overs(round_over, key_sender, vec![Key::Char('r'), Key::Char('q')]);
    let scoreboard = session.run().unwrap();

    assert_eq!(answers.join().unwrap(), vec![Outcome::Draw, Outcome::NoWinner]);
    assert_eq!(scoreboard.draw, 1);
    assert_eq!(scoreboard.no_winner, 1);
    assert_eq!(scoreboard.total(), 2);
    let summaries = &session.display().summaries;
    assert!(summaries[1].error.as_deref().unwrap().contains("too small"));
    // The draw's crash marks do not linger on the failed round's screen
    assert!(!summaries[0].collisions.is_empty());
    assert!(summaries[1].collisions.is_empty());
}

#[test]
fn test_lost_key_source_is_fatal() {
    let (notify, round_over) = mpsc::channel();
    let (keys, key_sender) = channel_keys();
    let display = FakeDisplay::new(20, 10).notifying(notify);

    let mut session = Session::new(fast_config(), display, keys).unwrap();
    let closer = thread::spawn(move || {
        round_over.recv().unwrap();
        drop(key_sender);
    });

    let result = session.run();
    closer.join().unwrap();

    assert!(matches!(result, Err(GameError::Input(_))));
    assert_eq!(session.scoreboard().total(), 1);
    assert_eq!(session.phase(), Phase::Terminated);
}

#[test]
fn test_setup_failures_propagate() {
    let (keys, _key_sender) = channel_keys();
    let result = Session::new(fast_config(), FakeDisplay::new(4, 4), keys);
    assert!(matches!(result, Err(GameError::Setup(_))));

    let mut config = fast_config();
    config.timing.ticks_per_second = 0;
    let (keys, _key_sender) = channel_keys();
    let result = Session::new(config, FakeDisplay::new(20, 10), keys);
    assert!(matches!(result, Err(GameError::Setup(_))));

    let mut config = fast_config();
    config.controls.player_two.left = "numpad4".to_string();
    let (keys, _key_sender) = channel_keys();
    let result = Session::new(config, FakeDisplay::new(20, 10), keys);
    assert!(matches!(result, Err(GameError::Setup(_))));
}
