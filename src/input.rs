// Background key reader
//
// A single reader thread blocks on the key source and forwards every key to both
// players while the round runs. Stopping is cooperative: the stop flag is only
// checked after a read returns, so the first key read after a stop request is
// not forwarded but handed back to the session together with the key source.

use log::{debug, error};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::GameError;
use crate::player::Controller;

/// A key press as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Esc,
    /// Ctrl-C while the terminal is in raw mode
    Interrupt,
    Other,
}

impl Key {
    /// Parses a key name from the config file: a single character or up/down/left/right/esc
    pub fn parse(name: &str) -> Result<Key, String> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }

        match name.to_lowercase().as_str() {
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "esc" => Ok(Key::Esc),
            _ => Err(format!("Invalid key name: {:?}", name)),
        }
    }

    /// Compares against a binding, ignoring letter case
    pub fn matches(&self, binding: Key) -> bool {
        match (self, binding) {
            (Key::Char(pressed), Key::Char(bound)) => pressed.eq_ignore_ascii_case(&bound),
            (pressed, bound) => *pressed == bound,
        }
    }

    /// Whether this key, pressed after a round, ends the session
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Char('q') | Key::Char('Q') | Key::Interrupt)
    }
}

/// Blocking source of key presses
pub trait KeySource: Send + 'static {
    fn next_key(&mut self) -> io::Result<Key>;
}

/// What the reader thread hands back when it exits
struct Handoff<K> {
    source: K,
    last_key: io::Result<Key>,
}

struct Listener<K> {
    listening: Arc<AtomicBool>,
    handoff: Receiver<Handoff<K>>,
    handle: JoinHandle<()>,
}

enum ReaderState<K> {
    Stopped(K),
    Listening(Listener<K>),
    /// The reader thread died without handing the source back
    Lost,
}

/// Externally visible reader state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderStatus {
    Listening,
    Stopped,
}

pub struct InputReader<K: KeySource> {
    state: ReaderState<K>,
}

impl<K: KeySource> InputReader<K> {
    pub fn new(source: K) -> Self {
        InputReader {
            state: ReaderState::Stopped(source),
        }
    }

    pub fn status(&self) -> ReaderStatus {
        match self.state {
            ReaderState::Listening(_) => ReaderStatus::Listening,
            _ => ReaderStatus::Stopped,
        }
    }

    /// Spawns the reader thread, forwarding keys to `controllers` until stopped
    pub fn start(&mut self, controllers: Vec<Controller>) -> Result<(), GameError> {
        let source = match std::mem::replace(&mut self.state, ReaderState::Lost) {
            ReaderState::Stopped(source) => source,
            other => {
                self.state = other;
                return Err(GameError::Misuse("key reader started while not stopped"));
            }
        };

        let listening = Arc::new(AtomicBool::new(true));
        let (sender, handoff) = mpsc::sync_channel(1);
        let flag = Arc::clone(&listening);

        let handle = thread::spawn(move || read_keys(source, controllers, flag, sender));

        debug!("Key reader listening");
        self.state = ReaderState::Listening(Listener {
            listening,
            handoff,
            handle,
        });
        Ok(())
    }

    /// Asks the reader thread to stop after its current read. Never blocks.
    pub fn request_stop(&self) {
        if let ReaderState::Listening(listener) = &self.state {
            listener.listening.store(false, Ordering::Release);
        }
    }

    /// Stops the reader and returns the first key read after the stop request.
    /// When the reader is not running, reads the next key directly.
    pub fn finish(&mut self) -> Result<Key, GameError> {
        match std::mem::replace(&mut self.state, ReaderState::Lost) {
            ReaderState::Stopped(mut source) => {
                let key = source.next_key();
                self.state = ReaderState::Stopped(source);
                key.map_err(GameError::Input)
            }
            ReaderState::Listening(listener) => {
                listener.listening.store(false, Ordering::Release);

                let handoff = listener.handoff.recv().map_err(|_| {
                    GameError::Input(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        "key reader exited without handing back the key source",
                    ))
                })?;
                if listener.handle.join().is_err() {
                    error!("Key reader thread panicked after handing back its source");
                }

                debug!("Key reader stopped, last key {:?}", handoff.last_key);
                self.state = ReaderState::Stopped(handoff.source);
                handoff.last_key.map_err(GameError::Input)
            }
            ReaderState::Lost => Err(GameError::Misuse("key source is no longer available")),
        }
    }
}

impl<K: KeySource> Drop for InputReader<K> {
    fn drop(&mut self) {
        // A thread blocked in a read cannot be joined; let it exit on the next key
        self.request_stop();
    }
}

fn read_keys<K: KeySource>(
    mut source: K,
    controllers: Vec<Controller>,
    listening: Arc<AtomicBool>,
    sender: SyncSender<Handoff<K>>,
) {
    let last_key = loop {
        match source.next_key() {
            Ok(key) => {
                if !listening.load(Ordering::Acquire) {
                    break Ok(key);
                }
                for controller in &controllers {
                    controller.handle_key(key);
                }
            }
            Err(e) => {
                error!("Key source failed: {}", e);
                break Err(e);
            }
        }
    };

    // The receiver is gone only when the reader itself was dropped
    let _ = sender.send(Handoff { source, last_key });
}
