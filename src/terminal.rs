// crossterm backed display and key source
//
// The display owns the terminal: raw mode, alternate screen and a hidden cursor
// are set up on creation and restored on drop.

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::{debug, error};
use std::io::{self, Stdout, Write};

use crate::display::{Display, Layer, RoundSummary};
use crate::input::{Key, KeySource};
use crate::types::{Coord, Outcome, PlayerId};

const HELP_TEXT: &str = "PRESS 'q' TO QUIT, ANY OTHER KEY TO RESTART";

pub struct TerminalDisplay {
    out: Stdout,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(TerminalDisplay { out })
    }

    fn color_for(layer: Layer) -> Color {
        match layer {
            Layer::Border => Color::White,
            Layer::Snake(PlayerId::One) => Color::Green,
            Layer::Snake(PlayerId::Two) => Color::Blue,
            Layer::Collision => Color::Red,
        }
    }

    fn print_at(
        &mut self,
        pos: Coord,
        text: &str,
        foreground: Color,
        background: Color,
    ) -> io::Result<()> {
        if pos.x < 0 || pos.y < 0 {
            return Ok(());
        }
        queue!(
            self.out,
            MoveTo(pos.x as u16, pos.y as u16),
            SetForegroundColor(foreground),
            SetBackgroundColor(background),
            Print(text),
            ResetColor
        )
    }
}

/// Character of an overlay text that sits on `cell`, if any
fn text_under(texts: &[(Coord, &str)], cell: Coord) -> Option<char> {
    texts.iter().find_map(|(pos, text)| {
        if pos.y != cell.y || cell.x < pos.x {
            return None;
        }
        text.chars().nth((cell.x - pos.x) as usize)
    })
}

fn outcome_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Winner(PlayerId::One) => "GREEN WON!",
        Outcome::Winner(PlayerId::Two) => "BLUE WON!",
        Outcome::Draw => "IT WAS A DRAW!",
        Outcome::NoWinner => "THE GAME ENDED WITH NO WINNER.",
    }
}

impl Display for TerminalDisplay {
    fn surface_size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All))
    }

    fn draw_cell(&mut self, pos: Coord, layer: Layer) -> io::Result<()> {
        if pos.x < 0 || pos.y < 0 {
            return Ok(());
        }
        queue!(
            self.out,
            MoveTo(pos.x as u16, pos.y as u16),
            SetBackgroundColor(Self::color_for(layer)),
            Print(' '),
            ResetColor
        )
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn show_round_over(&mut self, summary: &RoundSummary<'_>) -> io::Result<()> {
        let corners = summary.corners;
        let score = summary.scoreboard;

        let winner_text = outcome_text(summary.outcome);
        let mut scoreboard_text = format!(
            "SCOREBOARD: GREEN {}, BLUE {}",
            score.player_one, score.player_two
        );
        if score.draw > 0 {
            scoreboard_text.push_str(&format!(", DRAW {}", score.draw));
        }

        let winner_pos = Coord::new(corners.top_left.x + 1, corners.top_left.y);
        let scoreboard_pos = Coord::new(
            corners.top_right.x - scoreboard_text.len() as i32,
            corners.top_right.y,
        );
        let help_pos = Coord::new(
            corners.bottom_right.x - HELP_TEXT.len() as i32,
            corners.bottom_right.y,
        );

        let texts = [
            (winner_pos, winner_text),
            (scoreboard_pos, scoreboard_text.as_str()),
            (help_pos, HELP_TEXT),
        ];
        for (pos, text) in texts {
            self.print_at(pos, text, Color::Black, Color::White)?;
        }

        // A crash under the overlay keeps its letter, drawn in the collision color
        for cell in summary.collisions {
            match text_under(&texts, *cell) {
                Some(ch) => self.print_at(*cell, &ch.to_string(), Color::White, Color::Red)?,
                None => self.draw_cell(*cell, Layer::Collision)?,
            }
        }

        if let Some(err) = summary.error {
            let error_pos = Coord::new(corners.bottom_left.x + 1, corners.bottom_left.y);
            self.print_at(error_pos, &format!("ERROR: {}", err), Color::White, Color::Red)?;
        }

        self.out.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, ResetColor, Show, LeaveAlternateScreen) {
            error!("Failed to restore terminal screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Reads key presses from the terminal, skipping releases and non-key events
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        TerminalKeys
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        return Ok(Key::Interrupt);
                    }
                    return Ok(match key.code {
                        KeyCode::Char(c) => Key::Char(c),
                        KeyCode::Up => Key::Up,
                        KeyCode::Down => Key::Down,
                        KeyCode::Left => Key::Left,
                        KeyCode::Right => Key::Right,
                        KeyCode::Esc => Key::Esc,
                        other => {
                            debug!("Unmapped key {:?}", other);
                            Key::Other
                        }
                    });
                }
                _ => continue,
            }
        }
    }
}
