//! Interactive review on the controlling terminal.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};

use crate::review::{ReviewConsole, ReviewPrompt};

/// Key reported for Esc, Ctrl-C and other non-character keys
pub const CANCEL_KEY: char = '\u{1b}';

const SEPARATOR: &str = "----------------------------------------";

/// Restores cooked mode when dropped, even if reading the key failed
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Review console backed by stdout and single keypresses from the terminal
pub struct TerminalConsole {
    out: Stdout,
}

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole { out: io::stdout() }
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    /// Map a key event to the character the review understands.
    fn key_char(key: &KeyEvent) -> Option<char> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let c = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => CANCEL_KEY,
            KeyCode::Char(c) => c,
            KeyCode::Esc => CANCEL_KEY,
            KeyCode::Modifier(_) => return None,
            _ => CANCEL_KEY,
        };
        Some(c)
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewConsole for TerminalConsole {
    fn present(&mut self, prompt: &ReviewPrompt<'_>) -> io::Result<()> {
        self.clear_screen()?;
        writeln!(self.out, "{}", prompt.cell)?;
        writeln!(self.out, "{}", SEPARATOR)?;
        writeln!(self.out, "{}", prompt.question())?;
        self.out.flush()
    }

    fn read_key(&mut self) -> io::Result<char> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(c) = Self::key_char(&key) {
                    return Ok(c);
                }
            }
        }
    }

    fn dismiss(&mut self) -> io::Result<()> {
        self.clear_screen()
    }
}
