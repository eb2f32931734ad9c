// SPDX-License-Identifier: MIT
//
// The interactive picker.
//
// Implements tc-term's App trait on top of a completion Session. Every
// frame is painted from scratch, back to front:
//
//   1. fog background over the whole screen
//   2. pane lines, wrapped at the pane width, in the fog text style
//   3. the identifier being completed
//   4. every candidate in the normal style
//   5. the selected candidate, last, so it wins where candidates overlap
//
// Candidate positions are logical (unwrapped) and go through the
// Geometry Mapper before painting; a candidate crossing the right edge
// continues on the next screen row, just like the pane text.

use tc_core::geometry::to_screen;
use tc_core::{Direction, Position, Session};
use tc_term::buffer::FrameBuffer;
use tc_term::cell::Cell;
use tc_term::event_loop::{Action, App};
use tc_term::input::{KeyCode, KeyEvent};
use tc_theme::{Style, Theme};

// ─── Commands ───────────────────────────────────────────────────────────────

/// What a key does in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Accept,
    Cancel,
}

/// Arrows and `h j k l` move, Enter accepts, Escape, `q` and Ctrl-C cancel.
#[must_use]
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.is_ctrl('c') {
        return Some(Command::Cancel);
    }

    let plain = key.modifiers.is_empty();
    match key.code {
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Char('k') if plain => Some(Command::Move(Direction::Up)),
        KeyCode::Char('j') if plain => Some(Command::Move(Direction::Down)),
        KeyCode::Char('h') if plain => Some(Command::Move(Direction::Left)),
        KeyCode::Char('l') if plain => Some(Command::Move(Direction::Right)),
        KeyCode::Enter => Some(Command::Accept),
        KeyCode::Escape => Some(Command::Cancel),
        KeyCode::Char('q') if plain => Some(Command::Cancel),
        _ => None,
    }
}

// ─── Picker ─────────────────────────────────────────────────────────────────

pub struct Picker {
    session: Session,
    /// Printable pane lines.
    lines: Vec<String>,
    /// Pane width, the wrap column.
    width: usize,
    theme: Theme,
    accepted: bool,
}

impl Picker {
    #[must_use]
    pub fn new(session: Session, lines: Vec<String>, width: usize, theme: Theme) -> Self {
        Self {
            session,
            lines,
            width: width.max(1),
            theme,
            accepted: false,
        }
    }

    /// Whether the user pressed Enter.
    #[must_use]
    pub const fn accepted(&self) -> bool {
        self.accepted
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// `style` with a default background replaced by the fog background.
    fn over_fog(&self, style: Style) -> Style {
        if style.bg.is_default() {
            Style {
                bg: self.theme.fog_background,
                ..style
            }
        } else {
            style
        }
    }

    fn paint_pane(&self, buf: &mut FrameBuffer) {
        let fog = self.over_fog(self.theme.fog_text);
        let mut row: u16 = 0;

        for line in &self.lines {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                row = row.saturating_add(1);
                continue;
            }
            for chunk in chars.chunks(self.width) {
                if row >= buf.height() {
                    return;
                }
                fog.paint(buf, 0, row, &chunk.iter().collect::<String>());
                row += 1;
            }
        }
    }

    /// Paint `text` starting at logical `pos`, wrapping at the pane width.
    fn paint_at(&self, buf: &mut FrameBuffer, pos: Position, text: &str, style: Style) {
        let style = self.over_fog(style);
        let start = to_screen(&self.lines, self.width, pos);
        let (mut x, mut y) = (start.x, start.y);

        for ch in text.chars() {
            if x >= self.width {
                x = 0;
                y += 1;
            }
            let (Ok(col), Ok(row)) = (u16::try_from(x), u16::try_from(y)) else {
                return;
            };
            buf.set(col, row, Cell::styled(ch, style.fg, style.bg, style.attrs));
            x += 1;
        }
    }
}

impl App for Picker {
    fn on_key(&mut self, key: &KeyEvent) -> Action {
        match command_for(key) {
            Some(Command::Move(dir)) => {
                self.session.navigate(dir);
                Action::Continue
            }
            Some(Command::Accept) => {
                self.accepted = true;
                Action::Quit
            }
            Some(Command::Cancel) => Action::Quit,
            None => Action::Continue,
        }
    }

    fn paint(&mut self, buf: &mut FrameBuffer) {
        buf.clear_with_bg(self.theme.fog_background);
        self.paint_pane(buf);

        if let Some(id) = self.session.identifier() {
            self.paint_at(buf, id.position(), &id.value, self.theme.identifier);
        }

        let candidates = self.session.candidates();
        for candidate in candidates.iter().filter(|c| !c.selected) {
            self.paint_at(
                buf,
                candidate.position(),
                candidate.value(),
                self.theme.candidate_normal,
            );
        }
        if let Some(selected) = self.session.selected() {
            self.paint_at(
                buf,
                selected.position(),
                selected.value(),
                self.theme.candidate_selected,
            );
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
