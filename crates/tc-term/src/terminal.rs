// SPDX-License-Identifier: MIT
//
// Terminal mode switching.
//
// The picker takes over the window tmux opened for it: raw input, the
// alternate screen, no cursor. Two pieces of state have to be undone on
// the way out, whichever way out it is:
//
//   RawMode  → saved termios, restored on drop
//   Terminal → screen sequences (alt screen, cursor), undone on drop
//
// A panic skips neither: the hook installed on first `enter` writes a
// fixed restore sequence with a raw `write(2)` (stdout's lock may be held
// by the frame being flushed) and puts the saved termios back, then hands
// over to the previous hook so its message lands on a sane terminal.
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Used when the size cannot be queried.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    /// Current size, or [`FALLBACK`](Self::FALLBACK).
    #[must_use]
    pub fn current() -> Self {
        get_size().unwrap_or(Self::FALLBACK)
    }
}

/// Size of the terminal on stdout, if it is one.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    // SAFETY: TIOCGWINSZ fills a winsize we own.
    let mut ws = unsafe { std::mem::zeroed::<libc::winsize>() };
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };
    if rc != 0 || ws.ws_col == 0 || ws.ws_row == 0 {
        return None;
    }
    Some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Whether stdin is a terminal. `run -b` from a tmux binding is not.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Screen Sequences ───────────────────────────────────────────────────────

/// Alternate screen, hidden cursor, blank page.
fn write_enter(w: &mut impl Write) -> io::Result<()> {
    ansi::enter_alt_screen(w)?;
    ansi::cursor_hide(w)?;
    ansi::clear_screen(w)?;
    w.flush()
}

/// Inverse of [`write_enter`], plus whatever a half-written frame left on.
fn write_leave(w: &mut impl Write) -> io::Result<()> {
    ansi::end_sync(w)?;
    ansi::reset(w)?;
    ansi::cursor_show(w)?;
    ansi::exit_alt_screen(w)?;
    w.flush()
}

/// [`write_leave`] as one constant, for the panic hook.
#[rustfmt::skip]
const PANIC_RESTORE: &[u8] = b"\
    \x1b[?2026l\
    \x1b[0m\
    \x1b[?25h\
    \x1b[?1049l";

// ─── Raw Mode ───────────────────────────────────────────────────────────────

/// Termios in effect before raw mode, for the panic hook.
#[cfg(unix)]
static SAVED_TERMIOS: Mutex<Option<libc::termios>> = Mutex::new(None);

#[cfg(unix)]
fn restore_saved_termios() {
    let Ok(saved) = SAVED_TERMIOS.lock() else {
        return;
    };
    if let Some(termios) = saved.as_ref() {
        unsafe {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, termios);
        }
    }
}

/// Stdin in raw mode while this value lives. A no-op when stdin is not a
/// terminal.
struct RawMode {
    #[cfg(unix)]
    saved: Option<libc::termios>,
}

impl RawMode {
    #[cfg(unix)]
    fn enable() -> io::Result<Self> {
        if !is_tty() {
            return Ok(Self { saved: None });
        }

        let fd = libc::STDIN_FILENO;
        let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
        if unsafe { libc::tcgetattr(fd, &raw mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let saved = termios;

        // No echo, no line buffering, no signals: Ctrl-C is a key.
        unsafe { libc::cfmakeraw(&raw mut termios) };
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) } != 0 {
            return Err(io::Error::last_os_error());
        }

        if let Ok(mut slot) = SAVED_TERMIOS.lock() {
            *slot = Some(saved);
        }
        Ok(Self { saved: Some(saved) })
    }

    #[cfg(not(unix))]
    fn enable() -> io::Result<Self> {
        Ok(Self {})
    }

    #[cfg(unix)]
    fn disable(&mut self) -> io::Result<()> {
        let Some(saved) = self.saved.take() else {
            return Ok(());
        };
        if let Ok(mut slot) = SAVED_TERMIOS.lock() {
            *slot = None;
        }
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const saved) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn disable(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = self.disable();
    }
}

// ─── Panic Hook ─────────────────────────────────────────────────────────────

static HOOK: Once = Once::new();

fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            panic_restore();
            previous(info);
        }));
    });
}

fn panic_restore() {
    #[cfg(unix)]
    {
        unsafe {
            libc::write(
                libc::STDOUT_FILENO,
                PANIC_RESTORE.as_ptr().cast(),
                PANIC_RESTORE.len(),
            );
        }
        restore_saved_termios();
    }

    #[cfg(not(unix))]
    {
        let mut out = io::stdout();
        let _ = out.write_all(PANIC_RESTORE);
        let _ = out.flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Full-screen session handle. [`enter`](Self::enter) takes the terminal
/// over; [`leave`](Self::leave), or dropping the handle, gives it back.
pub struct Terminal {
    raw: Option<RawMode>,
    size: Size,
}

impl Terminal {
    /// Create a handle without touching the terminal.
    ///
    /// # Errors
    ///
    /// Currently infallible.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            raw: None,
            size: Size::current(),
        })
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Query the size again after a SIGWINCH.
    pub fn refresh_size(&mut self) -> Size {
        self.size = get_size().unwrap_or(self.size);
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.raw.is_some()
    }

    /// Raw mode on the alternate screen. Does nothing when already active.
    ///
    /// # Errors
    ///
    /// Returns an error if termios or terminal output fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.is_active() {
            return Ok(());
        }

        install_panic_hook();
        let raw = RawMode::enable()?;
        write_enter(&mut io::stdout().lock())?;
        self.raw = Some(raw);
        Ok(())
    }

    /// Back to the normal screen and cooked mode. Does nothing when
    /// inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or termios restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        let Some(mut raw) = self.raw.take() else {
            return Ok(());
        };
        write_leave(&mut io::stdout().lock())?;
        raw.disable()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[test]
    fn size_current_is_never_zero() {
        let size = Size::current();
        assert!(size.cols > 0 && size.rows > 0);
    }

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }

    // ── Sequences ───────────────────────────────────────────────────

    #[test]
    fn enter_switches_screen_first() {
        let s = written(|w| write_enter(w));
        assert_eq!(s, "\x1b[?1049h\x1b[?25l\x1b[2J");
    }

    #[test]
    fn leave_matches_panic_restore() {
        let s = written(|w| write_leave(w));
        assert_eq!(s.as_bytes(), PANIC_RESTORE);
    }

    #[test]
    fn panic_restore_leaves_alt_screen_last() {
        assert!(PANIC_RESTORE.ends_with(b"\x1b[?1049l"));
    }

    // ── Terminal ────────────────────────────────────────────────────

    #[test]
    fn new_is_inactive() {
        let term = Terminal::new().unwrap();
        assert!(!term.is_active());
    }

    #[test]
    fn enter_and_leave_are_idempotent() {
        let mut term = Terminal::new().unwrap();
        term.enter().unwrap();
        term.enter().unwrap();
        assert!(term.is_active());
        term.leave().unwrap();
        term.leave().unwrap();
        assert!(!term.is_active());
    }

    #[test]
    fn refresh_keeps_size_usable() {
        let mut term = Terminal::new().unwrap();
        let size = term.refresh_size();
        assert_eq!(size, term.size());
        assert!(size.cols > 0);
    }
}
