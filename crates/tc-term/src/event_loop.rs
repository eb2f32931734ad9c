// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — keys in, frames out.
//
// Bytes from the stdin reader thread are parsed into keys and handed to
// the application one by one. After any key (or a resize) the application
// repaints the frame buffer and the renderer writes out the rows that
// changed. Between keys the loop sleeps in `recv_timeout`.
//
// # Escape Timeout
//
// A lone ESC byte is either the Escape key or the first byte of an arrow
// key sequence. The parser holds it; when the receive times out with
// nothing new, the ESC is flushed as a real Escape press.
//
// # SIGWINCH
//
// The handler only sets an atomic flag. The loop checks it each turn and
// resizes the frame before the next paint.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::buffer::FrameBuffer;
use crate::input::{KeyEvent, Parser};
use crate::reader::StdinReader;
use crate::render::Renderer;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the loop does after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// An interactive full-screen application.
pub trait App {
    /// Handle one key. Return [`Action::Quit`] to leave the loop.
    fn on_key(&mut self, key: &KeyEvent) -> Action;

    /// Called after the frame buffer has been resized.
    fn on_resize(&mut self, _size: Size) {}

    /// Paint the whole state. The buffer is cleared before each call.
    fn paint(&mut self, buf: &mut FrameBuffer);
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// How long a lone ESC waits for the rest of a sequence.
const ESCAPE_TIMEOUT: Duration = Duration::from_millis(25);

pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: Renderer,
}

impl EventLoop {
    /// # Errors
    ///
    /// Returns an error if the terminal handle cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            renderer: Renderer::new(),
        })
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Enter the terminal, run until the app quits or stdin closes, and
    /// restore the terminal on the way out, also after an error.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, rendering or restore fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = match StdinReader::spawn() {
            Ok((mut reader, rx)) => {
                let result = self.run_inner(app, &rx);
                reader.stop();
                result
            }
            Err(e) => Err(e),
        };

        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        app.on_resize(size);
        let mut dirty = true;

        loop {
            if dirty {
                frame.clear();
                app.paint(&mut frame);
                self.renderer.render(&frame);
                self.renderer.flush()?;
                dirty = false;
            }

            let keys = match rx.recv_timeout(ESCAPE_TIMEOUT) {
                Ok(bytes) => self.parser.advance(&bytes),
                Err(RecvTimeoutError::Timeout) if self.parser.has_pending() => self.parser.flush(),
                Err(RecvTimeoutError::Timeout) => Vec::new(),
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            };

            for key in &keys {
                if app.on_key(key) == Action::Quit {
                    return Ok(());
                }
                dirty = true;
            }

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                frame.resize(new_size.cols, new_size.rows);
                self.renderer.force_redraw();
                app.on_resize(new_size);
                dirty = true;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
