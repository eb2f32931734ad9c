// SPDX-License-Identifier: MIT
//
// Stdin reader thread.
//
// Raw bytes are read on their own thread and sent over a channel, so the
// event loop can block in `recv_timeout()` and still notice a lone ESC
// that has waited long enough to be the Escape key.
//
// The thread never blocks in `read()`: it polls with a short timeout and
// checks the stop flag between polls, so `stop()` returns promptly.
#![allow(unsafe_code)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

const CHUNK: usize = 1024;

/// Milliseconds per poll; bounds how long `stop()` waits.
const POLL_MS: i32 = 50;

/// Handle to the reader thread. Dropping it stops the thread.
pub struct StdinReader {
    thread: Option<JoinHandle<()>>,
    stopping: Arc<AtomicBool>,
}

impl StdinReader {
    /// Start reading. The receiver yields non-empty chunks and disconnects
    /// when stdin closes or the reader is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn() -> io::Result<(Self, Receiver<Vec<u8>>)> {
        let (tx, rx) = mpsc::channel();
        let stopping = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopping);

        let thread = thread::Builder::new()
            .name("tc-stdin".into())
            .spawn(move || pump(&tx, &flag))?;

        let reader = Self {
            thread: Some(thread),
            stopping,
        };
        Ok((reader, rx))
    }

    /// Ask the thread to finish and join it. Safe to call twice.
    pub fn stop(&mut self) {
        self.stopping.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Forward stdin to `tx` until EOF, a read error, a dropped receiver, or
/// `stopping`.
fn pump(tx: &Sender<Vec<u8>>, stopping: &AtomicBool) {
    let mut buf = [0u8; CHUNK];
    while !stopping.load(Ordering::Relaxed) {
        match wait_readable() {
            Ok(false) => continue,
            Ok(true) => {}
            Err(_) => return,
        }
        match read_chunk(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(unix)]
fn wait_readable() -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    match unsafe { libc::poll(&raw mut pfd, 1, POLL_MS) } {
        n if n > 0 => Ok(true),
        0 => Ok(false),
        _ => {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                Ok(false)
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(unix)]
fn read_chunk(buf: &mut [u8]) -> io::Result<usize> {
    let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
    usize::try_from(n).map_err(|_| io::Error::last_os_error())
}

#[cfg(not(unix))]
fn wait_readable() -> io::Result<bool> {
    Ok(true)
}

#[cfg(not(unix))]
fn read_chunk(buf: &mut [u8]) -> io::Result<usize> {
    use std::io::Read;
    io::stdin().lock().read(buf)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
