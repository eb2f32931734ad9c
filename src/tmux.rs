// SPDX-License-Identifier: MIT
//
// tmux client.
//
// Every call shells out to the `tmux` binary, which finds the server
// through `$TMUX`. Argument lists are built by pure functions so they can
// be checked without a server.

use std::process::{Command, Output};

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Name of the paste buffer used to deliver a completion.
pub const BUFFER_NAME: &str = "tmux-complete";

/// Where the cursor is in the active pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorInfo {
    pub pane: String,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone)]
pub struct Tmux {
    program: String,
}

impl Default for Tmux {
    fn default() -> Self {
        Self::new()
    }
}

impl Tmux {
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "tmux".to_owned(),
        }
    }

    fn run(&self, args: &[String]) -> Result<String> {
        debug!("tmux {}", args.join(" "));
        let output: Output = Command::new(&self.program)
            .args(args)
            .output()
            .with_context(|| format!("failed to spawn {}", self.program))?;

        if !output.status.success() {
            bail!(
                "tmux {} failed ({}): {}",
                args.first().map_or("", String::as_str),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Active pane and its cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if tmux fails or prints something unexpected.
    pub fn cursor(&self) -> Result<CursorInfo> {
        let out = self.run(&display_args(None, "#{pane_id}\t#{cursor_x}\t#{cursor_y}"))?;
        parse_cursor(&out)
    }

    /// Width and height of `pane` in cells.
    ///
    /// # Errors
    ///
    /// Returns an error if tmux fails or prints something unexpected.
    pub fn pane_size(&self, pane: &str) -> Result<(usize, usize)> {
        let out = self.run(&display_args(Some(pane), "#{pane_width}\t#{pane_height}"))?;
        parse_size(&out)
    }

    /// Visible contents of `pane` with SGR escapes, wrapped lines joined.
    ///
    /// # Errors
    ///
    /// Returns an error if tmux fails.
    pub fn capture_pane(&self, pane: &str) -> Result<String> {
        self.run(&capture_args(pane))
    }

    /// Open a new window running `command` through the shell.
    ///
    /// # Errors
    ///
    /// Returns an error if tmux fails.
    pub fn new_window(&self, command: &str) -> Result<()> {
        self.run(&new_window_args(command)).map(drop)
    }

    /// Type `text` into `pane` through a temporary paste buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if either tmux call fails.
    pub fn paste(&self, pane: &str, text: &str) -> Result<()> {
        self.run(&set_buffer_args(text))?;
        self.run(&paste_buffer_args(pane)).map(drop)
    }
}

// ─── Arguments ──────────────────────────────────────────────────────────────

fn display_args(target: Option<&str>, format: &str) -> Vec<String> {
    let mut args = vec!["display-message".to_owned(), "-p".to_owned()];
    if let Some(target) = target {
        args.extend(["-t".to_owned(), target.to_owned()]);
    }
    args.push(format.to_owned());
    args
}

fn capture_args(pane: &str) -> Vec<String> {
    ["capture-pane", "-p", "-e", "-J", "-t", pane]
        .map(str::to_owned)
        .to_vec()
}

fn new_window_args(command: &str) -> Vec<String> {
    ["new-window", command].map(str::to_owned).to_vec()
}

fn set_buffer_args(text: &str) -> Vec<String> {
    ["set-buffer", "-b", BUFFER_NAME, "--", text]
        .map(str::to_owned)
        .to_vec()
}

fn paste_buffer_args(pane: &str) -> Vec<String> {
    ["paste-buffer", "-d", "-b", BUFFER_NAME, "-t", pane]
        .map(str::to_owned)
        .to_vec()
}

// ─── Output Parsing ─────────────────────────────────────────────────────────

fn fields(out: &str, n: usize) -> Result<Vec<&str>> {
    let line = out.trim_end_matches('\n');
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() != n {
        bail!("unexpected tmux output `{line}`");
    }
    Ok(parts)
}

fn number(field: &str, what: &str) -> Result<usize> {
    field
        .trim()
        .parse()
        .with_context(|| format!("invalid {what} `{field}` from tmux"))
}

fn parse_cursor(out: &str) -> Result<CursorInfo> {
    let parts = fields(out, 3)?;
    Ok(CursorInfo {
        pane: parts[0].to_owned(),
        x: number(parts[1], "cursor x")?,
        y: number(parts[2], "cursor y")?,
    })
}

fn parse_size(out: &str) -> Result<(usize, usize)> {
    let parts = fields(out, 2)?;
    let width = number(parts[0], "pane width")?;
    let height = number(parts[1], "pane height")?;
    if width == 0 {
        bail!("tmux reported a zero-width pane");
    }
    Ok((width, height))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
