// SPDX-License-Identifier: MIT
//
// Captured pane contents.
//
// tmux hands back the pane with SGR escapes (`-e`) and with the DEC
// special-graphics charset switched in and out by SO/SI around line
// drawing. `printable` reduces that to the characters on screen: colours
// dropped, `lqk`-style letters turned back into box drawing.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::tmux::Tmux;

static SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[^m]*m").expect("valid regex"));

/// Shift Out: switch to the G1 (line drawing) charset.
const SO: char = '\x0e';
/// Shift In: back to G0.
const SI: char = '\x0f';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pane {
    pub id: String,
    /// Raw lines as captured, escapes included.
    pub lines: Vec<String>,
    pub width: usize,
    pub height: usize,
}

impl Pane {
    /// Capture `id` from tmux.
    ///
    /// # Errors
    ///
    /// Returns an error if either tmux query fails.
    pub fn capture(tmux: &Tmux, id: &str) -> Result<Self> {
        let contents = tmux
            .capture_pane(id)
            .with_context(|| format!("unable to capture pane {id}"))?;
        let (width, height) = tmux
            .pane_size(id)
            .with_context(|| format!("unable to get size of pane {id}"))?;
        Ok(Self::from_capture(id, &contents, width, height))
    }

    /// Build a pane from `capture-pane` output. Trailing newlines are
    /// dropped so empty rows at the bottom do not become lines.
    #[must_use]
    pub fn from_capture(id: &str, contents: &str, width: usize, height: usize) -> Self {
        Self {
            id: id.to_owned(),
            lines: contents
                .trim_end_matches('\n')
                .split('\n')
                .map(str::to_owned)
                .collect(),
            width,
            height,
        }
    }

    /// The lines as they appear on screen.
    #[must_use]
    pub fn printable(&self) -> Vec<String> {
        self.lines.iter().map(|line| printable(line)).collect()
    }
}

/// Strip SGR sequences and resolve SO/SI line drawing in one line.
#[must_use]
pub fn printable(line: &str) -> String {
    let plain = SGR.replace_all(line, "");
    let mut out = String::with_capacity(plain.len());
    let mut graphics = false;

    for ch in plain.chars() {
        match ch {
            SO => graphics = true,
            SI => graphics = false,
            _ if graphics => out.push(line_drawing(ch)),
            _ => out.push(ch),
        }
    }
    out
}

/// DEC special graphics → Unicode box drawing.
const fn line_drawing(ch: char) -> char {
    match ch {
        'l' => '┌',
        'q' => '─',
        'w' => '┬',
        'k' => '┐',
        'x' => '│',
        't' => '├',
        'u' => '┤',
        'n' => '┼',
        'v' => '┴',
        'm' => '└',
        'j' => '┘',
        other => other,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
