// SPDX-License-Identifier: MIT
//
// The launcher run (started by the tmux key binding).
//
// A `run -b` command has no terminal to draw on, so the launcher opens a
// new tmux window that runs this binary again with `-W` for the pane
// that had focus. The window's stderr is redirected into a fifo; anything
// that arrives there is turned into an error, which tmux then shows.

use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::{Cli, Target};
use crate::fifo::Fifo;
use crate::tmux::Tmux;

/// # Errors
///
/// Returns an error if tmux cannot be queried, the fifo or window cannot
/// be created, or the window run reported anything on stderr.
pub fn start(cli: &Cli) -> Result<()> {
    let tmux = Tmux::new();
    let cursor = tmux.cursor().context("unable to get current pane/cursor")?;
    let target = Target {
        pane: cursor.pane,
        cursor_x: cursor.x,
        cursor_y: cursor.y,
    };

    let fifo = Fifo::create().context("unable to make fifo")?;
    let exe = env::current_exe()
        .ok()
        .and_then(|p| p.to_str().map(str::to_owned))
        .or_else(|| env::args().next())
        .unwrap_or_else(|| "tmux-complete".to_owned());

    let command = window_command(&exe, &cli.forward_args(&target), fifo.path());
    info!(%command, "opening picker window");
    tmux.new_window(&command)
        .context("unable to create new tmux window")?;

    let logs = fifo.read_to_string().context("unable to read logs fifo")?;
    if !logs.trim().is_empty() {
        bail!("{}", logs.trim_end());
    }
    Ok(())
}

/// Shell command line for the picker window, stderr into `fifo`.
fn window_command(exe: &str, args: &[String], fifo: &Path) -> String {
    let words = std::iter::once(exe).chain(args.iter().map(String::as_str));
    format!(
        "{} 2>{}",
        shell_words::join(words),
        shell_words::quote(&fifo.to_string_lossy())
    )
}
