// SPDX-License-Identifier: MIT
//
// tmux-complete — complete the word under the tmux cursor from anything
// visible in the pane.
//
// This is the binary that wires the crates together:
//
//   tc-core  → identifier, candidates, selection, navigation
//   tc-term  → raw terminal, key parsing, frame rendering, event loop
//   tc-theme → styles and theme lookup
//
// One completion takes two processes:
//
//   key binding ── run -b ──▶ launcher ── new-window ──▶ window run (-W)
//                               ▲                          │
//                               └──── stderr via fifo ─────┘
//
// The window run captures the pane, lets the user pick a candidate, and
// pastes it into the original pane (or hands it to --exec PROGRAM).
//
// Exit codes: 1 general failure or not inside tmux, 2 theme, 3 launcher.
// `main` returns them as an `ExitCode`: the log guard has to drop before
// the process ends.

mod cli;
mod deliver;
mod fifo;
mod intro;
mod launcher;
mod logging;
mod pane;
mod picker;
mod report;
mod tmux;
mod window;

use std::fmt::Display;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use tc_term::terminal;

use crate::cli::Cli;

const EXIT_FAILURE: u8 = 1;
const EXIT_THEME: u8 = 2;
const EXIT_LAUNCH: u8 = 3;

/// Log and print `message`, then hand back `code` for `main` to return.
fn fail(message: impl Display, code: u8) -> u8 {
    error!("{message}");
    eprintln!("tmux-complete: {message}");
    code
}

fn run(cli: &Cli) -> Result<(), u8> {
    let theme = tc_theme::load_theme(&cli.theme_path, &cli.theme).map_err(|e| {
        fail(
            format!(
                "unable to load theme `{}` (path {}): {e}",
                cli.theme, cli.theme_path
            ),
            EXIT_THEME,
        )
    })?;

    let target = cli
        .target()
        .map_err(|e| fail(format!("{e:#}"), EXIT_FAILURE))?;

    match target {
        None if terminal::is_tty() => {
            intro::print();
            Err(EXIT_FAILURE)
        }
        None => launcher::start(cli).map_err(|e| fail(format!("{e:#}"), EXIT_LAUNCH)),
        Some(target) => {
            report::install_panic_hook();
            window::run(cli, &target, theme).map_err(|e| fail(format!("{e:#}"), EXIT_FAILURE))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}
