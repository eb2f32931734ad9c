// SPDX-License-Identifier: MIT
//
// The window run (`-W PANE CURSOR_X CURSOR_Y`).
//
//   capture pane → printable lines → cursor to buffer coordinates
//   → Session::start → deliver at once (one distinct candidate)
//                    → or run the picker and deliver on Enter

use anyhow::{Context, Result};
use tracing::{debug, info};

use tc_core::geometry::to_buffer;
use tc_core::{Outcome, Position, Session};
use tc_term::event_loop::EventLoop;
use tc_theme::Theme;

use crate::cli::{Cli, Target};
use crate::deliver::Delivery;
use crate::pane::Pane;
use crate::picker::Picker;
use crate::report::{self, Report};
use crate::tmux::Tmux;

/// # Errors
///
/// Returns an error if capturing the pane, compiling the patterns, the
/// terminal, or the delivery fails.
pub fn run(cli: &Cli, target: &Target, theme: Theme) -> Result<()> {
    let tmux = Tmux::new();
    let pane = Pane::capture(&tmux, &target.pane)?;
    let lines = pane.printable();
    let cursor = to_buffer(
        &lines,
        pane.width,
        Position::new(target.cursor_x, target.cursor_y),
    );
    debug!(?cursor, lines = lines.len(), "captured pane");

    report::record(Report {
        cursor_x: target.cursor_x,
        cursor_y: target.cursor_y,
        pane: Some(pane.clone()),
        lines: lines.clone(),
    });

    let config = cli.completion_config();
    let session = match Session::start(&config, &lines, cursor)? {
        Outcome::Ready(session) => session,
        outcome => {
            info!(?outcome, "nothing to complete");
            return Ok(());
        }
    };

    let delivery = match &cli.exec {
        Some(program) => Delivery::Exec {
            program: program.clone(),
        },
        None => Delivery::Paste {
            pane: target.pane.clone(),
            strip_prefix: config.use_prefix,
        },
    };

    if session.is_trivial() {
        info!("single candidate, skipping picker");
        return delivery.deliver(&tmux, &session);
    }

    let mut picker = Picker::new(session, lines, pane.width, theme);
    EventLoop::new()
        .and_then(|mut event_loop| event_loop.run(&mut picker))
        .context("terminal failure")?;

    if picker.accepted() {
        delivery.deliver(&tmux, picker.session())?;
    }
    Ok(())
}
