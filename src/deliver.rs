// SPDX-License-Identifier: MIT
//
// Handing the accepted candidate over.
//
// Paste mode types the rest of the word into the original pane (the
// identifier is already there, so it is stripped). Exec mode runs a
// program with the whole candidate as its last argument; PROGRAM is split
// like a shell would, so `--exec "open -a Safari"` works.

use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::info;

use tc_core::Session;

use crate::tmux::Tmux;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Paste { pane: String, strip_prefix: bool },
    Exec { program: String },
}

impl Delivery {
    /// The text this delivery sends for the current selection.
    #[must_use]
    pub fn text(&self, session: &Session) -> Option<String> {
        match self {
            Self::Paste { strip_prefix, .. } => session.accepted_text(*strip_prefix),
            Self::Exec { .. } => session.accepted_text(false),
        }
    }

    /// Send the selected candidate. Does nothing if nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if tmux or the program fails.
    pub fn deliver(&self, tmux: &Tmux, session: &Session) -> Result<()> {
        let Some(text) = self.text(session) else {
            return Ok(());
        };

        match self {
            Self::Paste { pane, .. } => {
                info!(%pane, %text, "pasting completion");
                tmux.paste(pane, &text)
                    .with_context(|| format!("unable to paste into pane {pane}"))
            }
            Self::Exec { program } => {
                info!(%program, %text, "running program");
                run_program(program, &text)
            }
        }
    }
}

/// argv for `program` followed by `value`.
fn exec_argv(program: &str, value: &str) -> Result<Vec<String>> {
    let mut argv = shell_words::split(program)
        .with_context(|| format!("unable to parse program `{program}`"))?;
    if argv.is_empty() {
        bail!("empty program");
    }
    argv.push(value.to_owned());
    Ok(argv)
}

fn run_program(program: &str, value: &str) -> Result<()> {
    let argv = exec_argv(program, value)?;
    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .status()
        .with_context(|| format!("unable to run `{program}`"))?;
    if !status.success() {
        bail!("`{program}` exited with {status}");
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tc_core::{CompletionConfig, Outcome, Position};

    fn session() -> Session {
        let lines = ["make install", "$ make ins"];
        match Session::start(&CompletionConfig::default(), &lines, Position::new(10, 1)).unwrap() {
            Outcome::Ready(session) => session,
            other => panic!("expected candidates, got {other:?}"),
        }
    }

    #[test]
    fn paste_strips_identifier() {
        let delivery = Delivery::Paste {
            pane: "%1".into(),
            strip_prefix: true,
        };
        assert_eq!(delivery.text(&session()).as_deref(), Some("tall"));
    }

    #[test]
    fn paste_without_prefix_keeps_value() {
        let delivery = Delivery::Paste {
            pane: "%1".into(),
            strip_prefix: false,
        };
        assert_eq!(delivery.text(&session()).as_deref(), Some("install"));
    }

    #[test]
    fn exec_always_gets_whole_value() {
        let delivery = Delivery::Exec {
            program: "echo".into(),
        };
        assert_eq!(delivery.text(&session()).as_deref(), Some("install"));
    }

    #[test]
    fn argv_splits_program() {
        assert_eq!(
            exec_argv("open -a 'Google Chrome'", "https://x").unwrap(),
            ["open", "-a", "Google Chrome", "https://x"]
        );
    }

    #[test]
    fn argv_rejects_empty_and_unbalanced() {
        assert!(exec_argv("  ", "x").is_err());
        assert!(exec_argv("open 'oops", "x").is_err());
    }

    #[test]
    fn exec_runs_program() {
        let delivery = Delivery::Exec {
            program: "true".into(),
        };
        delivery.deliver(&Tmux::new(), &session()).unwrap();
    }

    #[test]
    fn exec_failure_is_error() {
        assert!(run_program("false", "x").is_err());
    }
}
