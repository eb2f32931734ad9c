// SPDX-License-Identifier: MIT
//
// Crash reports.
//
// The window run records what it is working on (cursor, pane, printable
// lines). If it panics, a hook writes that state together with the panic
// message and a backtrace to `$TMPDIR/tmux-complete_panic_<nanos>.log`
// and tells the user where to find it. Stderr of the window run is piped
// to the launcher, so the notice ends up in tmux's message area.

use std::backtrace::Backtrace;
use std::fs;
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::pane::Pane;

#[derive(Debug, Default, Clone, Serialize)]
pub struct Report {
    pub cursor_x: usize,
    pub cursor_y: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pane: Option<Pane>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
}

static CURRENT: Mutex<Option<Report>> = Mutex::new(None);
static HOOK_INSTALLED: Once = Once::new();

/// Remember `report` for the panic hook.
pub fn record(report: Report) {
    if let Ok(mut guard) = CURRENT.lock() {
        *guard = Some(report);
    }
}

/// Install the hook. Later hooks (the terminal restore) run before it.
pub fn install_panic_hook() {
    HOOK_INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            write_report(info);
            previous(info);
        }));
    });
}

fn write_report(info: &PanicHookInfo<'_>) {
    let report = CURRENT
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
        .unwrap_or_default();
    let text = render(&report, &info.to_string(), &Backtrace::force_capture().to_string());

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let path = report_path(&std::env::temp_dir(), nanos);

    match fs::write(&path, &text) {
        Ok(()) => eprintln!(
            "tmux-complete crashed. A bug report was written to {}\n\
             Check it for sensitive information before sharing it.",
            path.display()
        ),
        Err(e) => eprintln!(
            "tmux-complete crashed and the bug report could not be written to {}: {e}\n{text}",
            path.display()
        ),
    }
}

fn report_path(dir: &Path, nanos: u128) -> PathBuf {
    dir.join(format!("tmux-complete_panic_{nanos}.log"))
}

fn render(report: &Report, message: &str, backtrace: &str) -> String {
    let state = serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!("<state not serializable: {e}>"));
    format!(
        "bug report: tmux-complete {}\n\n{message}\n\n{backtrace}\n{state}\n",
        env!("CARGO_PKG_VERSION")
    )
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Report {
        Report {
            cursor_x: 3,
            cursor_y: 1,
            pane: Some(Pane::from_capture("%4", "ls\nfoo\n", 80, 24)),
            lines: vec!["ls".into(), "foo".into()],
        }
    }

    #[test]
    fn path_in_dir_with_nanos() {
        assert_eq!(
            report_path(Path::new("/tmp"), 42),
            PathBuf::from("/tmp/tmux-complete_panic_42.log")
        );
    }

    #[test]
    fn render_has_header_message_and_state() {
        let text = render(&sample(), "index out of bounds", "<trace>");
        assert!(text.starts_with(&format!(
            "bug report: tmux-complete {}\n\nindex out of bounds\n\n<trace>\n",
            env!("CARGO_PKG_VERSION")
        )));
        assert!(text.contains("\"cursor_x\": 3"));
        assert!(text.contains("\"id\": \"%4\""));
    }

    #[test]
    fn empty_report_skips_pane_and_lines() {
        let json = serde_json::to_value(Report::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "cursor_x": 0, "cursor_y": 0 }));
    }

    #[test]
    fn record_replaces_state() {
        record(sample());
        record(Report::default());
        let current = CURRENT.lock().unwrap().clone().unwrap();
        assert!(current.pane.is_none());
    }
}
