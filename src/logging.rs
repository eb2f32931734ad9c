// SPDX-License-Identifier: MIT
//
// Log set-up.
//
// The terminal belongs to the picker and stderr is piped back to the
// launcher as an error report, so logs go to a file in the temp
// directory only. Filter with `TMUX_COMPLETE_LOG` (e.g. `debug`,
// `tc_core=trace`); the default is `warn`.

use std::env;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "TMUX_COMPLETE_LOG";
pub const LOG_FILE: &str = "tmux-complete.log";

const DEFAULT_FILTER: &str = "warn";

/// Filter from a `TMUX_COMPLETE_LOG` value. Unset, blank or unparsable
/// values fall back to [`DEFAULT_FILTER`].
fn filter_from(value: Option<&str>) -> EnvFilter {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn filter() -> EnvFilter {
    filter_from(env::var(LOG_ENV).ok().as_deref())
}

/// Install the file subscriber. Keep the guard alive until exit so the
/// writer thread flushes.
pub fn init() -> Option<WorkerGuard> {
    let appender = tracing_appender::rolling::never(env::temp_dir(), LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter()))
        .try_init()
        .ok()
        .map(|()| guard)
}
