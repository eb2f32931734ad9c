//! # tc-theme — Themes for tmux-complete
//!
//! A theme assigns a style to each thing the picker paints: the identifier
//! under the cursor, candidates (normal and selected), and the "fog" the
//! rest of the pane fades into.
//!
//! ```text
//! <dir>/<name>.theme (YAML)  ──┐
//!                              ├─ serde_yaml ─▶ ThemeFile ─▶ parse_style ─▶ Theme
//! builtin light / dark       ──┘
//! ```
//!
//! - **[`style`]** — `fg[+attrs][:bg[+attrs]]` strings into terminal colours
//! - **[`theme`]** — the resolved [`Theme`] and its file format
//! - **[`builtin`]** — themes compiled into the binary
//! - **[`loader`]** — lookup along a colon-separated directory path

pub mod builtin;
pub mod error;
pub mod loader;
pub mod style;
pub mod theme;

pub use error::{Result, StyleError, ThemeError};
pub use loader::{DEFAULT_THEME, DEFAULT_THEME_PATH, load_theme};
pub use style::{Style, parse_color, parse_style};
pub use theme::Theme;
