// SPDX-License-Identifier: MIT
//
// Command-line options.
//
// The same binary runs twice per completion: once from the tmux key
// binding (launcher), and once inside the window the launcher opens
// (`-W PANE CURSOR_X CURSOR_Y`). The launcher forwards every option it
// received, so both runs see the same configuration.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use tc_core::{CompletionConfig, TrimRule, TrimSide};
use tc_theme::{DEFAULT_THEME, DEFAULT_THEME_PATH};

#[derive(Parser, Debug, Clone)]
#[command(name = "tmux-complete", version, about, long_about = None)]
pub struct Cli {
    /// Characters an identifier may consist of
    #[arg(
        short = 'c',
        long = "regexp-cursor",
        value_name = "REGEX",
        default_value = CompletionConfig::DEFAULT_CURSOR_PATTERN
    )]
    pub regexp_cursor: String,

    /// How a candidate continues after the identifier
    #[arg(
        short = 'r',
        long = "regexp-candidate",
        value_name = "REGEX",
        default_value = CompletionConfig::DEFAULT_CANDIDATE_PATTERN
    )]
    pub regexp_candidate: String,

    /// Offer every match in the pane instead of completing the word under the cursor
    #[arg(short = 'n', long = "no-prefix")]
    pub no_prefix: bool,

    /// Run PROGRAM with the chosen candidate as its last argument instead of pasting it
    #[arg(short = 'e', long = "exec", value_name = "PROGRAM")]
    pub exec: Option<String>,

    /// Characters trimmed from candidates to derive nested ones
    #[arg(
        long = "trim-chars",
        value_name = "CHARS",
        default_value = TrimRule::DEFAULT_CHARS,
        allow_hyphen_values = true
    )]
    pub trim_chars: String,

    /// Which end of a candidate the trim characters are cut from
    #[arg(long = "trim-side", value_enum, default_value_t = Side::Trailing)]
    pub trim_side: Side,

    /// Name of the theme to use
    #[arg(long = "theme", value_name = "NAME", default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Colon-separated directories searched for `<NAME>.theme`
    #[arg(long = "theme-path", value_name = "DIRS", default_value = DEFAULT_THEME_PATH)]
    pub theme_path: String,

    /// Run the picker for a known pane and cursor (used internally)
    #[arg(
        short = 'W',
        long = "window",
        num_args = 3,
        value_names = ["PANE", "CURSOR_X", "CURSOR_Y"]
    )]
    pub window: Option<Vec<String>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Leading,
    Trailing,
}

impl Side {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Trailing => "trailing",
        }
    }
}

impl From<Side> for TrimSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Leading => Self::Leading,
            Side::Trailing => Self::Trailing,
        }
    }
}

/// Pane and cursor handed over by the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub pane: String,
    pub cursor_x: usize,
    pub cursor_y: usize,
}

impl Cli {
    /// The `-W` target, if this is the window run.
    ///
    /// # Errors
    ///
    /// Returns an error if a cursor coordinate is not a number.
    pub fn target(&self) -> Result<Option<Target>> {
        let Some(args) = &self.window else {
            return Ok(None);
        };
        let [pane, x, y] = args.as_slice() else {
            anyhow::bail!("-W takes exactly PANE CURSOR_X CURSOR_Y");
        };

        Ok(Some(Target {
            pane: pane.clone(),
            cursor_x: x.parse().with_context(|| format!("invalid cursor x `{x}`"))?,
            cursor_y: y.parse().with_context(|| format!("invalid cursor y `{y}`"))?,
        }))
    }

    #[must_use]
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            cursor_pattern: self.regexp_cursor.clone(),
            candidate_pattern: self.regexp_candidate.clone(),
            trim: TrimRule::new(self.trim_side.into(), self.trim_chars.clone()),
            use_prefix: !self.no_prefix,
        }
    }

    /// Arguments that reproduce this configuration for `target`.
    ///
    /// Values use the `--flag=value` form so a value starting with `-` is
    /// never read as a flag.
    #[must_use]
    pub fn forward_args(&self, target: &Target) -> Vec<String> {
        let mut args = vec![
            format!("--regexp-cursor={}", self.regexp_cursor),
            format!("--regexp-candidate={}", self.regexp_candidate),
            format!("--trim-chars={}", self.trim_chars),
            format!("--trim-side={}", self.trim_side.as_str()),
            format!("--theme={}", self.theme),
            format!("--theme-path={}", self.theme_path),
        ];
        if self.no_prefix {
            args.push("--no-prefix".to_owned());
        }
        if let Some(program) = &self.exec {
            args.push(format!("--exec={program}"));
        }
        args.extend([
            "-W".to_owned(),
            target.pane.clone(),
            target.cursor_x.to_string(),
            target.cursor_y.to_string(),
        ]);
        args
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
