//! Theme errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThemeError>;

/// Why a style string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("unknown colour `{0}`")]
    UnknownColor(String),
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(char),
    #[error("background only takes the `h` attribute, got `{0}`")]
    BackgroundAttribute(char),
    #[error("`h` needs a named colour, got `{0}`")]
    BrightNeedsName(String),
    #[error("more than one `:` separator")]
    TooManyParts,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("empty directory in theme path")]
    EmptyDirectory,

    #[error("no such theme `{name}` (builtin: {builtins})")]
    NotFound { name: String, builtins: String },

    #[error("unable to read theme file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse theme file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid style for `{field}`: `{value}`")]
    Style {
        field: &'static str,
        value: String,
        #[source]
        source: StyleError,
    },
}
