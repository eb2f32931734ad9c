//! Theme lookup.
//!
//! The theme path is a colon-separated list of directories, searched in
//! order for `<name>.theme`. The first file found wins. When no directory
//! has one, a builtin theme of the same name is used.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::builtin::{builtin_names, builtin_theme};
use crate::error::{Result, ThemeError};
use crate::theme::{Theme, ThemeFile};

pub const DEFAULT_THEME: &str = "light";

pub const DEFAULT_THEME_PATH: &str =
    "/usr/share/tmux-complete/themes:~/.config/tmux-complete/themes";

const EXTENSION: &str = "theme";

/// Find and load theme `name` along `path`.
///
/// # Errors
///
/// - [`ThemeError::EmptyDirectory`] if `path` has an empty entry
/// - [`ThemeError::Read`] / [`ThemeError::Parse`] / [`ThemeError::Style`]
///   for a theme file that exists but is unusable
/// - [`ThemeError::NotFound`] if neither a file nor a builtin matches
pub fn load_theme(path: &str, name: &str) -> Result<Theme> {
    for dir in path.split(':') {
        if dir.trim().is_empty() {
            return Err(ThemeError::EmptyDirectory);
        }

        let file = expand_home(dir).join(format!("{name}.{EXTENSION}"));
        match fs::read_to_string(&file) {
            Ok(text) => {
                info!("loading theme from {}", file.display());
                return parse_file(&file, name, &text);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no theme at {}", file.display());
            }
            Err(source) => return Err(ThemeError::Read { path: file, source }),
        }
    }

    info!("loading builtin theme: {name}");
    builtin_theme(name).ok_or_else(|| ThemeError::NotFound {
        name: name.to_owned(),
        builtins: builtin_names().collect::<Vec<_>>().join(", "),
    })
}

fn parse_file(file: &Path, name: &str, text: &str) -> Result<Theme> {
    let raw: ThemeFile = serde_yaml::from_str(text).map_err(|source| ThemeError::Parse {
        path: file.to_path_buf(),
        source,
    })?;
    Theme::from_file(name, &raw)
}

/// Expand a leading `~/` to the home directory.
fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if dir == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(dir)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tc_term::color::CellColor;

    /// A fresh directory under the system temp dir, removed on drop.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("tc-theme-{tag}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self) -> &str {
            self.0.to_str().unwrap()
        }

        fn write(&self, name: &str, text: &str) {
            fs::write(self.0.join(name), text).unwrap();
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    const CUSTOM: &str = "\
identifier: red
candidate:
  normal: green
  selected: blue
fog:
  text: \"8\"
  background: black
";

    // ── Lookup order ────────────────────────────────────────────────

    #[test]
    fn file_in_first_directory() {
        let dir = TempDir::new("first");
        dir.write("custom.theme", CUSTOM);

        let theme = load_theme(dir.path(), "custom").unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.identifier.fg, CellColor::RED);
        assert_eq!(theme.fog_background, CellColor::BLACK);
    }

    #[test]
    fn first_match_wins() {
        let a = TempDir::new("win-a");
        let b = TempDir::new("win-b");
        a.write("x.theme", &CUSTOM.replace("identifier: red", "identifier: cyan"));
        b.write("x.theme", CUSTOM);

        let path = format!("{}:{}", a.path(), b.path());
        assert_eq!(load_theme(&path, "x").unwrap().identifier.fg, CellColor::CYAN);
    }

    #[test]
    fn later_directory_is_searched() {
        let a = TempDir::new("later-a");
        let b = TempDir::new("later-b");
        b.write("x.theme", CUSTOM);

        let path = format!("{}:{}", a.path(), b.path());
        assert_eq!(load_theme(&path, "x").unwrap().identifier.fg, CellColor::RED);
    }

    #[test]
    fn file_overrides_builtin() {
        let dir = TempDir::new("override");
        dir.write("light.theme", CUSTOM);
        assert_eq!(
            load_theme(dir.path(), "light").unwrap().candidate_normal.fg,
            CellColor::GREEN
        );
    }

    #[test]
    fn falls_back_to_builtin() {
        let dir = TempDir::new("fallback");
        let theme = load_theme(dir.path(), "dark").unwrap();
        assert_eq!(theme, builtin_theme("dark").unwrap());
    }

    #[test]
    fn missing_directory_is_skipped() {
        assert!(load_theme("/nonexistent/tc-theme", "light").is_ok());
    }

    // ── Errors ──────────────────────────────────────────────────────

    #[test]
    fn unknown_theme() {
        let dir = TempDir::new("unknown");
        assert!(matches!(
            load_theme(dir.path(), "solarized"),
            Err(ThemeError::NotFound { name, .. }) if name == "solarized"
        ));
    }

    #[test]
    fn unknown_theme_lists_builtins() {
        let dir = TempDir::new("listing");
        let err = load_theme(dir.path(), "solarized").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no such theme `solarized` (builtin: light, dark)"
        );
    }

    #[test]
    fn empty_entry_is_error() {
        let dir = TempDir::new("empty");
        let path = format!("{}::/tmp", dir.path());
        assert!(matches!(
            load_theme(&path, "light"),
            Err(ThemeError::EmptyDirectory)
        ));
        assert!(matches!(load_theme("", "light"), Err(ThemeError::EmptyDirectory)));
    }

    #[test]
    fn broken_file_reports_its_path() {
        let dir = TempDir::new("broken");
        dir.write("bad.theme", "identifier: [");

        match load_theme(dir.path(), "bad") {
            Err(ThemeError::Parse { path, .. }) => {
                assert_eq!(path, dir.0.join("bad.theme"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    // ── Home expansion ──────────────────────────────────────────────

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/themes"), home.join("themes"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn other_paths_untouched() {
        assert_eq!(expand_home("/usr/share"), PathBuf::from("/usr/share"));
        assert_eq!(expand_home("~user/x"), PathBuf::from("~user/x"));
    }
}
