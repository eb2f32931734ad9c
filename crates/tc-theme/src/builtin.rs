//! Themes compiled into the binary.
//!
//! The YAML sources live in `themes/` next to this crate and double as
//! examples for users writing their own `.theme` files.

use crate::theme::Theme;

pub const LIGHT_YAML: &str = include_str!("../themes/light.theme");
pub const DARK_YAML: &str = include_str!("../themes/dark.theme");

pub struct BuiltinTheme {
    pub name: &'static str,
    pub yaml: &'static str,
}

pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        name: "light",
        yaml: LIGHT_YAML,
    },
    BuiltinTheme {
        name: "dark",
        yaml: DARK_YAML,
    },
];

/// Look up and parse a builtin theme.
///
/// Returns `None` for unknown names. The embedded sources are covered by
/// tests, so a parse failure here is logged and treated as unknown.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    let entry = BUILTIN_THEMES.iter().find(|t| t.name == name)?;
    match Theme::from_yaml(entry.name, entry.yaml) {
        Ok(theme) => Some(theme),
        Err(e) => {
            tracing::error!("builtin theme {name} is broken: {e}");
            None
        }
    }
}

/// Builtin theme names, for error messages.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_THEMES.iter().map(|t| t.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tc_term::cell::Attr;
    use tc_term::color::CellColor;

    #[test]
    fn every_builtin_parses() {
        for entry in BUILTIN_THEMES {
            let theme = Theme::from_yaml(entry.name, entry.yaml);
            assert!(theme.is_ok(), "{}: {:?}", entry.name, theme.err());
        }
    }

    #[test]
    fn light_values() {
        let theme = builtin_theme("light").unwrap();
        assert_eq!(theme.name, "light");
        assert_eq!(theme.identifier.fg, CellColor::BLACK);
        assert_eq!(theme.identifier.bg, CellColor::Ansi256(229));
        assert_eq!(theme.identifier.attrs, Attr::BOLD);
        assert_eq!(theme.candidate_selected.bg, CellColor::Ansi256(25));
        assert_eq!(theme.fog_background, CellColor::Ansi256(255));
    }

    #[test]
    fn dark_values() {
        let theme = builtin_theme("dark").unwrap();
        assert_eq!(theme.candidate_normal.fg, CellColor::Ansi256(231));
        assert_eq!(theme.candidate_normal.bg, CellColor::Ansi256(24));
        assert_eq!(theme.fog_text.fg, CellColor::Ansi256(240));
        assert_eq!(theme.fog_background, CellColor::Ansi256(234));
    }

    #[test]
    fn unknown_builtin() {
        assert!(builtin_theme("solarized").is_none());
    }

    #[test]
    fn names_in_order() {
        assert_eq!(builtin_names().collect::<Vec<_>>(), vec!["light", "dark"]);
    }
}
