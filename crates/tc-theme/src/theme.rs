//! The resolved theme and its YAML file format.

use serde::Deserialize;
use tc_term::color::CellColor;

use crate::error::{StyleError, ThemeError};
use crate::style::{Style, parse_color, parse_style};

/// Raw theme as stored on disk. Every entry is an unparsed string.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeFile {
    pub identifier: String,
    pub candidate: CandidateStyles,
    pub fog: FogStyles,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateStyles {
    pub normal: String,
    pub selected: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FogStyles {
    pub text: String,
    pub background: String,
}

/// Everything the picker needs to paint a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub identifier: Style,
    pub candidate_normal: Style,
    pub candidate_selected: Style,
    /// Pane text outside identifier and candidates.
    pub fog_text: Style,
    /// Fills the whole screen before anything else is painted.
    pub fog_background: CellColor,
}

impl Theme {
    /// Parse a theme from YAML text. `name` is only used for display.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Parse`] for malformed YAML and
    /// [`ThemeError::Style`] for the first entry that is not a valid style.
    pub fn from_yaml(name: &str, yaml: &str) -> crate::Result<Self> {
        let file: ThemeFile =
            serde_yaml::from_str(yaml).map_err(|source| ThemeError::Parse {
                path: name.into(),
                source,
            })?;
        Self::from_file(name, &file)
    }

    /// Resolve every style string in `file`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Style`] naming the offending entry.
    pub fn from_file(name: &str, file: &ThemeFile) -> crate::Result<Self> {
        Ok(Self {
            name: name.to_owned(),
            identifier: style("identifier", &file.identifier)?,
            candidate_normal: style("candidate.normal", &file.candidate.normal)?,
            candidate_selected: style("candidate.selected", &file.candidate.selected)?,
            fog_text: style("fog.text", &file.fog.text)?,
            fog_background: field("fog.background", &file.fog.background, parse_color)?,
        })
    }
}

fn style(name: &'static str, value: &str) -> crate::Result<Style> {
    field(name, value, parse_style)
}

fn field<T>(
    name: &'static str,
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, StyleError>,
) -> crate::Result<T> {
    parse(value).map_err(|source| ThemeError::Style {
        field: name,
        value: value.to_owned(),
        source,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tc_term::cell::Attr;

    const SAMPLE: &str = r##"
identifier: "yellow+b"
candidate:
  normal: "black:cyan"
  selected: "white+bh:blue"
fog:
  text: "244"
  background: "#101010"
"##;

    #[test]
    fn parses_every_entry() {
        let theme = Theme::from_yaml("sample", SAMPLE).unwrap();
        assert_eq!(
            theme,
            Theme {
                name: "sample".into(),
                identifier: Style {
                    fg: CellColor::YELLOW,
                    bg: CellColor::Default,
                    attrs: Attr::BOLD,
                },
                candidate_normal: Style {
                    fg: CellColor::BLACK,
                    bg: CellColor::CYAN,
                    attrs: Attr::empty(),
                },
                candidate_selected: Style {
                    fg: CellColor::Ansi256(15),
                    bg: CellColor::BLUE,
                    attrs: Attr::BOLD,
                },
                fog_text: Style {
                    fg: CellColor::Ansi256(244),
                    ..Style::PLAIN
                },
                fog_background: CellColor::Rgb(0x10, 0x10, 0x10),
            }
        );
    }

    #[test]
    fn missing_section_is_parse_error() {
        let yaml = "identifier: red\ncandidate:\n  normal: red\n  selected: blue\n";
        let err = Theme::from_yaml("broken", yaml).unwrap_err();
        assert!(matches!(err, ThemeError::Parse { .. }));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let yaml = format!("{SAMPLE}extra: 1\n");
        assert!(matches!(
            Theme::from_yaml("extra", &yaml),
            Err(ThemeError::Parse { .. })
        ));
    }

    #[test]
    fn bad_style_names_field() {
        let yaml = SAMPLE.replace("\"244\"", "\"mauve\"");
        match Theme::from_yaml("bad", &yaml) {
            Err(ThemeError::Style { field, value, .. }) => {
                assert_eq!(field, "fog.text");
                assert_eq!(value, "mauve");
            }
            other => panic!("expected style error, got {other:?}"),
        }
    }

    #[test]
    fn fog_background_is_a_single_color() {
        let yaml = SAMPLE.replace("\"#101010\"", "\"red:blue\"");
        match Theme::from_yaml("bad", &yaml) {
            Err(ThemeError::Style { field, .. }) => assert_eq!(field, "fog.background"),
            other => panic!("expected style error, got {other:?}"),
        }
    }
}
