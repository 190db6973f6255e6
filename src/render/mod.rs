//! Rendering — turn the view model into output.
//!
//! Two renderers ship with the crate:
//!
//! - [`TextRenderer`] — plain text for the terminal, with numbered links that
//!   the CLI can follow.
//! - [`HtmlRenderer`] — markup using the card/grid class names of the web
//!   front end, with all text escaped.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::view::{Menu, Screen, SearchResults};

pub mod html;
pub mod text;

pub use html::HtmlRenderer;
pub use text::TextRenderer;

/// Presentation layer for the application root and its side panels.
pub trait Renderer: Send + Sync {
    /// Render the whole application root.
    fn render(&self, screen: &Screen) -> String;

    /// Render the home-page search panel.
    fn render_search(&self, results: &SearchResults) -> String;

    /// Render the category dropdown.
    fn render_menu(&self, menu: &Menu) -> String;
}

/// Output format selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Html,
}

impl Format {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Self::Text => Box::new(TextRenderer),
            Self::Html => Box::new(HtmlRenderer),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown format {0:?} (expected \"text\" or \"html\")")]
pub struct UnknownFormat(String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Html => "html",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("text".parse::<Format>().unwrap(), Format::Text);
        assert_eq!("HTML".parse::<Format>().unwrap(), Format::Html);
        assert!("pdf".parse::<Format>().is_err());
    }

    #[test]
    fn format_display_round_trips() {
        for format in [Format::Text, Format::Html] {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
    }
}
