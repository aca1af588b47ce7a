//! Text measurement used to size popups without a live document.

use serde::{Deserialize, Serialize};

/// Typographic role of a piece of text; adapters map it to a font.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Title,
    /// Institution line, set in italics.
    Subtitle,
    Body,
    Axis,
}

impl TextRole {
    /// CSS class used by the markup adapters.
    pub fn class_name(self) -> &'static str {
        match self {
            TextRole::Title => "popup-title",
            TextRole::Subtitle => "popup-subtitle",
            TextRole::Body => "popup-body",
            TextRole::Axis => "axis-label",
        }
    }
}

/// Width of a rendered string in pixels.
pub trait TextMeasure {
    fn text_width(&self, text: &str, role: TextRole) -> f64;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, role: TextRole) -> f64 {
        (**self).text_width(text, role)
    }
}

/// Fixed advance per character. Deterministic, so the CLI and tests use it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub title_advance: f64,
    pub subtitle_advance: f64,
    pub body_advance: f64,
    pub axis_advance: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            title_advance: 8.0,
            subtitle_advance: 8.0,
            body_advance: 7.0,
            axis_advance: 6.0,
        }
    }
}

impl MonospaceMeasure {
    pub fn uniform(advance: f64) -> Self {
        Self {
            title_advance: advance,
            subtitle_advance: advance,
            body_advance: advance,
            axis_advance: advance,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, role: TextRole) -> f64 {
        let advance = match role {
            TextRole::Title => self.title_advance,
            TextRole::Subtitle => self.subtitle_advance,
            TextRole::Body => self.body_advance,
            TextRole::Axis => self.axis_advance,
        };
        text.chars().count() as f64 * advance
    }
}
