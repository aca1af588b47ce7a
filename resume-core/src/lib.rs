//! Core model and layout logic for the resume timeline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub mod layout;
pub mod measure;
pub mod render;

pub use layout::{
    compute_span, duration_label, layout_desktop, layout_mobile, layout_timeline, position_of,
    sorted_by_start, width_of, year_ticks, AxisTick, Bar, DesktopScene, LayoutMode, MobileItem,
    MobileList, Popup, PopupLine, RowShade, RowStripe, TimelineView,
};
pub use measure::{MonospaceMeasure, TextMeasure, TextRole};
pub use render::render_markup;

/// Geometry, palette and thresholds used by the layout and the adapters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width (px) of the desktop drawing area.
    pub svg_width: u32,
    pub row_height: u32,
    pub bar_height: u32,
    pub bar_radius: u32,
    pub bar_color: String,
    pub bar_opacity: f64,
    pub dark_row_color: String,
    pub light_row_color: String,
    pub popup_color: String,
    pub popup_opacity: f64,
    /// Inner padding (px) between the popup edge and its text.
    pub popup_padding: u32,
    /// Distance between popup text baselines.
    pub popup_line_height: u32,
    /// Lower bound for the pixel distance between two axis labels.
    pub min_pixels_per_year: u32,
    /// Viewports narrower than this get the mobile list.
    pub mobile_breakpoint: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            svg_width: 800,
            row_height: 30,
            bar_height: 20,
            bar_radius: 5,
            bar_color: "rgb(230,40,40)".to_string(),
            bar_opacity: 0.4,
            dark_row_color: "rgb(224,224,224)".to_string(),
            light_row_color: "rgb(238,238,238)".to_string(),
            popup_color: "white".to_string(),
            popup_opacity: 0.7,
            popup_padding: 10,
            popup_line_height: 25,
            min_pixels_per_year: 50,
            mobile_breakpoint: 850,
        }
    }
}

impl LayoutConfig {
    /// Vertical offset that centers a bar inside its row.
    pub fn bar_offset(&self) -> i32 {
        ((self.row_height as f64 - self.bar_height as f64) / 2.0).round() as i32
    }
}

/// One resume line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub location: String,
    pub from: DateTime<Utc>,
    /// `None` means the entry is still ongoing.
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(
        title: impl Into<String>,
        institution: impl Into<String>,
        location: impl Into<String>,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title: title.into(),
            institution: institution.into(),
            location: location.into(),
            from,
            to,
        }
    }

    /// End of the entry, with an ongoing entry ending at `now`.
    pub fn resolved_to(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.to.unwrap_or(now)
    }

    pub fn is_ongoing(&self) -> bool {
        self.to.is_none()
    }
}

/// Window `[from, to]` that the timeline is scaled on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Span {
    pub fn duration(&self) -> Duration {
        self.to.signed_duration_since(self.from)
    }
}

/// Errors raised while reading entries or laying them out.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimelineError {
    #[error("Timeline has no entries")]
    EmptyTimeline,
    #[error("Timeline span has zero length; every entry shares one instant")]
    ZeroSpan,
    #[error("Entry {index} is missing `{field}`")]
    MissingData { index: usize, field: &'static str },
    #[error("Could not read data: {0}")]
    Parse(String),
    #[error("Other error: {0}")]
    Other(String),
}
