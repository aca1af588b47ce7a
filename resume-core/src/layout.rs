//! Pure layout: entries, viewport and a render timestamp in, drawing
//! instructions out. Nothing here touches a document.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::measure::{TextMeasure, TextRole};
use crate::{Entry, LayoutConfig, Span, TimelineError};

/// Distance from the bottom of a text line to its baseline.
const BASELINE_INSET: i32 = 4;
/// Gap between an axis tick and the start of its label.
const TICK_LABEL_GAP: i32 = 3;
const MS_PER_CALENDAR_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Which renderer a viewport gets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Desktop,
    Mobile,
}

impl LayoutMode {
    pub fn for_viewport(viewport_width: u32, config: &LayoutConfig) -> Self {
        if viewport_width >= config.mobile_breakpoint {
            LayoutMode::Desktop
        } else {
            LayoutMode::Mobile
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimelineView {
    Desktop(DesktopScene),
    Mobile(MobileList),
}

impl TimelineView {
    pub fn mode(&self) -> LayoutMode {
        match self {
            TimelineView::Desktop(_) => LayoutMode::Desktop,
            TimelineView::Mobile(_) => LayoutMode::Mobile,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowShade {
    Dark,
    Light,
}

/// Background stripe behind one row; the last stripe holds the axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowStripe {
    pub y: i32,
    pub height: i32,
    pub shade: RowShade,
}

/// Rounded bar for one entry. `index` is the sorted row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bar {
    pub index: usize,
    pub x: i32,
    pub y: i32,
    /// Negative when the entry ends before it starts.
    pub width: i32,
    pub height: i32,
    pub radius: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopupLine {
    pub role: TextRole,
    pub text: String,
    pub x: i32,
    pub baseline: i32,
}

/// Hover panel paired with the bar of the same `index`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Popup {
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub lines: Vec<PopupLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AxisTick {
    /// Position of the tick on the time scale.
    pub x: i32,
    /// Left edge of the label, kept inside the drawing area.
    pub label_x: i32,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesktopScene {
    pub width: i32,
    pub height: i32,
    pub span: Span,
    pub rows: Vec<RowStripe>,
    pub bars: Vec<Bar>,
    pub popups: Vec<Popup>,
    pub ticks: Vec<AxisTick>,
    pub axis_baseline: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MobileItem {
    pub title: String,
    pub institution: String,
    pub duration: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MobileList {
    pub items: Vec<MobileItem>,
}

/// Earliest start and latest resolved end across `entries`.
///
/// Fails on an empty list and on a span of zero length, the two inputs
/// that cannot be scaled onto a pixel axis.
pub fn compute_span(entries: &[Entry], now: DateTime<Utc>) -> Result<Span, TimelineError> {
    let from = entries
        .iter()
        .map(|entry| entry.from)
        .min()
        .ok_or(TimelineError::EmptyTimeline)?;
    let to = entries
        .iter()
        .map(|entry| entry.resolved_to(now))
        .max()
        .ok_or(TimelineError::EmptyTimeline)?;

    if from == to {
        return Err(TimelineError::ZeroSpan);
    }
    Ok(Span { from, to })
}

/// Horizontal pixel offset of the entry's start.
pub fn position_of(entry: &Entry, span: &Span, pixel_width: u32) -> Result<i32, TimelineError> {
    scale(entry.from.signed_duration_since(span.from), span, pixel_width)
}

/// Pixel width of the entry, from its start to its resolved end.
pub fn width_of(
    entry: &Entry,
    span: &Span,
    now: DateTime<Utc>,
    pixel_width: u32,
) -> Result<i32, TimelineError> {
    scale(
        entry.resolved_to(now).signed_duration_since(entry.from),
        span,
        pixel_width,
    )
}

fn scale(delta: Duration, span: &Span, pixel_width: u32) -> Result<i32, TimelineError> {
    let total = span.duration().num_milliseconds() as f64;
    if total == 0.0 {
        return Err(TimelineError::ZeroSpan);
    }
    let ratio = delta.num_milliseconds() as f64 / total;
    Ok(round_half_up(ratio * pixel_width as f64))
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Entries in ascending start order; ties keep their input order.
pub fn sorted_by_start(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.from);
    sorted
}

/// `"Mon YYYY - Mon YYYY"`, or `"Mon YYYY - present"` for ongoing entries.
pub fn duration_label(entry: &Entry) -> String {
    let start = entry.from.format("%b %Y");
    match entry.to {
        Some(end) => format!("{start} - {}", end.format("%b %Y")),
        None => format!("{start} - present"),
    }
}

/// Year labels along the axis.
///
/// Steps are whole calendar years so that labels never repeat, and wide
/// enough that neighbouring ticks sit at least `min_pixels_per_year` apart.
/// Each cursor is computed from `span.from` directly.
pub fn year_ticks(
    span: &Span,
    pixel_width: u32,
    min_pixels_per_year: u32,
) -> Result<Vec<AxisTick>, TimelineError> {
    let total = span.duration().num_milliseconds() as f64;
    if total == 0.0 {
        return Err(TimelineError::ZeroSpan);
    }
    if total < 0.0 {
        return Ok(Vec::new());
    }

    let pixels_per_year = pixel_width as f64 / (total / MS_PER_CALENDAR_YEAR);
    let tick_pixels = pixels_per_year.max(min_pixels_per_year as f64);
    let years_per_tick = ((tick_pixels / pixels_per_year).ceil() as u32).max(1);

    let mut ticks = Vec::new();
    for step in 0u32.. {
        let Some(months) = step
            .checked_mul(years_per_tick)
            .and_then(|years| years.checked_mul(12))
        else {
            break;
        };
        let Some(cursor) = span.from.checked_add_months(Months::new(months)) else {
            break;
        };
        if cursor > span.to {
            break;
        }
        let x = scale(cursor.signed_duration_since(span.from), span, pixel_width)?;
        ticks.push(AxisTick {
            x,
            label_x: x + TICK_LABEL_GAP,
            year: cursor.year(),
        });
    }
    Ok(ticks)
}

/// Desktop scene: striped rows, one bar and popup per entry, year axis.
pub fn layout_desktop(
    entries: &[Entry],
    now: DateTime<Utc>,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<DesktopScene, TimelineError> {
    let span = compute_span(entries, now)?;
    let sorted = sorted_by_start(entries);

    let width = config.svg_width as i32;
    let row_height = config.row_height as i32;
    let height = row_height * (sorted.len() as i32 + 1);

    let rows = (0..=sorted.len())
        .map(|k| RowStripe {
            y: k as i32 * row_height,
            height: row_height,
            shade: if k % 2 == 0 {
                RowShade::Dark
            } else {
                RowShade::Light
            },
        })
        .collect();

    let mut bars = Vec::with_capacity(sorted.len());
    let mut popups = Vec::with_capacity(sorted.len());
    for (index, entry) in sorted.iter().enumerate() {
        if entry.to.is_some_and(|to| to < entry.from) {
            warn!(title = %entry.title, "entry ends before it starts");
        }
        let bar = Bar {
            index,
            x: position_of(entry, &span, config.svg_width)?,
            y: index as i32 * row_height + config.bar_offset(),
            width: width_of(entry, &span, now, config.svg_width)?,
            height: config.bar_height as i32,
            radius: config.bar_radius as i32,
        };
        popups.push(layout_popup(entry, &bar, width, height, config, measure));
        bars.push(bar);
    }

    let mut ticks = year_ticks(&span, config.svg_width, config.min_pixels_per_year)?;
    for tick in &mut ticks {
        let label = tick.year.to_string();
        let label_width = measure.text_width(&label, TextRole::Axis).ceil() as i32;
        tick.label_x = tick.label_x.min(width - label_width).max(0);
    }
    let axis_baseline = sorted.len() as i32 * row_height + row_height / 2 + BASELINE_INSET;

    debug!(
        entries = sorted.len(),
        from = %span.from,
        to = %span.to,
        ticks = ticks.len(),
        "desktop layout"
    );

    Ok(DesktopScene {
        width,
        height,
        span,
        rows,
        bars,
        popups,
        ticks,
        axis_baseline,
    })
}

fn layout_popup(
    entry: &Entry,
    bar: &Bar,
    area_width: i32,
    area_height: i32,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Popup {
    let padding = config.popup_padding as i32;
    let line_height = config.popup_line_height as i32;
    let texts = [
        (TextRole::Title, entry.title.clone()),
        (TextRole::Subtitle, entry.institution.clone()),
        (TextRole::Body, duration_label(entry)),
        (TextRole::Body, entry.location.clone()),
    ];

    let widest = texts
        .iter()
        .map(|(role, text)| measure.text_width(text, *role))
        .fold(0.0_f64, f64::max)
        .ceil() as i32;
    let width = (widest + 2 * padding).min(area_width);
    let line_count = texts.len() as i32;
    let height = (2 * padding + line_height * line_count).min(area_height);
    // A short drawing area squeezes the lines so the last one stays inside.
    let pitch = line_height.min((height - 2 * padding).max(0) / line_count);

    let x = bar.x.min(area_width - width).max(0);
    let y = (bar.y + bar.height).min(area_height - height).max(0);

    let lines = texts
        .into_iter()
        .enumerate()
        .map(|(i, (role, text))| PopupLine {
            role,
            text,
            x: x + padding,
            baseline: y + pitch * (i as i32 + 1),
        })
        .collect();

    Popup {
        index: bar.index,
        x,
        y,
        width,
        height,
        lines,
    }
}

/// Mobile list: one stacked text block per entry, no bars.
pub fn layout_mobile(entries: &[Entry]) -> MobileList {
    let items = sorted_by_start(entries)
        .into_iter()
        .map(|entry| MobileItem {
            title: entry.title.clone(),
            institution: entry.institution.clone(),
            duration: duration_label(entry),
            location: entry.location.clone(),
        })
        .collect();
    MobileList { items }
}

/// Full render pass for the given viewport, with `now` fixed for the pass.
pub fn layout_timeline(
    entries: &[Entry],
    viewport_width: u32,
    now: DateTime<Utc>,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<TimelineView, TimelineError> {
    let mode = LayoutMode::for_viewport(viewport_width, config);
    debug!(?mode, viewport_width, entries = entries.len(), "layout pass");
    match mode {
        LayoutMode::Desktop => layout_desktop(entries, now, config, measure).map(TimelineView::Desktop),
        LayoutMode::Mobile => Ok(TimelineView::Mobile(layout_mobile(entries))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceMeasure;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn entry(title: &str, from: DateTime<Utc>, to: Option<DateTime<Utc>>) -> Entry {
        Entry::new(title, "Uni", "Town", from, to)
    }

    #[test]
    fn span_resolves_open_end_to_now() {
        let entries = vec![
            entry("A", date(2019, 1, 1), Some(date(2020, 1, 1))),
            entry("B", date(2020, 6, 1), None),
        ];
        let span = compute_span(&entries, date(2021, 1, 1)).unwrap();
        assert_eq!(span.from, date(2019, 1, 1));
        assert_eq!(span.to, date(2021, 1, 1));
    }

    #[test]
    fn span_rejects_empty_and_zero_length() {
        assert_eq!(
            compute_span(&[], date(2021, 1, 1)),
            Err(TimelineError::EmptyTimeline)
        );
        let single = [entry("A", date(2020, 1, 1), Some(date(2020, 1, 1)))];
        assert_eq!(
            compute_span(&single, date(2021, 1, 1)),
            Err(TimelineError::ZeroSpan)
        );
    }

    #[test]
    fn scale_rounds_half_up() {
        let span = Span {
            from: date(2020, 1, 1),
            to: date(2020, 1, 5),
        };
        let half_day = entry("A", date(2020, 1, 1) + Duration::hours(12), None);
        // 0.5 / 4 * 10 = 1.25 -> 1
        assert_eq!(position_of(&half_day, &span, 10).unwrap(), 1);
        // 2 / 4 * 5 = 2.5 -> 3
        let mid = entry("B", date(2020, 1, 3), None);
        assert_eq!(position_of(&mid, &span, 5).unwrap(), 3);
    }

    #[test]
    fn reversed_entry_keeps_negative_width() {
        let entries = vec![
            entry("ok", date(2018, 1, 1), Some(date(2020, 1, 1))),
            entry("reversed", date(2019, 1, 1), Some(date(2018, 7, 1))),
        ];
        let span = compute_span(&entries, date(2021, 1, 1)).unwrap();
        let width = width_of(&entries[1], &span, date(2021, 1, 1), 800).unwrap();
        assert!(width < 0);
    }

    #[test]
    fn duration_labels() {
        let closed = entry("A", date(2019, 3, 1), Some(date(2020, 11, 30)));
        assert_eq!(duration_label(&closed), "Mar 2019 - Nov 2020");
        let open = entry("B", date(2020, 6, 1), None);
        assert_eq!(duration_label(&open), "Jun 2020 - present");
    }

    #[test]
    fn ticks_step_in_whole_years_when_crowded() {
        let span = Span {
            from: date(1990, 1, 1),
            to: date(2020, 1, 1),
        };
        // 30 years on 320 px is under 11 px per year, so steps of 5 years.
        let ticks = year_ticks(&span, 320, 50).unwrap();
        let years: Vec<i32> = ticks.iter().map(|t| t.year).collect();
        assert_eq!(years, vec![1990, 1995, 2000, 2005, 2010, 2015, 2020]);
    }

    #[test]
    fn breakpoint_is_inclusive_for_desktop() {
        let config = LayoutConfig::default();
        assert_eq!(LayoutMode::for_viewport(850, &config), LayoutMode::Desktop);
        assert_eq!(LayoutMode::for_viewport(849, &config), LayoutMode::Mobile);
    }

    #[test]
    fn popup_is_clamped_inside_area() {
        let entries = vec![
            entry("First", date(2000, 1, 1), Some(date(2001, 1, 1))),
            entry(
                "A rather long title that pushes the popup",
                date(2019, 1, 1),
                None,
            ),
        ];
        let config = LayoutConfig::default();
        let scene = layout_desktop(
            &entries,
            date(2020, 1, 1),
            &config,
            &MonospaceMeasure::default(),
        )
        .unwrap();
        for popup in &scene.popups {
            assert!(popup.x >= 0);
            assert!(popup.y >= 0);
            assert!(popup.x + popup.width <= scene.width);
            assert!(popup.y + popup.height <= scene.height);
        }
        // The second popup would hang off the bottom, so it is lifted.
        let last = &scene.popups[1];
        assert_eq!(last.y + last.height, scene.height);
    }

    #[test]
    fn popup_lines_stay_inside_a_short_area() {
        let entries = vec![Entry::new(
            "Engineer",
            "Acme",
            "Berlin",
            date(2019, 1, 1),
            Some(date(2020, 1, 1)),
        )];
        let config = LayoutConfig::default();
        let scene = layout_desktop(
            &entries,
            date(2020, 1, 1),
            &config,
            &MonospaceMeasure::default(),
        )
        .unwrap();
        assert_eq!(scene.height, 60);

        let popup = &scene.popups[0];
        assert_eq!((popup.y, popup.height), (0, 60));
        let baselines: Vec<i32> = popup.lines.iter().map(|line| line.baseline).collect();
        // (60 - 2 * 10) / 4 lines
        assert_eq!(baselines, vec![10, 20, 30, 40]);
    }

    #[test]
    fn popup_uses_full_pitch_when_it_fits() {
        let entries: Vec<Entry> = (0..6)
            .map(|k| {
                entry(
                    &format!("E{k}"),
                    date(2000 + k, 1, 1),
                    Some(date(2001 + k, 1, 1)),
                )
            })
            .collect();
        let config = LayoutConfig::default();
        let scene = layout_desktop(
            &entries,
            date(2010, 1, 1),
            &config,
            &MonospaceMeasure::default(),
        )
        .unwrap();

        let popup = &scene.popups[0];
        assert_eq!(popup.y, 25);
        assert_eq!(popup.height, 120);
        let baselines: Vec<i32> = popup.lines.iter().map(|line| line.baseline).collect();
        assert_eq!(baselines, vec![50, 75, 100, 125]);
    }
}
