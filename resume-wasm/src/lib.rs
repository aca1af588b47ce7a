//! Framework-neutral WASM <-> JavaScript bridge.

use chrono::{DateTime, TimeZone, Utc};
use resume_core::{
    layout_timeline, render_markup, LayoutConfig, MonospaceMeasure, TimelineError, TimelineView,
};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Lay out `entries` for a viewport and return the drawing instructions.
///
/// `now_ms` is the render timestamp in milliseconds since the epoch (what
/// `Date.now()` returns); `config` may carry any subset of `LayoutConfig`.
#[wasm_bindgen]
pub fn layout_entries(
    entries: JsValue,
    viewport_width: u32,
    now_ms: f64,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let (feed, now, cfg) = read_inputs(entries, now_ms, config)?;
    let view = layout_from_feed(&feed, viewport_width, now, &cfg)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&view).map_err(|err| JsValue::from_str(&format!("Could not serialize layout: {err}")))
}

/// Same as [`layout_entries`], rendered to SVG (desktop) or HTML (mobile).
#[wasm_bindgen]
pub fn render_entries_markup(
    entries: JsValue,
    viewport_width: u32,
    now_ms: f64,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let (feed, now, cfg) = read_inputs(entries, now_ms, config)?;
    let view = layout_from_feed(&feed, viewport_width, now, &cfg)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    Ok(render_markup(&view, &cfg))
}

fn read_inputs(
    entries: JsValue,
    now_ms: f64,
    config: Option<JsValue>,
) -> Result<(serde_json::Value, DateTime<Utc>, LayoutConfig), JsValue> {
    let feed = from_value::<serde_json::Value>(entries)
        .map_err(|err| JsValue::from_str(&format!("Could not read entries: {err}")))?;

    let now = now_from_millis(now_ms)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid timestamp: {now_ms}")))?;

    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => from_value(js_cfg)
            .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?,
        _ => LayoutConfig::default(),
    };

    Ok((feed, now, cfg))
}

fn layout_from_feed(
    feed: &serde_json::Value,
    viewport_width: u32,
    now: DateTime<Utc>,
    config: &LayoutConfig,
) -> Result<TimelineView, TimelineError> {
    let entries = resume_data::parse_entries_value(feed)?;
    layout_timeline(
        &entries,
        viewport_width,
        now,
        config,
        &MonospaceMeasure::default(),
    )
}

fn now_from_millis(now_ms: f64) -> Option<DateTime<Utc>> {
    if !now_ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(now_ms as i64).single()
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_core::LayoutMode;
    use serde_json::json;

    #[test]
    fn millis_map_to_utc() {
        let now = now_from_millis(1_609_459_200_000.0).unwrap();
        assert_eq!(now, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(now_from_millis(f64::NAN), None);
    }

    #[test]
    fn feed_is_laid_out_for_the_viewport() {
        let feed = json!([
            { "title": "A", "from": "2019-01-01", "to": "2020-01-01" },
            { "title": "B", "from": "2020-06-01", "to": null }
        ]);
        let now = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let config = LayoutConfig::default();

        let desktop = layout_from_feed(&feed, 1024, now, &config).unwrap();
        assert_eq!(desktop.mode(), LayoutMode::Desktop);
        let mobile = layout_from_feed(&feed, 375, now, &config).unwrap();
        assert_eq!(mobile.mode(), LayoutMode::Mobile);
    }

    #[test]
    fn errors_are_prefixed() {
        let message = format_timeline_error(TimelineError::ZeroSpan);
        assert!(message.starts_with("Timeline error: "));
    }
}
