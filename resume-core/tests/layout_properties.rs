//! Property-based tests for the layout calculator.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use resume_core::{
    compute_span, layout_desktop, position_of, sorted_by_start, width_of, year_ticks, Entry,
    LayoutConfig, MonospaceMeasure,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap()
}

/// The render timestamp sits after every generated end date.
fn now() -> DateTime<Utc> {
    base() + Duration::days(40_000)
}

fn entry_strategy() -> impl Strategy<Value = (i64, Option<i64>)> {
    (0i64..20_000, prop::option::of(1i64..15_000))
}

fn build_entries(raw: &[(i64, Option<i64>)]) -> Vec<Entry> {
    raw.iter()
        .enumerate()
        .map(|(i, (start, length))| {
            let from = base() + Duration::days(*start);
            let to = length.map(|days| from + Duration::days(days));
            Entry::new(format!("entry-{i}"), "Institution", "City", from, to)
        })
        .collect()
}

proptest! {
    #[test]
    fn positions_and_widths_stay_in_bounds(
        raw in prop::collection::vec(entry_strategy(), 1..12),
        pixel_width in 100u32..2_000,
    ) {
        let entries = build_entries(&raw);
        let span = compute_span(&entries, now()).unwrap();
        for entry in &entries {
            let x = position_of(entry, &span, pixel_width).unwrap();
            let w = width_of(entry, &span, now(), pixel_width).unwrap();
            prop_assert!(x >= 0 && x <= pixel_width as i32);
            prop_assert!(w >= 0 && w <= pixel_width as i32);
        }
    }

    #[test]
    fn bar_end_matches_resolved_end_position(
        raw in prop::collection::vec(entry_strategy(), 1..12),
        pixel_width in 100u32..2_000,
    ) {
        let entries = build_entries(&raw);
        let span = compute_span(&entries, now()).unwrap();
        for entry in &entries {
            let x = position_of(entry, &span, pixel_width).unwrap();
            let w = width_of(entry, &span, now(), pixel_width).unwrap();
            let end = Entry::new("end", "", "", entry.resolved_to(now()), None);
            let end_x = position_of(&end, &span, pixel_width).unwrap();
            prop_assert!((x + w - end_x).abs() <= 1);
        }
    }

    #[test]
    fn sorting_is_ascending_and_stable(
        raw in prop::collection::vec((0i64..50, prop::option::of(0i64..50)), 1..20),
    ) {
        let entries = build_entries(&raw);
        let sorted = sorted_by_start(&entries);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].from <= pair[1].from);
            if pair[0].from == pair[1].from {
                let a: usize = pair[0].title["entry-".len()..].parse().unwrap();
                let b: usize = pair[1].title["entry-".len()..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn ticks_increase_and_keep_their_distance(
        raw in prop::collection::vec(entry_strategy(), 1..12),
        pixel_width in 100u32..2_000,
        min_pixels in 20u32..120,
    ) {
        let entries = build_entries(&raw);
        let span = compute_span(&entries, now()).unwrap();
        let ticks = year_ticks(&span, pixel_width, min_pixels).unwrap();
        prop_assert!(!ticks.is_empty());
        for pair in ticks.windows(2) {
            prop_assert!(pair[0].year < pair[1].year);
            prop_assert!(pair[1].x - pair[0].x >= min_pixels as i32);
        }
    }

    #[test]
    fn popups_never_leave_the_drawing_area(
        raw in prop::collection::vec(entry_strategy(), 1..12),
    ) {
        let entries = build_entries(&raw);
        let config = LayoutConfig::default();
        let scene = layout_desktop(&entries, now(), &config, &MonospaceMeasure::default()).unwrap();
        prop_assert_eq!(scene.popups.len(), entries.len());
        for popup in &scene.popups {
            prop_assert!(popup.x >= 0 && popup.y >= 0);
            prop_assert!(popup.x + popup.width <= scene.width);
            prop_assert!(popup.y + popup.height <= scene.height);
            for line in &popup.lines {
                prop_assert!(line.baseline >= popup.y);
                prop_assert!(line.baseline <= popup.y + popup.height);
            }
        }
    }
}
