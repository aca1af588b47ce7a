//! Markup adapter: turns a [`TimelineView`] into a standalone SVG document
//! (desktop) or an HTML fragment (mobile).

use crate::layout::{DesktopScene, MobileList, RowShade, TimelineView};
use crate::LayoutConfig;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn render_markup(view: &TimelineView, config: &LayoutConfig) -> String {
    match view {
        TimelineView::Desktop(scene) => render_svg(scene, config),
        TimelineView::Mobile(list) => render_mobile(list),
    }
}

const SVG_STYLE: &str = concat!(
    "<style>",
    ".popup{visibility:hidden;pointer-events:none}",
    ".entry:hover .popup{visibility:visible}",
    "text{font-family:Optima,sans-serif}",
    ".popup-title{font-weight:bold;font-size:16px}",
    ".popup-subtitle{font-style:italic;font-size:16px}",
    ".popup-body{font-size:13px}",
    ".axis-label{font-size:12px}",
    "</style>",
);

fn render_svg(scene: &DesktopScene, config: &LayoutConfig) -> String {
    let mut out = format!(
        r#"<svg xmlns="{SVG_NS}" class="timeline-desktop" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height,
    );
    out.push_str(SVG_STYLE);

    for row in &scene.rows {
        let fill = match row.shade {
            RowShade::Dark => &config.dark_row_color,
            RowShade::Light => &config.light_row_color,
        };
        out.push_str(&format!(
            r#"<rect fill="{}" width="{}" height="{}" x="0" y="{}"/>"#,
            escape(fill),
            scene.width,
            row.height,
            row.y,
        ));
    }

    out.push_str(r#"<g class="axis">"#);
    for tick in &scene.ticks {
        out.push_str(&format!(
            r#"<text class="axis-label" x="{}" y="{}">{}</text>"#,
            tick.label_x, scene.axis_baseline, tick.year,
        ));
    }
    out.push_str("</g>");

    // Later rows go first so that each popup paints over the bars below it.
    for (bar, popup) in scene.bars.iter().zip(&scene.popups).rev() {
        out.push_str(&format!(r#"<g class="entry" data-index="{}">"#, bar.index));
        out.push_str(&format!(
            r#"<rect class="bar" fill="{}" opacity="{}" width="{}" height="{}" x="{}" y="{}" rx="{r}" ry="{r}"/>"#,
            escape(&config.bar_color),
            config.bar_opacity,
            bar.width,
            bar.height,
            bar.x,
            bar.y,
            r = bar.radius,
        ));
        out.push_str(&format!(
            r#"<g class="popup"><rect fill="{}" opacity="{}" width="{}" height="{}" x="{}" y="{}" rx="{r}" ry="{r}"/>"#,
            escape(&config.popup_color),
            config.popup_opacity,
            popup.width,
            popup.height,
            popup.x,
            popup.y,
            r = config.bar_radius,
        ));
        for line in &popup.lines {
            out.push_str(&format!(
                r#"<text class="{}" x="{}" y="{}">{}</text>"#,
                line.role.class_name(),
                line.x,
                line.baseline,
                escape(&line.text),
            ));
        }
        out.push_str("</g></g>");
    }

    out.push_str("</svg>");
    out
}

fn render_mobile(list: &MobileList) -> String {
    let mut out = String::from(r#"<div class="timeline-mobile">"#);
    for item in &list.items {
        out.push_str(&format!(
            concat!(
                r#"<section class="timeline-item">"#,
                r#"<h3 class="timeline-item-title">{}</h3>"#,
                r#"<p class="timeline-item-institution">{}</p>"#,
                r#"<p class="timeline-item-duration">{}</p>"#,
                r#"<p class="timeline-item-location">{}</p>"#,
                "</section>",
            ),
            escape(&item.title),
            escape(&item.institution),
            escape(&item.duration),
            escape(&item.location),
        ));
    }
    out.push_str("</div>");
    out
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(
            escape(r#"R&D <Lab> "x" 'y'"#),
            "R&amp;D &lt;Lab&gt; &quot;x&quot; &#39;y&#39;"
        );
    }

    #[test]
    fn empty_mobile_list_is_an_empty_container() {
        assert_eq!(
            render_mobile(&MobileList::default()),
            r#"<div class="timeline-mobile"></div>"#
        );
    }
}
