#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-resume-timeline]";

/// Canvas fonts used for popup sizing; must match the rules below.
pub const TITLE_FONT: &str = "bold 16px Optima, sans-serif";
pub const SUBTITLE_FONT: &str = "italic 16px Optima, sans-serif";
pub const BODY_FONT: &str = "13px Optima, sans-serif";
pub const AXIS_FONT: &str = "12px system-ui, sans-serif";

/// Default CSS for the component along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --resume-text: #1f2933;
  --resume-muted: #52606d;
  --resume-heading: #11181c;
  --resume-item-border: rgba(148, 163, 184, 0.38);
  --resume-accent: rgb(230, 40, 40);
  --resume-error: #b42318;
}

.resume-timeline {
  color: var(--resume-text);
  font-family: system-ui, sans-serif;
}

.timeline-scroll {
  max-width: 100%;
  overflow-x: auto;
}

.timeline-desktop .bar {
  cursor: pointer;
}

.timeline-desktop .popup {
  visibility: hidden;
  pointer-events: none;
}

.timeline-desktop .popup.is-visible {
  visibility: visible;
}

.timeline-desktop .popup-title {
  font: bold 16px Optima, sans-serif;
  fill: var(--resume-heading);
}

.timeline-desktop .popup-subtitle {
  font: italic 16px Optima, sans-serif;
  fill: var(--resume-heading);
}

.timeline-desktop .popup-body {
  font: 13px Optima, sans-serif;
  fill: var(--resume-muted);
}

.timeline-desktop .axis-label {
  font: 12px system-ui, sans-serif;
  fill: var(--resume-muted);
}

.timeline-mobile {
  display: flex;
  flex-direction: column;
  gap: 12px;
}

.timeline-item {
  border-left: 3px solid var(--resume-accent);
  padding: 4px 0 4px 12px;
}

.timeline-item h3 {
  margin: 0 0 4px 0;
  font-size: 1rem;
  color: var(--resume-heading);
}

.timeline-item p {
  margin: 0;
  font-size: 0.9rem;
  color: var(--resume-muted);
  line-height: 1.4;
}

.resume-timeline-error {
  color: var(--resume-error);
  font-size: 0.9rem;
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head> element"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-resume-timeline", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
