#![cfg(target_arch = "wasm32")]

use resume_core::{MonospaceMeasure, TextMeasure, TextRole};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::styles::{AXIS_FONT, BODY_FONT, SUBTITLE_FONT, TITLE_FONT};

/// Measures text with an offscreen 2D canvas, so popups can be sized before
/// anything is attached to the page.
pub struct CanvasMeasure {
    context: CanvasRenderingContext2d,
    fallback: MonospaceMeasure,
}

impl CanvasMeasure {
    pub fn new(document: &Document) -> Option<Self> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .ok()?
            .dyn_into()
            .ok()?;
        let context: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some(Self {
            context,
            fallback: MonospaceMeasure::default(),
        })
    }
}

impl TextMeasure for CanvasMeasure {
    fn text_width(&self, text: &str, role: TextRole) -> f64 {
        let font = match role {
            TextRole::Title => TITLE_FONT,
            TextRole::Subtitle => SUBTITLE_FONT,
            TextRole::Body => BODY_FONT,
            TextRole::Axis => AXIS_FONT,
        };
        self.context.set_font(font);
        self.context
            .measure_text(text)
            .map(|metrics| metrics.width())
            .unwrap_or_else(|_| self.fallback.text_width(text, role))
    }
}
