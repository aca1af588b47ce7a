//! Browser component for the resume timeline.

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::canvas::CanvasMeasure;
    use crate::styles;
    use chrono::Utc;
    use resume_core::{
        layout_timeline, DesktopScene, Entry, LayoutConfig, MobileList, MonospaceMeasure,
        RowShade, TimelineView,
    };
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, Window};
    use yew::prelude::*;

    #[derive(Properties, PartialEq)]
    pub struct ResumeTimelineProps {
        pub entries: Vec<Entry>,
        pub config: LayoutConfig,
    }

    #[function_component(ResumeTimeline)]
    fn resume_timeline(props: &ResumeTimelineProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let viewport = use_state(viewport_width);
        {
            let viewport = viewport.clone();
            use_effect_with((), move |_| {
                let window = web_sys::window();
                let listener = Closure::<dyn FnMut()>::new(move || viewport.set(viewport_width()));
                if let Some(window) = &window {
                    if let Err(err) = window
                        .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
                    {
                        console::error_1(&err);
                    }
                }
                move || {
                    if let Some(window) = window {
                        if let Err(err) = window.remove_event_listener_with_callback(
                            "resize",
                            listener.as_ref().unchecked_ref(),
                        ) {
                            console::error_1(&err);
                        }
                    }
                    drop(listener);
                }
            });
        }

        let measure = use_memo((), |_| {
            web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| CanvasMeasure::new(&document))
        });
        let hovered = use_state(|| None::<usize>);

        // One timestamp per render pass, shared by every ongoing entry.
        let now = Utc::now();
        let view = match &*measure {
            Some(canvas) => layout_timeline(&props.entries, *viewport, now, &props.config, canvas),
            None => layout_timeline(
                &props.entries,
                *viewport,
                now,
                &props.config,
                &MonospaceMeasure::default(),
            ),
        };

        match view {
            Ok(TimelineView::Desktop(scene)) => html! {
                <div class="resume-timeline timeline-scroll" key="desktop">
                    { render_desktop(&scene, &props.config, hovered) }
                </div>
            },
            Ok(TimelineView::Mobile(list)) => html! {
                <div class="resume-timeline" key="mobile">
                    { render_mobile(&list) }
                </div>
            },
            Err(err) => {
                console::error_1(&JsValue::from_str(&format!("Timeline error: {err}")));
                html! {
                    <p class="resume-timeline-error" key="error">{ format!("Timeline error: {err}") }</p>
                }
            }
        }
    }

    fn render_desktop(
        scene: &DesktopScene,
        config: &LayoutConfig,
        hovered: UseStateHandle<Option<usize>>,
    ) -> Html {
        let width = scene.width.to_string();
        let height = scene.height.to_string();
        let view_box = format!("0 0 {width} {height}");
        let radius = config.bar_radius.to_string();
        let current = *hovered;

        html! {
            <svg class="timeline-desktop" width={width.clone()} height={height} viewBox={view_box}>
                {
                    for scene.rows.iter().map(|row| {
                        let fill = match row.shade {
                            RowShade::Dark => config.dark_row_color.clone(),
                            RowShade::Light => config.light_row_color.clone(),
                        };
                        html! {
                            <rect fill={fill} width={width.clone()} height={row.height.to_string()}
                                x="0" y={row.y.to_string()} />
                        }
                    })
                }
                <g class="axis">
                    {
                        for scene.ticks.iter().map(|tick| html! {
                            <text class="axis-label" x={tick.label_x.to_string()}
                                y={scene.axis_baseline.to_string()}>{ tick.year }</text>
                        })
                    }
                </g>
                // Later rows go first so that each popup paints over the bars below it.
                {
                    for scene.bars.iter().zip(&scene.popups).rev().map(|(bar, popup)| {
                        let index = bar.index;
                        let onmouseenter = {
                            let hovered = hovered.clone();
                            Callback::from(move |_: MouseEvent| hovered.set(Some(index)))
                        };
                        let onmouseleave = {
                            let hovered = hovered.clone();
                            Callback::from(move |_: MouseEvent| hovered.set(None))
                        };
                        let visible = current == Some(index);
                        html! {
                            <g class="entry" key={index} {onmouseenter} {onmouseleave}>
                                <rect class="bar" fill={config.bar_color.clone()}
                                    opacity={config.bar_opacity.to_string()}
                                    width={bar.width.to_string()} height={bar.height.to_string()}
                                    x={bar.x.to_string()} y={bar.y.to_string()}
                                    rx={bar.radius.to_string()} ry={bar.radius.to_string()} />
                                <g class={classes!("popup", visible.then_some("is-visible"))}>
                                    <rect fill={config.popup_color.clone()}
                                        opacity={config.popup_opacity.to_string()}
                                        width={popup.width.to_string()} height={popup.height.to_string()}
                                        x={popup.x.to_string()} y={popup.y.to_string()}
                                        rx={radius.clone()} ry={radius.clone()} />
                                    {
                                        for popup.lines.iter().map(|line| html! {
                                            <text class={line.role.class_name()} x={line.x.to_string()}
                                                y={line.baseline.to_string()}>{ line.text.clone() }</text>
                                        })
                                    }
                                </g>
                            </g>
                        }
                    })
                }
            </svg>
        }
    }

    fn render_mobile(list: &MobileList) -> Html {
        html! {
            <div class="timeline-mobile">
                {
                    for list.items.iter().map(|item| html! {
                        <section class="timeline-item">
                            <h3>{ item.title.clone() }</h3>
                            <p>{ item.institution.clone() }</p>
                            <p>{ item.duration.clone() }</p>
                            <p>{ item.location.clone() }</p>
                        </section>
                    })
                }
            </div>
        }
    }

    fn viewport_width() -> u32 {
        web_sys::window()
            .and_then(|window| window.inner_width().ok())
            .and_then(|width| width.as_f64())
            .map(|width| width.max(0.0) as u32)
            .unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn mount_resume_timeline(
        selector: &str,
        entries: JsValue,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Cannot access document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches the selector"))?;

        let feed: serde_json::Value = from_value(entries)?;
        let entries = resume_data::parse_entries_value(&feed)
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;

        let config = match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => from_value(js_cfg)?,
            _ => LayoutConfig::default(),
        };

        target.set_inner_html("");
        yew::Renderer::<ResumeTimeline>::with_root_and_props(
            target,
            ResumeTimelineProps { entries, config },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_resume_timeline;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_resume_timeline(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "resume-ui only builds for the wasm32 target",
    ))
}
