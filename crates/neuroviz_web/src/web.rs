mod canvas;

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use neuroviz::interaction::controls;
use neuroviz::prelude::*;

use crate::ui_model::{ColorPicker, Slider};
use canvas::CanvasSurface;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

struct WebRuntime {
    net: Network,
    clock: WallClock,
}

impl WebRuntime {
    fn new() -> Self {
        Self {
            net: Network::new(NetworkConfig::default(), CanvasSize::default()),
            clock: WallClock::new(),
        }
    }
}

/// Everything a frame callback touches. All handles are `Copy`.
#[derive(Clone, Copy)]
struct FrameHandles {
    runtime: StoredValue<WebRuntime>,
    canvas: NodeRef<html::Canvas>,
    tooltip_el: NodeRef<html::Div>,
    config: RwSignal<NetworkConfig>,
    tooltip: RwSignal<Option<Tooltip>>,
    running: StoredValue<bool>,
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

fn schedule_frame(h: FrameHandles) {
    request_animation_frame(move || {
        if !h.running.get_value() {
            return;
        }
        if let Err(e) = run_frame(h) {
            warn(&e);
        }
        schedule_frame(h);
    });
}

fn run_frame(h: FrameHandles) -> Result<(), String> {
    let Some(canvas) = h.canvas.get_untracked() else {
        return Ok(());
    };
    let mut surface = CanvasSurface::new(&canvas)?;

    if let Some(el) = h.tooltip_el.get_untracked() {
        let (w, ht) = (el.offset_width(), el.offset_height());
        if w > 0 && ht > 0 {
            h.runtime
                .update_value(|r| r.net.set_tooltip_size(w as f64, ht as f64));
        }
    }

    let mut out = FrameOutput::default();
    let mut applied = None;
    h.runtime.update_value(|r| {
        out = r.net.tick_with(&mut r.clock, &mut surface);
        applied = Some(r.net.config().clone());
    });

    let _ = canvas.style().set_property("cursor", out.cursor.css());
    if h.tooltip.with_untracked(|t| *t != out.tooltip) {
        h.tooltip.set(out.tooltip);
    }
    if let Some(cfg) = applied {
        if h.config.with_untracked(|c| *c != cfg) {
            h.config.set(cfg);
        }
    }
    Ok(())
}

#[component]
fn App() -> impl IntoView {
    let runtime = StoredValue::new(WebRuntime::new());
    let canvas_ref = NodeRef::<html::Canvas>::new();
    let tooltip_ref = NodeRef::<html::Div>::new();

    let config = RwSignal::new(runtime.with_value(|r| r.net.config().clone()));
    let tooltip = RwSignal::new(None::<Tooltip>);
    let running = StoredValue::new(true);
    let started = StoredValue::new(false);

    let handles = FrameHandles {
        runtime,
        canvas: canvas_ref,
        tooltip_el: tooltip_ref,
        config,
        tooltip,
        running,
    };

    // Control changes are queued; the network applies them at the next frame.
    let submit = move |control: &'static str, raw: String| {
        runtime.update_value(|r| {
            if let Err(e) = r.net.submit_control(control, &raw) {
                warn(&e.to_string());
            }
        });
    };

    // Size the canvas to its container and relayout the network.
    let fit_canvas = move || {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let Some(parent) = canvas.parent_element() else {
            return;
        };
        let (w, h) = (parent.client_width().max(0), parent.client_height().max(0));
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        runtime.update_value(|r| {
            r.net.submit(Command::Resize {
                width: w as f64,
                height: h as f64,
            })
        });
    };

    let _ = window_event_listener(leptos::ev::resize, move |_| fit_canvas());

    Effect::new(move |_| {
        if canvas_ref.get().is_some() && !started.get_value() {
            started.set_value(true);
            fit_canvas();
            schedule_frame(handles);
        }
    });

    on_cleanup(move || running.set_value(false));

    let on_pointer_move = move |ev: web_sys::MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let rect = canvas.get_bounding_client_rect();
        let (x, y) = (
            ev.client_x() as f64 - rect.left(),
            ev.client_y() as f64 - rect.top(),
        );
        runtime.update_value(|r| r.net.submit(Command::PointerMoved { x, y }));
    };

    let tooltip_style = move || {
        tooltip.with(|t| match t {
            Some(t) => format!(
                "position: absolute; left: {:.0}px; top: {:.0}px; visibility: visible;",
                t.left, t.top
            ),
            None => "position: absolute; left: 0; top: 0; visibility: hidden;".to_string(),
        })
    };
    let tooltip_text = move || {
        tooltip.with(|t| t.as_ref().map(|t| t.lines.join("\n")).unwrap_or_default())
    };

    view! {
        <main style="font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif; display: flex; gap: 18px; padding: 18px; background: #121212; color: #e0e0e0; min-height: 100vh; box-sizing: border-box;">
            <section style="display: flex; flex-direction: column; gap: 14px; min-width: 240px;">
                <h1 style="margin: 0 0 8px 0; font-size: 1.3em;">"Neural Network"</h1>

                {Slider::all()
                    .iter()
                    .copied()
                    .map(|s| {
                        let (min, max, step) = s.range();
                        view! {
                            <label style="display: flex; flex-direction: column; gap: 4px;">
                                <span style="display: flex; justify-content: space-between;">
                                    <span>{s.label()}</span>
                                    <span style="font-variant-numeric: tabular-nums;">
                                        {move || config.with(|c| s.display(&c.display_values()).to_string())}
                                    </span>
                                </span>
                                <input
                                    type="range"
                                    id=s.id()
                                    min=min
                                    max=max
                                    step=step
                                    prop:value=move || config.with(|c| s.value(c))
                                    on:input=move |ev| submit(s.id(), event_target_value(&ev))
                                />
                            </label>
                        }
                    })
                    .collect_view()}

                <label style="display: flex; flex-direction: column; gap: 4px;">
                    <span>"Activation pattern"</span>
                    <select
                        id=controls::ACTIVATION
                        prop:value=move || config.with(|c| c.pattern.label().to_string())
                        on:change=move |ev| submit(controls::ACTIVATION, event_target_value(&ev))
                    >
                        {ActivationPattern::all()
                            .iter()
                            .map(|p| view! { <option value=p.label()>{p.display_name()}</option> })
                            .collect_view()}
                    </select>
                </label>

                {ColorPicker::all()
                    .iter()
                    .copied()
                    .map(|c| {
                        view! {
                            <label style="display: flex; justify-content: space-between; align-items: center;">
                                <span>{c.label()}</span>
                                <input
                                    type="color"
                                    id=c.id()
                                    prop:value=move || config.with(|cfg| c.value(cfg))
                                    on:input=move |ev| submit(c.id(), event_target_value(&ev))
                                />
                            </label>
                        }
                    })
                    .collect_view()}

                <button id=controls::RESET on:click=move |_| submit(controls::RESET, String::new())>
                    "Reset"
                </button>
            </section>

            <section style="position: relative; flex: 1; height: calc(100vh - 36px); border-radius: 10px; overflow: hidden; background: #1e1e1e;">
                <canvas
                    node_ref=canvas_ref
                    id="neural-network"
                    style="display: block;"
                    on:mousemove=on_pointer_move
                    on:mouseleave=move |_| runtime.update_value(|r| r.net.submit(Command::PointerLeft))
                ></canvas>
                <div
                    node_ref=tooltip_ref
                    id="tooltip"
                    style=tooltip_style
                    class="tooltip"
                >
                    <div style="white-space: pre-line; pointer-events: none; background: rgba(0, 0, 0, 0.8); padding: 6px 10px; border-radius: 6px; font-size: 0.85em;">
                        {tooltip_text}
                    </div>
                </div>
            </section>
        </main>
    }
}
