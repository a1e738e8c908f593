use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::model::NodeKind;
use crate::render::hit_test;
use crate::scene::{Geometry, SceneGraph, ShapeKind, Surface};
use crate::state::{TracingAction, TracingController, Viewport};
use crate::util::format_root_range;

use super::tooltip::{Tooltip, TooltipInfo};

const BACKGROUND: &str = "#0e1116";
const NODE_TEXT: &str = "#c9d1d9";
const CANVAS_MARGIN: f64 = 24.0;

#[derive(Properties, PartialEq, Clone)]
pub struct DiagramViewProps {
    pub tracing: UseReducerHandle<TracingController>,
    pub show_tooltips: bool,
}

#[function_component(DiagramView)]
pub fn diagram_view(props: &DiagramViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let tracing_ref = use_mut_ref(|| props.tracing.clone());
    let hover = use_state(|| None::<TooltipInfo>);

    // Effect: latest handle + redraw whenever the scene or selection changes
    {
        let tracing_ref = tracing_ref.clone();
        let current_handle = props.tracing.clone();
        let draw_ref = draw_ref.clone();
        let scene_key = (
            props.tracing.mode().clone(),
            props.tracing.options(),
            props.tracing.surface().states(),
        );
        use_effect_with(scene_key, move |_| {
            *tracing_ref.borrow_mut() = current_handle;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    // Main mount effect (sizing, draw closure, pointer + key events)
    {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let draw_ref_setup = draw_ref.clone();
        let tracing_ref = tracing_ref.clone();
        let hover = hover.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");

            let fit_canvas = {
                let canvas = canvas.clone();
                let viewport = viewport.clone();
                let tracing_ref = tracing_ref.clone();
                move || {
                    let (w, h) = canvas
                        .parent_element()
                        .map(|p| (p.client_width() as f64, p.client_height() as f64))
                        .unwrap_or((800.0, 600.0));
                    canvas.set_width(w.max(0.0) as u32);
                    canvas.set_height(h.max(0.0) as u32);
                    let bounds = tracing_ref.borrow().graph().bounds();
                    *viewport.borrow_mut() = Viewport::fit(bounds, w, h, CANVAS_MARGIN);
                }
            };
            fit_canvas();

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let viewport = viewport.clone();
                let tracing_ref = tracing_ref.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
                            Ok(ctx) => ctx,
                            Err(_) => return,
                        },
                        None => return,
                    };
                    let handle = tracing_ref.borrow();
                    paint(
                        &ctx,
                        handle.surface(),
                        &viewport.borrow(),
                        canvas.width() as f64,
                        canvas.height() as f64,
                    );
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            draw_closure();

            let mousemove_cb = {
                let viewport = viewport.clone();
                let tracing_ref = tracing_ref.clone();
                let hover = hover.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let (ox, oy) = (e.offset_x() as f64, e.offset_y() as f64);
                    let world = viewport.borrow().to_world(ox, oy);
                    let handle = tracing_ref.borrow().clone();
                    let info = hit_test(handle.surface(), world)
                        .and_then(|id| handle.surface().shape(id))
                        .and_then(|s| s.structure.as_deref())
                        .and_then(|id| tooltip_for(&handle, id, ox, oy));
                    hover.set(info);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();
            let mouseleave_cb = {
                let hover = hover.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    hover.set(None);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref())
                .ok();
            let click_cb = {
                let viewport = viewport.clone();
                let tracing_ref = tracing_ref.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    let world = viewport.borrow().to_world(e.offset_x() as f64, e.offset_y() as f64);
                    let handle = tracing_ref.borrow().clone();
                    let Some(shape) = hit_test(handle.surface(), world).and_then(|id| handle.surface().shape(id)) else {
                        return;
                    };
                    let Some(id) = shape.structure.clone() else { return };
                    match shape.kind {
                        ShapeKind::Terminal => handle.dispatch(TracingAction::SelectNerve(id)),
                        ShapeKind::Root => handle.dispatch(TracingAction::Inspect(id)),
                        _ => {}
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())
                .ok();
            // Escape clears the trace
            let keydown_cb = {
                let tracing_ref = tracing_ref.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    if e.key() == "Escape" {
                        tracing_ref.borrow().dispatch(TracingAction::Clear);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            let resize_cb = {
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    fit_canvas();
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                *draw_ref_setup.borrow_mut() = None;
            }
        });
    }

    let cursor = if hover.is_some() { "pointer" } else { "default" };
    html! {<div style="position:relative; flex:1; min-width:0; min-height:0; overflow:hidden;">
        <canvas ref={canvas_ref} id="plexus-canvas" style={format!("display:block; cursor:{};", cursor)}></canvas>
        { if props.show_tooltips { html!{ <Tooltip info={(*hover).clone()} /> } } else { html!{} } }
    </div>}
}

fn tooltip_for(tracing: &TracingController, id: &str, x: f64, y: f64) -> Option<TooltipInfo> {
    let graph = tracing.graph();
    let node = graph.node(id)?;
    let detail = match node.kind {
        NodeKind::Root => {
            let feeds: Vec<&str> = graph
                .nerves_through(id)
                .into_iter()
                .filter_map(|n| graph.terminal(n).map(|t| t.label.as_str()))
                .collect();
            Some(format!("Contributes to: {}", feeds.join(", ")))
        }
        NodeKind::Terminal => graph.terminal(id).map(|t| format!("Roots: {}", format_root_range(&t.roots))),
        NodeKind::Junction => None,
    };
    Some(TooltipInfo {
        x,
        y,
        title: node.label.to_string(),
        body: node.description.to_string(),
        detail,
    })
}

/// Full redraw of the scene: background first, then every shape in insertion order.
fn paint(ctx: &CanvasRenderingContext2d, scene: &SceneGraph, vp: &Viewport, w: f64, h: f64) {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_global_alpha(1.0);
    ctx.set_shadow_blur(0.0);
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_transform(vp.scale, 0.0, 0.0, vp.scale, vp.offset_x, vp.offset_y).ok();
    ctx.set_line_cap("round");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    for shape in scene.shapes() {
        let style = shape.style();
        if !style.is_visible() {
            continue;
        }
        ctx.set_global_alpha(style.opacity);
        match style.glow {
            Some((color, blur)) => {
                ctx.set_shadow_color(color);
                ctx.set_shadow_blur(blur * vp.scale);
            }
            None => ctx.set_shadow_blur(0.0),
        }
        match shape.geometry {
            Geometry::Line { start, end } => {
                ctx.set_stroke_style_str(style.stroke);
                ctx.set_line_width(style.width);
                ctx.begin_path();
                ctx.move_to(start.x, start.y);
                ctx.line_to(end.x, end.y);
                ctx.stroke();
            }
            Geometry::Rect { center, width, height } => {
                let x = center.x - width / 2.0;
                let y = center.y - height / 2.0;
                if let Some(fill) = style.fill {
                    ctx.set_fill_style_str(fill);
                    ctx.fill_rect(x, y, width, height);
                }
                ctx.set_shadow_blur(0.0);
                ctx.set_stroke_style_str(style.stroke);
                ctx.set_line_width(style.width);
                ctx.stroke_rect(x, y, width, height);
                if let Some(text) = &shape.text {
                    ctx.set_fill_style_str(NODE_TEXT);
                    ctx.set_font("600 15px system-ui, sans-serif");
                    ctx.fill_text(text, center.x, center.y).ok();
                }
            }
            Geometry::Marker { center, radius } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0).ok();
                if let Some(fill) = style.fill {
                    ctx.set_fill_style_str(fill);
                    ctx.fill();
                }
                ctx.set_stroke_style_str(style.stroke);
                ctx.set_line_width(style.width.max(1.0));
                ctx.stroke();
            }
            Geometry::Text { anchor } => {
                if let (Some(text), Some(fill)) = (&shape.text, style.fill) {
                    ctx.set_fill_style_str(fill);
                    ctx.set_font("500 13px system-ui, sans-serif");
                    ctx.fill_text(text, anchor.x, anchor.y).ok();
                }
            }
        }
    }
    ctx.set_global_alpha(1.0);
    ctx.set_shadow_blur(0.0);
}
