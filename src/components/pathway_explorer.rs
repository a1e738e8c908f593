use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::model::Point;
use crate::settings::ViewerSettings;
use crate::state::{CoordinatePicker, StepAction, StepwiseAnimator};

use super::step_timeline::StepTimeline;

#[derive(Properties, PartialEq, Clone)]
pub struct PathwayExplorerProps {
    pub animator: UseReducerHandle<StepwiseAnimator>,
    pub settings: ViewerSettings,
    /// Nerve labels in display order, keyed by id.
    pub nerves: Vec<(String, String)>,
}

fn polyline_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[function_component]
pub fn PathwayExplorer(props: &PathwayExplorerProps) -> Html {
    let stage_ref = use_node_ref();
    let picked = use_state(|| None::<Point>);

    // Arrow keys step through the profile while the explorer is mounted; leaving it resets
    {
        let animator = props.animator.clone();
        let teardown = props.animator.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let keydown_cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| match e.key().as_str() {
                "ArrowRight" | "ArrowDown" => animator.dispatch(StepAction::Advance),
                "ArrowLeft" | "ArrowUp" => animator.dispatch(StepAction::Retreat),
                "Home" => animator.dispatch(StepAction::GoTo(0)),
                "End" => animator.dispatch(StepAction::GoTo(usize::MAX)),
                _ => {}
            }) as Box<dyn FnMut(_)>);
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            move || {
                let _ = window.remove_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
                teardown.dispatch(StepAction::Reset);
            }
        });
    }

    let nerve_buttons = props.nerves.iter().map(|(id, label)| {
        let is_active = props.animator.selected() == Some(id.as_str());
        let onclick = {
            let handle = props.animator.clone();
            let id = id.clone();
            Callback::from(move |_| handle.dispatch(StepAction::SelectNerve(id.clone())))
        };
        let style = if is_active { "background:#1f6feb; border:1px solid #58a6ff; color:#fff;" } else { "" };
        html! { <button key={id.clone()} {onclick} style={style}>{ label.clone() }</button> }
    });

    let Some(profile) = props.animator.profile() else {
        return html! {<div style="flex:1; display:flex; flex-direction:column; gap:12px; padding:16px;">
            <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for nerve_buttons }</div>
            <div style="opacity:0.7;">{"Choose a nerve to follow its course step by step."}</div>
        </div>};
    };

    let prev_cb = {
        let handle = props.animator.clone();
        Callback::from(move |_| handle.dispatch(StepAction::Retreat))
    };
    let next_cb = {
        let handle = props.animator.clone();
        Callback::from(move |_| handle.dispatch(StepAction::Advance))
    };
    let pick_cb = {
        let stage_ref = stage_ref.clone();
        let picked = picked.clone();
        let enabled = props.settings.coordinate_picker;
        Callback::from(move |e: MouseEvent| {
            if !enabled {
                return;
            }
            let Some(stage) = stage_ref.cast::<HtmlElement>() else { return };
            // The bounding rect already includes the zoom transform.
            let rect = stage.get_bounding_client_rect();
            let p = CoordinatePicker::pick(
                e.client_x() as f64 - rect.left(),
                e.client_y() as f64 - rect.top(),
                rect.width(),
                rect.height(),
            );
            if let Some(p) = p {
                log::info!("picked {}", CoordinatePicker::snippet(p));
            }
            picked.set(p);
        })
    };

    let zoom = props.animator.current_zoom();
    let stage_style = format!(
        "position:relative; width:100%; height:100%; transform:{}; transform-origin:0 0; transition:transform {}ms ease;",
        zoom.to_css(),
        props.settings.transition_ms()
    );
    let path = props.animator.current_path();
    let current = props.animator.current_index();
    let markers = profile
        .steps
        .iter()
        .enumerate()
        .take(current + 1)
        .filter_map(|(i, s)| s.point.map(|p| (i, s.entrapment, p)))
        .map(|(i, entrapment, p)| {
            let fill = match (i == current, entrapment) {
                (_, true) => "#f85149",
                (true, false) => "#58a6ff",
                (false, false) => "#1f6feb",
            };
            let r = if i == current { "1.4" } else { "0.9" };
            html! { <circle cx={p.x.to_string()} cy={p.y.to_string()} r={r} fill={fill} stroke="#0e1116" stroke-width="0.3" /> }
        });

    let step_label = format!("Step {} of {}", current + 1, props.animator.step_count());
    let cursor = if props.settings.coordinate_picker { "crosshair" } else { "default" };

    html! {<div style="flex:1; display:flex; gap:12px; padding:12px; min-height:0;">
        <div style="flex:1; display:flex; flex-direction:column; gap:8px; min-width:0;">
            <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for nerve_buttons }</div>
            <div style="position:relative; flex:1; overflow:hidden; border:1px solid #30363d; border-radius:8px; background:#0e1116;">
                <div ref={stage_ref} style={stage_style} onclick={pick_cb}>
                    <img src={format!("assets/{}.svg", profile.image)} alt="Upper limb reference illustration"
                        style={format!("position:absolute; inset:0; width:100%; height:100%; object-fit:fill; cursor:{cursor};")} />
                    <svg viewBox="0 0 100 100" preserveAspectRatio="none" style="position:absolute; inset:0; width:100%; height:100%; pointer-events:none;">
                        <polyline points={polyline_points(&path)} fill="none" stroke="#58a6ff" stroke-width="0.8"
                            stroke-linecap="round" stroke-linejoin="round" vector-effect="non-scaling-stroke" />
                        { for markers }
                    </svg>
                </div>
            </div>
            <div style="display:flex; align-items:center; gap:8px;">
                <button onclick={prev_cb} disabled={props.animator.is_first()}>{"← Previous"}</button>
                <span style="font-size:12px; opacity:0.8;">{ step_label }</span>
                <button onclick={next_cb} disabled={props.animator.is_last()}>{"Next →"}</button>
                { match (props.settings.coordinate_picker, *picked) {
                    (true, Some(p)) => html!{ <code style="margin-left:auto; font-size:11px; background:#161b22; padding:2px 6px; border-radius:4px;">{ CoordinatePicker::snippet(p) }</code> },
                    (true, None) => html!{ <span style="margin-left:auto; font-size:11px; opacity:0.7;">{"Click the illustration to read a coordinate"}</span> },
                    _ => html!{},
                } }
            </div>
        </div>
        <div style="width:300px; display:flex; flex-direction:column; gap:8px; min-height:0;">
            <div style="font-size:12px; line-height:1.45; color:#8b949e;">{ profile.narrative.clone() }</div>
            <StepTimeline animator={props.animator.clone()} />
        </div>
    </div>}
}
