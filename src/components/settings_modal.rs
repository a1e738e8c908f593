use crate::settings::ViewerSettings;
use crate::state::stepwise::ZOOM_RANGE;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: ViewerSettings,
    pub on_change: Callback<ViewerSettings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle = |flip: fn(&mut ViewerSettings)| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = current.clone();
            flip(&mut next);
            cb.emit(next);
        })
    };
    let toggle_tooltips_cb = toggle(|s| s.show_tooltips = !s.show_tooltips);
    let toggle_labels_cb = toggle(|s| s.show_column_labels = !s.show_column_labels);
    let toggle_motion_cb = toggle(|s| s.reduced_motion = !s.reduced_motion);
    let toggle_picker_cb = toggle(|s| s.coordinate_picker = !s.coordinate_picker);
    let zoom_cb = {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                let mut next = current.clone();
                next.entrapment_zoom = v;
                cb.emit(next);
            }
        })
    };
    let reset_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(ViewerSettings::default()))
    };

    let s = &props.settings;
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.show_tooltips} onclick={toggle_tooltips_cb} />
                    <span>{"Show tooltips"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.show_column_labels} onclick={toggle_labels_cb} />
                    <span>{"Show column labels"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.reduced_motion} onclick={toggle_motion_cb} />
                    <span>{"Reduce motion"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.coordinate_picker} onclick={toggle_picker_cb} />
                    <span>{"Coordinate picker (explorer)"}</span>
                </label>
                <label style="display:flex; flex-direction:column; gap:4px;">
                    <span>{ format!("Entrapment zoom: {:.1}×", s.entrapment_zoom) }</span>
                    <input type="range" min={ZOOM_RANGE.0.to_string()} max={ZOOM_RANGE.1.to_string()} step="0.5"
                        value={s.entrapment_zoom.to_string()} oninput={zoom_cb} />
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="flex:1;">{"Restore defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings are stored in this browser only."}</div>
        </div>
    </div>}
}
