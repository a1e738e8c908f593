use std::rc::Rc;

use crate::atlas::PathwayGraph;
use crate::util::format_root_range;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NervePanelProps {
    pub graph: Rc<PathwayGraph>,
    pub active: Option<String>,
    pub on_select: Callback<String>,
    /// Anything traced, nerve or injury.
    pub can_clear: bool,
    pub on_clear: Callback<()>,
}

#[function_component]
pub fn NervePanel(props: &NervePanelProps) -> Html {
    let clear_cb = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let buttons = props.graph.terminals().iter().map(|t| {
        let is_active = props.active.as_deref() == Some(t.id.as_str());
        let onclick = {
            let cb = props.on_select.clone();
            let id = t.id.clone();
            Callback::from(move |_| cb.emit(id.clone()))
        };
        let style = if is_active {
            "display:flex; justify-content:space-between; gap:8px; background:#1f6feb; border:1px solid #58a6ff; color:#fff;"
        } else {
            "display:flex; justify-content:space-between; gap:8px;"
        };
        html! {
            <button key={t.id.clone()} {onclick} style={style} aria-pressed={is_active.to_string()}>
                <span>{ t.label.clone() }</span>
                <span style="opacity:0.7; font-size:11px;">{ format_root_range(&t.roots) }</span>
            </button>
        }
    });
    html! {<div style="display:flex; flex-direction:column; gap:6px;">
        <div style="font-weight:600; font-size:13px;">{"Trace a nerve"}</div>
        { for buttons }
        <button onclick={clear_cb} style="margin-top:4px;" disabled={!props.can_clear}>{"Clear"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Click a nerve box or root on the diagram. Esc clears."}</div>
    </div>}
}
