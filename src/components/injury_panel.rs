use std::rc::Rc;

use crate::atlas::PathwayGraph;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct InjuryPanelProps {
    pub graph: Rc<PathwayGraph>,
    pub active: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component]
pub fn InjuryPanel(props: &InjuryPanelProps) -> Html {
    let rows = props.graph.injuries().iter().map(|inj| {
        let is_active = props.active.as_deref() == Some(inj.id.as_str());
        let onclick = {
            let cb = props.on_select.clone();
            let id = inj.id.clone();
            Callback::from(move |_| cb.emit(id.clone()))
        };
        let style = if is_active {
            "text-align:left; background:#5a2320; border:1px solid #f85149; color:#fff;"
        } else {
            "text-align:left;"
        };
        html! { <button key={inj.id.clone()} {onclick} style={style}>{ inj.title.clone() }</button> }
    });
    html! {<div style="display:flex; flex-direction:column; gap:6px; padding-top:8px; border-top:1px solid #30363d;">
        <div style="font-weight:600; font-size:13px;">{"Injury patterns"}</div>
        { for rows }
    </div>}
}
