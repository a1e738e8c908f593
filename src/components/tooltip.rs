use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipInfo {
    /// Canvas-relative pointer position.
    pub x: f64,
    pub y: f64,
    pub title: String,
    pub body: String,
    pub detail: Option<String>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct TooltipProps {
    pub info: Option<TooltipInfo>,
}

#[function_component(Tooltip)]
pub fn tooltip(props: &TooltipProps) -> Html {
    let Some(info) = &props.info else {
        return html! {};
    };
    let style = format!(
        "position:absolute; left:{:.0}px; top:{:.0}px; pointer-events:none; \
         background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:8px; \
         padding:8px 10px; max-width:280px; font-size:12px; line-height:1.35; color:#c9d1d9;",
        info.x + 14.0,
        info.y + 14.0
    );
    html! {<div style={style}>
        <div style="font-weight:600; font-size:13px; margin-bottom:4px;">{ info.title.clone() }</div>
        { if info.body.is_empty() { html!{} } else { html!{ <div style="color:#8b949e;">{ info.body.clone() }</div> } } }
        { if let Some(d) = &info.detail { html!{ <div style="margin-top:6px; color:#58a6ff;">{ d.clone() }</div> } } else { html!{} } }
    </div>}
}
