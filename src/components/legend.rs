use crate::scene::Style;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub style: Style,
    pub label: &'static str,
    #[prop_or(false)]
    pub line: bool,
}

/// Swatch painted with the same colour and opacity the canvas uses.
#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    let s = &props.style;
    let swatch = if props.line {
        format!(
            "display:inline-block; width:18px; height:4px; background:{}; opacity:{}; border-radius:2px;",
            s.stroke, s.opacity
        )
    } else {
        format!(
            "display:inline-block; width:12px; height:12px; background:{}; border:1px solid {}; opacity:{}; border-radius:2px;",
            s.fill.unwrap_or(s.stroke),
            s.stroke,
            s.opacity
        )
    };
    html! { <div style="display:flex; align-items:center; gap:8px; margin:3px 0;"> <span style={swatch}></span> <span>{ props.label }</span> </div> }
}
