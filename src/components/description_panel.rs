use crate::state::Description;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DescriptionPanelProps {
    pub description: Description,
}

#[function_component]
pub fn DescriptionPanel(props: &DescriptionPanelProps) -> Html {
    let d = &props.description;

    let panel_style = "background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:8px; \
        padding:12px 16px; font-size:13px; color:#c9d1d9; overflow-y:auto;";
    let section_style = "margin-top:10px; padding-top:8px; border-top:1px solid #30363d;";
    let stat_row_style = "display:flex; justify-content:space-between; gap:12px; margin:4px 0; font-size:12px;";

    let facts = d.facts.iter().map(|(k, v)| {
        html! { <div style={stat_row_style}><span style="color:#8b949e;">{ *k }</span><span style="font-weight:500; text-align:right;">{ v.clone() }</span></div> }
    });
    let lists = d.lists.iter().filter(|(_, items)| !items.is_empty()).map(|(heading, items)| {
        html! {<div style={section_style}>
            <div style="font-weight:600; font-size:12px; margin-bottom:4px;">{ *heading }</div>
            <ul style="margin:0; padding-left:18px; font-size:12px; line-height:1.45;">
                { for items.iter().map(|i| html!{ <li>{ i.clone() }</li> }) }
            </ul>
        </div>}
    });

    html! {<div id="description-panel" style={panel_style}>
        <div style="font-weight:600; font-size:15px; margin-bottom:6px;">{ d.title.clone() }</div>
        <div style="line-height:1.45;">{ d.summary.clone() }</div>
        { if d.facts.is_empty() { html!{} } else { html!{ <div style={section_style}>{ for facts }</div> } } }
        { for lists }
    </div>}
}
