use crate::state::{StepAction, StepPhase, StepwiseAnimator};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StepTimelineProps {
    pub animator: UseReducerHandle<StepwiseAnimator>,
}

fn phase_style(phase: StepPhase, entrapment: bool) -> &'static str {
    match (phase, entrapment) {
        (StepPhase::Active, true) => "border-left:3px solid #f85149; background:#2d1416; opacity:1;",
        (StepPhase::Active, false) => "border-left:3px solid #58a6ff; background:#0d2340; opacity:1;",
        (StepPhase::Past, _) => "border-left:3px solid #1f6feb; opacity:0.75;",
        (StepPhase::Future, _) => "border-left:3px solid #30363d; opacity:0.45;",
    }
}

#[function_component]
pub fn StepTimeline(props: &StepTimelineProps) -> Html {
    let entries = props.animator.timeline();
    if entries.is_empty() {
        return html! {};
    }
    let rows = entries.into_iter().map(|entry| {
        let onclick = {
            let handle = props.animator.clone();
            let k = entry.index;
            Callback::from(move |_| handle.dispatch(StepAction::GoTo(k)))
        };
        let style = format!(
            "padding:6px 8px; border-radius:4px; cursor:pointer; {}",
            phase_style(entry.phase, entry.step.entrapment)
        );
        html! {<li key={entry.index} {onclick} style={style}>
            <div style="font-size:12px; font-weight:600;">
                { format!("{}. {}", entry.index + 1, entry.step.title) }
                { if entry.step.entrapment { html!{ <span style="margin-left:6px; color:#ff7b72; font-size:11px;">{"entrapment"}</span> } } else { html!{} } }
            </div>
            { if entry.phase == StepPhase::Active { html!{ <div style="font-size:12px; line-height:1.4; margin-top:4px;">{ entry.step.description.clone() }</div> } } else { html!{} } }
        </li>}
    });
    html! {<ol id="step-timeline" style="list-style:none; margin:0; padding:0; display:flex; flex-direction:column; gap:4px; overflow-y:auto;">
        { for rows }
    </ol>}
}
