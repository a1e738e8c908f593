use super::legend::LegendRow;
use crate::scene::{style_for, ShapeKind, ShapeState};
use crate::state::TraceMode;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub mode: TraceMode,
}

fn legend_rows(mode: &TraceMode) -> &'static [(&'static str, ShapeKind, ShapeState)] {
    use ShapeKind::*;
    use ShapeState::*;
    match mode {
        TraceMode::Idle => &[
            ("Shared segment", Segment, Default),
            ("Spinal root", Root, Default),
            ("Terminal nerve", Terminal, Default),
        ],
        TraceMode::Nerve(_) => &[
            ("Traced pathway", Segment, Highlighted),
            ("Other nerves", Segment, Dimmed),
            ("Contributing root", Root, Highlighted),
            ("Selected nerve", Terminal, Active),
        ],
        TraceMode::Injury(_) => &[
            ("Injured segment", Segment, Injured),
            ("Affected structure", Root, Injured),
            ("Affected trunk / cord", Junction, Injured),
        ],
    }
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    let rows = legend_rows(&props.mode).iter().map(|&(label, kind, state)| {
        html! { <LegendRow style={style_for(kind, state)} {label} line={kind == ShapeKind::Segment} /> }
    });
    html! {<div style="position:absolute; left:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:170px; font-size:12px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        { for rows }
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_nerves_swatch_is_the_dimmed_segment() {
        let rows = legend_rows(&TraceMode::Nerve("ulnar".into()));
        let &(_, kind, state) = rows.iter().find(|(label, ..)| *label == "Other nerves").unwrap();
        assert_eq!((kind, state), (ShapeKind::Segment, ShapeState::Dimmed));
        let painted = style_for(kind, state);
        assert_eq!(painted.stroke, "#8b949e");
        assert!(painted.opacity < 0.5);
    }

    #[test]
    fn every_swatch_is_visible() {
        for mode in [TraceMode::Idle, TraceMode::Nerve("x".into()), TraceMode::Injury("y".into())] {
            for &(label, kind, state) in legend_rows(&mode) {
                assert!(style_for(kind, state).is_visible(), "{label}");
            }
        }
    }
}
