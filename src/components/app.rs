use std::rc::Rc;

use super::{
    description_panel::DescriptionPanel, diagram_view::DiagramView, injury_panel::InjuryPanel,
    legend_panel::LegendPanel, nerve_panel::NervePanel, pathway_explorer::PathwayExplorer,
    settings_modal::SettingsModal,
};
use crate::atlas::Atlas;
use crate::scene::SceneGraph;
use crate::settings::ViewerSettings;
use crate::state::{StepAction, StepwiseAnimator, TracingAction, TracingController};
use yew::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum View {
    Diagram,
    Explorer,
}

#[function_component(App)]
pub fn app() -> Html {
    let atlas = use_memo((), |_| Atlas::load_embedded());
    match &*atlas {
        Ok(atlas) => html! { <Workspace atlas={atlas.clone()} /> },
        Err(e) => {
            log::error!("failed to load anatomy data: {e}");
            html! {<div style="padding:24px; color:#ff7b72; font-family:system-ui, sans-serif;">
                <h3 style="margin-top:0;">{"Anatomy data could not be loaded"}</h3>
                <code style="white-space:pre-wrap;">{ e.to_string() }</code>
            </div>}
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
struct WorkspaceProps {
    atlas: Atlas,
}

#[function_component]
fn Workspace(props: &WorkspaceProps) -> Html {
    let view = use_state(|| View::Diagram);
    let show_settings = use_state(|| false);
    let settings = use_state(ViewerSettings::load);
    let tracing = {
        let graph = props.atlas.graph.clone();
        let options = settings.render_options();
        use_reducer(move || TracingController::new(graph, SceneGraph::new(), options))
    };
    let animator = {
        let steps = props.atlas.steps.clone();
        let zoom = settings.entrapment_zoom;
        use_reducer(move || StepwiseAnimator::new(steps, zoom))
    };

    // Persist settings and push them into both state machines
    {
        let tracing = tracing.clone();
        let animator = animator.clone();
        use_effect_with((*settings).clone(), move |s| {
            s.save();
            if tracing.options() != s.render_options() {
                tracing.dispatch(TracingAction::Redraw(s.render_options()));
            }
            animator.dispatch(StepAction::SetZoom(s.entrapment_zoom));
            || ()
        });
    }

    let select_nerve = {
        let tracing = tracing.clone();
        Callback::from(move |id: String| tracing.dispatch(TracingAction::SelectNerve(id)))
    };
    let show_injury = {
        let tracing = tracing.clone();
        Callback::from(move |id: String| tracing.dispatch(TracingAction::ShowInjury(id)))
    };
    let clear = {
        let tracing = tracing.clone();
        Callback::from(move |_| tracing.dispatch(TracingAction::Clear))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };
    let change_settings = {
        let settings = settings.clone();
        Callback::from(move |s: ViewerSettings| settings.set(s))
    };
    let to_diagram = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Diagram))
    };
    // Opening the explorer picks up the nerve traced on the diagram
    let to_explorer = {
        let view = view.clone();
        let tracing = tracing.clone();
        let animator = animator.clone();
        Callback::from(move |_| {
            if let Some(id) = tracing.active_nerve() {
                if animator.selected() != Some(id) {
                    animator.dispatch(StepAction::SelectNerve(id.to_string()));
                }
            }
            view.set(View::Explorer)
        })
    };

    let graph = props.atlas.graph.clone();
    let tab_style = |active: bool| {
        if active {
            "background:#1f6feb; border:1px solid #58a6ff; color:#fff;"
        } else {
            ""
        }
    };

    let content = match *view {
        View::Diagram => html! {<div style="flex:1; display:flex; min-height:0;">
            <div style="position:relative; flex:1; display:flex; min-width:0;">
                <DiagramView tracing={tracing.clone()} show_tooltips={settings.show_tooltips} />
                <LegendPanel mode={tracing.mode().clone()} />
            </div>
            <div style="width:320px; display:flex; flex-direction:column; gap:10px; padding:12px; border-left:1px solid #30363d; overflow-y:auto;">
                <NervePanel
                    graph={Rc::clone(&graph)}
                    active={tracing.active_nerve().map(str::to_string)}
                    on_select={select_nerve}
                    can_clear={tracing.can_clear()}
                    on_clear={clear}
                />
                <InjuryPanel
                    graph={Rc::clone(&graph)}
                    active={tracing.active_injury().map(str::to_string)}
                    on_select={show_injury}
                />
                <DescriptionPanel description={tracing.description()} />
            </div>
        </div>},
        View::Explorer => {
            let nerves = props
                .atlas
                .steps
                .nerves()
                .filter_map(|id| graph.terminal(id))
                .map(|t| (t.id.clone(), t.label.clone()))
                .collect::<Vec<_>>();
            html! { <PathwayExplorer animator={animator.clone()} settings={(*settings).clone()} {nerves} /> }
        }
    };

    html! {<div style="position:relative; height:100vh; display:flex; flex-direction:column; background:#0e1116; color:#c9d1d9; font-family:system-ui, sans-serif;">
        <div id="top-bar" style="display:flex; align-items:center; gap:8px; padding:8px 12px; border-bottom:1px solid #30363d;">
            <span style="font-weight:600; margin-right:12px;">{"Brachial Plexus Tracer"}</span>
            <button onclick={to_diagram} style={tab_style(*view == View::Diagram)}>{"Diagram"}</button>
            <button onclick={to_explorer} style={tab_style(*view == View::Explorer)}>{"Step-by-step"}</button>
            <button onclick={open_settings} style="margin-left:auto;">{"Settings"}</button>
        </div>
        { content }
        <SettingsModal
            show={*show_settings}
            settings={(*settings).clone()}
            on_change={change_settings}
            on_close={close_settings}
        />
    </div>}
}
