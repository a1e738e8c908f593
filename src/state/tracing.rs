//! Selection state machine for the multi-nerve diagram.

use std::rc::Rc;

use yew::Reducible;

use crate::atlas::PathwayGraph;
use crate::highlight::{self, HighlightTarget};
use crate::render::{render, RenderOptions};
use crate::scene::{SceneGraph, Surface};
use crate::util::format_root_range;

pub const DEFAULT_TITLE: &str = "Brachial plexus";
pub const DEFAULT_SUMMARY: &str = "Select a terminal nerve to trace its course back to the spinal roots, \
    or an injury pattern to see which structures it involves.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TraceMode {
    #[default]
    Idle,
    Nerve(String),
    Injury(String),
}

/// Text for the description panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Description {
    pub title: String,
    pub summary: String,
    pub facts: Vec<(&'static str, String)>,
    pub lists: Vec<(&'static str, Vec<String>)>,
}

impl Default for Description {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            facts: Vec::new(),
            lists: Vec::new(),
        }
    }
}

/// Owns the drawn scene and the current selection. One per diagram instance.
#[derive(Clone, Debug, PartialEq)]
pub struct TracingController<S = SceneGraph> {
    graph: Rc<PathwayGraph>,
    surface: S,
    options: RenderOptions,
    mode: TraceMode,
    /// Root whose details the panel shows; dropped on every transition.
    inspected: Option<String>,
}

impl<S: Surface> TracingController<S> {
    pub fn new(graph: Rc<PathwayGraph>, mut surface: S, options: RenderOptions) -> Self {
        render(&graph, &mut surface, options);
        Self { graph, surface, options, mode: TraceMode::Idle, inspected: None }
    }

    /// idle | nerve | injury -> nerve. Unknown ids leave everything as it was.
    pub fn select_nerve(&mut self, id: &str) -> bool {
        if !highlight::apply(&self.graph, &mut self.surface, HighlightTarget::Nerve(id)).is_applied() {
            return false;
        }
        log::debug!("trace: {:?} -> nerve `{id}`", self.mode);
        self.mode = TraceMode::Nerve(id.to_string());
        self.inspected = None;
        true
    }

    /// idle | nerve | injury -> injury. Any nerve trace is cleared by the reset pass.
    pub fn show_injury(&mut self, id: &str) -> bool {
        if !highlight::apply(&self.graph, &mut self.surface, HighlightTarget::Injury(id)).is_applied() {
            return false;
        }
        log::debug!("trace: {:?} -> injury `{id}`", self.mode);
        self.mode = TraceMode::Injury(id.to_string());
        self.inspected = None;
        true
    }

    /// any -> idle.
    pub fn clear_tracing(&mut self) {
        highlight::clear(&mut self.surface);
        self.mode = TraceMode::Idle;
        self.inspected = None;
    }

    /// Show a root's details without touching the highlight state.
    pub fn inspect(&mut self, id: &str) -> bool {
        if self.graph.root(id).is_none() {
            log::warn!("inspect ignored: `{id}` is not a root");
            return false;
        }
        self.inspected = Some(id.to_string());
        true
    }

    /// Rebuild the scene (e.g. after a settings change) and re-apply the current selection.
    pub fn redraw(&mut self, options: RenderOptions) {
        self.options = options;
        render(&self.graph, &mut self.surface, options);
        match self.mode.clone() {
            TraceMode::Idle => {}
            TraceMode::Nerve(id) => {
                highlight::apply(&self.graph, &mut self.surface, HighlightTarget::Nerve(&id));
            }
            TraceMode::Injury(id) => {
                highlight::apply(&self.graph, &mut self.surface, HighlightTarget::Injury(&id));
            }
        }
    }

    pub fn mode(&self) -> &TraceMode {
        &self.mode
    }

    pub fn active_nerve(&self) -> Option<&str> {
        match &self.mode {
            TraceMode::Nerve(id) => Some(id),
            _ => None,
        }
    }

    /// Whether a clear would change anything: true in nerve and injury mode.
    pub fn can_clear(&self) -> bool {
        self.mode != TraceMode::Idle
    }

    pub fn active_injury(&self) -> Option<&str> {
        match &self.mode {
            TraceMode::Injury(id) => Some(id),
            _ => None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn graph(&self) -> &PathwayGraph {
        &self.graph
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn description(&self) -> Description {
        if let Some(root) = self.inspected.as_deref().and_then(|id| self.graph.root(id)) {
            let feeds = self
                .graph
                .nerves_through(&root.id)
                .into_iter()
                .filter_map(|n| self.graph.terminal(n))
                .map(|t| t.label.clone())
                .collect();
            return Description {
                title: format!("{} root", root.label),
                summary: root.description.clone(),
                facts: Vec::new(),
                lists: vec![("Contributes to", feeds)],
            };
        }
        match &self.mode {
            TraceMode::Idle => Description::default(),
            TraceMode::Nerve(id) => self.nerve_description(id),
            TraceMode::Injury(id) => self.injury_description(id),
        }
    }

    fn nerve_description(&self, id: &str) -> Description {
        let Some(nerve) = self.graph.terminal(id) else {
            return Description::default();
        };
        let mut shared: Vec<String> = self
            .graph
            .segments()
            .iter()
            .filter(|s| s.carries(id))
            .flat_map(|s| s.nerves.iter())
            .filter(|n| n.as_str() != id)
            .filter_map(|n| self.graph.terminal(n))
            .map(|t| t.label.clone())
            .collect();
        shared.sort();
        shared.dedup();
        Description {
            title: format!("{} nerve", nerve.label),
            summary: nerve.description.clone(),
            facts: vec![
                ("Roots", format_root_range(&nerve.roots)),
                ("Sensory", nerve.sensory.clone()),
            ],
            lists: vec![("Muscles", nerve.muscles.clone()), ("Shares segments with", shared)],
        }
    }

    fn injury_description(&self, id: &str) -> Description {
        let Some(injury) = self.graph.injury(id) else {
            return Description::default();
        };
        let affected = injury
            .affected
            .iter()
            .map(|a| self.graph.node(a).map_or_else(|| a.clone(), |n| n.label.to_string()))
            .collect();
        Description {
            title: injury.title.clone(),
            summary: injury.mechanism.clone(),
            facts: Vec::new(),
            lists: vec![
                ("Affected structures", affected),
                ("Clinical findings", injury.clinical.clone()),
                ("EMG / nerve conduction", injury.emg.clone()),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TracingAction {
    SelectNerve(String),
    ShowInjury(String),
    Clear,
    Inspect(String),
    Redraw(RenderOptions),
}

impl Reducible for TracingController<SceneGraph> {
    type Action = TracingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use TracingAction::*;
        let mut new = (*self).clone();
        let changed = match action {
            SelectNerve(id) => new.select_nerve(&id),
            ShowInjury(id) => new.show_injury(&id),
            Clear => {
                new.clear_tracing();
                true
            }
            Inspect(id) => new.inspect(&id),
            Redraw(options) => {
                new.redraw(options);
                true
            }
        };
        if changed { Rc::new(new) } else { self }
    }
}
