//! Pathway graph and step library: the authored anatomy, loaded once and read-only afterwards.
//!
//! Loading resolves every segment's endpoint ids into coordinates and then runs a
//! validation pass, so authoring mistakes (a dangling id, a missing tag, a point
//! drawn off the canvas) fail at startup instead of misrendering.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use crate::error::AtlasError;
use crate::model::{
    Bounds, FallbackRule, InjuryDataset, InjuryPattern, JunctionNode, Label, NerveStepProfile,
    NodeKind, NodeRef, PlexusDataset, Point, RootNode, Segment, StepDataset, TerminalNerve,
};

const PLEXUS_JSON: &str = include_str!("data/plexus.json");
const INJURIES_JSON: &str = include_str!("data/injuries.json");
const PATHWAYS_JSON: &str = include_str!("data/pathways.json");

/// The segments and nodes one terminal nerve runs through. Derived on demand.
#[derive(Clone, Debug)]
pub struct Pathway<'a> {
    pub nerve: &'a TerminalNerve,
    /// Indices into [`PathwayGraph::segments`].
    pub segments: Vec<usize>,
    pub roots: Vec<&'a str>,
    pub junctions: Vec<&'a str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathwayGraph {
    bounds: Bounds,
    roots: Vec<RootNode>,
    junctions: Vec<JunctionNode>,
    terminals: Vec<TerminalNerve>,
    segments: Vec<Segment>,
    labels: Vec<Label>,
    fallback: Vec<FallbackRule>,
    injuries: Vec<InjuryPattern>,
    index: HashMap<String, (NodeKind, usize)>,
}

impl PathwayGraph {
    pub fn from_datasets(plexus: PlexusDataset, injuries: InjuryDataset) -> Result<Self, AtlasError> {
        let PlexusDataset {
            bounds,
            roots,
            junctions,
            terminals,
            segments: segment_specs,
            labels,
            fallback,
        } = plexus;

        let mut index = HashMap::new();
        let mut register = |id: &str, kind: NodeKind, i: usize| -> Result<(), AtlasError> {
            if index.insert(id.to_string(), (kind, i)).is_some() {
                return Err(AtlasError::DuplicateId(id.to_string()));
            }
            Ok(())
        };
        for (i, r) in roots.iter().enumerate() {
            register(&r.id, NodeKind::Root, i)?;
        }
        for (i, j) in junctions.iter().enumerate() {
            register(&j.id, NodeKind::Junction, i)?;
        }
        for (i, t) in terminals.iter().enumerate() {
            register(&t.id, NodeKind::Terminal, i)?;
        }

        let position_of = |id: &str| {
            index.get(id).map(|&(kind, i)| match kind {
                NodeKind::Root => roots[i].position,
                NodeKind::Junction => junctions[i].position,
                NodeKind::Terminal => terminals[i].position,
            })
        };

        let nerve_ids: HashSet<&str> = terminals.iter().map(|t| t.id.as_str()).collect();
        let mut segments = Vec::with_capacity(segment_specs.len());
        for (i, spec) in segment_specs.into_iter().enumerate() {
            let start = position_of(&spec.from).ok_or_else(|| AtlasError::DanglingEndpoint {
                index: i,
                node: spec.from.clone(),
            })?;
            let end = position_of(&spec.to).ok_or_else(|| AtlasError::DanglingEndpoint {
                index: i,
                node: spec.to.clone(),
            })?;
            if spec.nerves.is_empty() {
                return Err(AtlasError::EmptyTag {
                    index: i,
                    from: spec.from,
                    to: spec.to,
                });
            }
            if let Some(unknown) = spec.nerves.iter().find(|n| !nerve_ids.contains(n.as_str())) {
                return Err(AtlasError::UnknownNerveTag {
                    index: i,
                    nerve: unknown.clone(),
                });
            }
            segments.push(Segment {
                from: spec.from,
                to: spec.to,
                start,
                end,
                nerves: spec.nerves,
            });
        }

        let graph = Self {
            bounds,
            roots,
            junctions,
            terminals,
            segments,
            labels,
            fallback,
            injuries: injuries.injuries,
            index,
        };
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> Result<(), AtlasError> {
        let check = |what: String, p: Point| {
            if self.bounds.contains(p) {
                Ok(())
            } else {
                Err(AtlasError::OutOfBounds { what, x: p.x, y: p.y })
            }
        };
        for r in &self.roots {
            check(format!("root `{}`", r.id), r.position)?;
        }
        for j in &self.junctions {
            check(format!("junction `{}`", j.id), j.position)?;
        }
        for t in &self.terminals {
            check(format!("nerve `{}`", t.id), t.position)?;
        }
        for l in &self.labels {
            check(format!("label `{}`", l.text), l.position)?;
        }

        for t in &self.terminals {
            let carried: Vec<&Segment> = self.segments.iter().filter(|s| s.carries(&t.id)).collect();
            if carried.is_empty() {
                return Err(AtlasError::UntracedNerve(t.id.clone()));
            }
            let tagged: BTreeSet<&str> = carried
                .iter()
                .filter(|s| self.root(&s.from).is_some())
                .map(|s| s.from.as_str())
                .collect();
            let declared: BTreeSet<&str> = t.roots.iter().map(String::as_str).collect();
            if tagged != declared {
                return Err(AtlasError::RootMismatch {
                    nerve: t.id.clone(),
                    declared: declared.iter().map(|s| s.to_string()).collect(),
                    tagged: tagged.iter().map(|s| s.to_string()).collect(),
                });
            }
            for j in &t.pathway {
                if self.junction(j).is_none() {
                    return Err(AtlasError::UnknownStructure {
                        owner: format!("nerve `{}`", t.id),
                        id: j.clone(),
                    });
                }
                if !carried.iter().any(|s| s.touches(j)) {
                    return Err(AtlasError::PathwayMismatch {
                        nerve: t.id.clone(),
                        junction: j.clone(),
                    });
                }
            }
        }

        for rule in &self.fallback {
            if self.terminal(&rule.nerve).is_none() {
                return Err(AtlasError::UnknownStructure {
                    owner: "fallback rule".to_string(),
                    id: rule.nerve.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for injury in &self.injuries {
            if !seen.insert(injury.id.as_str()) {
                return Err(AtlasError::DuplicateId(injury.id.clone()));
            }
            if let Some(missing) = injury.affected.iter().find(|id| !self.index.contains_key(id.as_str())) {
                return Err(AtlasError::UnknownStructure {
                    owner: format!("injury `{}`", injury.id),
                    id: missing.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn roots(&self) -> &[RootNode] {
        &self.roots
    }

    pub fn junctions(&self) -> &[JunctionNode] {
        &self.junctions
    }

    pub fn terminals(&self) -> &[TerminalNerve] {
        &self.terminals
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn injuries(&self) -> &[InjuryPattern] {
        &self.injuries
    }

    pub fn fallback_rules(&self) -> impl Iterator<Item = &FallbackRule> {
        self.fallback.iter()
    }

    pub fn root(&self, id: &str) -> Option<&RootNode> {
        match self.index.get(id) {
            Some(&(NodeKind::Root, i)) => Some(&self.roots[i]),
            _ => None,
        }
    }

    pub fn junction(&self, id: &str) -> Option<&JunctionNode> {
        match self.index.get(id) {
            Some(&(NodeKind::Junction, i)) => Some(&self.junctions[i]),
            _ => None,
        }
    }

    pub fn terminal(&self, id: &str) -> Option<&TerminalNerve> {
        match self.index.get(id) {
            Some(&(NodeKind::Terminal, i)) => Some(&self.terminals[i]),
            _ => None,
        }
    }

    pub fn injury(&self, id: &str) -> Option<&InjuryPattern> {
        self.injuries.iter().find(|i| i.id == id)
    }

    pub fn node(&self, id: &str) -> Option<NodeRef<'_>> {
        let &(kind, i) = self.index.get(id)?;
        Some(match kind {
            NodeKind::Root => {
                let r = &self.roots[i];
                NodeRef { id: &r.id, kind, position: r.position, label: &r.label, description: &r.description }
            }
            NodeKind::Junction => {
                let j = &self.junctions[i];
                NodeRef { id: &j.id, kind, position: j.position, label: &j.label, description: "" }
            }
            NodeKind::Terminal => {
                let t = &self.terminals[i];
                NodeRef { id: &t.id, kind, position: t.position, label: &t.label, description: &t.description }
            }
        })
    }

    pub fn pathway(&self, nerve: &str) -> Option<Pathway<'_>> {
        let terminal = self.terminal(nerve)?;
        let segments = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.carries(nerve))
            .map(|(i, _)| i)
            .collect();
        Some(Pathway {
            nerve: terminal,
            segments,
            roots: terminal.roots.iter().map(String::as_str).collect(),
            junctions: terminal.pathway.iter().map(String::as_str).collect(),
        })
    }

    /// Nerves whose tagged segments touch `node`, e.g. every nerve C7 contributes to.
    pub fn nerves_through(&self, node: &str) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter(|s| s.touches(node))
            .flat_map(|s| s.nerves.iter().map(String::as_str))
            .collect()
    }
}

/// Per-nerve waypoint scripts for the step-by-step explorer.
#[derive(Clone, Debug, PartialEq)]
pub struct StepLibrary {
    profiles: Vec<NerveStepProfile>,
}

impl StepLibrary {
    pub fn from_dataset(data: StepDataset, graph: &PathwayGraph) -> Result<Self, AtlasError> {
        for profile in &data.profiles {
            if graph.terminal(&profile.nerve).is_none() {
                return Err(AtlasError::UnknownStructure {
                    owner: "step profile".to_string(),
                    id: profile.nerve.clone(),
                });
            }
            if profile.steps.is_empty() {
                return Err(AtlasError::EmptyProfile(profile.nerve.clone()));
            }
            for (i, step) in profile.steps.iter().enumerate() {
                if let Some(p) = step.point {
                    if !(0.0..=100.0).contains(&p.x) || !(0.0..=100.0).contains(&p.y) {
                        return Err(AtlasError::StepOutOfRange {
                            nerve: profile.nerve.clone(),
                            index: i,
                            x: p.x,
                            y: p.y,
                        });
                    }
                }
            }
        }
        Ok(Self { profiles: data.profiles })
    }

    pub fn profile(&self, nerve: &str) -> Option<&NerveStepProfile> {
        self.profiles.iter().find(|p| p.nerve == nerve)
    }

    pub fn nerves(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.nerve.as_str())
    }
}

/// Everything the app reads: diagram graph plus explorer scripts.
#[derive(Clone, Debug, PartialEq)]
pub struct Atlas {
    pub graph: Rc<PathwayGraph>,
    pub steps: Rc<StepLibrary>,
}

impl Atlas {
    pub fn from_json(plexus: &str, injuries: &str, pathways: &str) -> Result<Self, AtlasError> {
        let plexus: PlexusDataset = serde_json::from_str(plexus)
            .map_err(|source| AtlasError::Parse { dataset: "plexus", source })?;
        let injuries: InjuryDataset = serde_json::from_str(injuries)
            .map_err(|source| AtlasError::Parse { dataset: "injuries", source })?;
        let pathways: StepDataset = serde_json::from_str(pathways)
            .map_err(|source| AtlasError::Parse { dataset: "pathways", source })?;
        let graph = PathwayGraph::from_datasets(plexus, injuries)?;
        let steps = StepLibrary::from_dataset(pathways, &graph)?;
        log::debug!(
            "atlas loaded: {} roots, {} segments, {} nerves, {} injuries",
            graph.roots().len(),
            graph.segments().len(),
            graph.terminals().len(),
            graph.injuries().len()
        );
        Ok(Self {
            graph: Rc::new(graph),
            steps: Rc::new(steps),
        })
    }

    /// Datasets compiled into the binary.
    pub fn load_embedded() -> Result<Self, AtlasError> {
        Self::from_json(PLEXUS_JSON, INJURIES_JSON, PATHWAYS_JSON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_INJURIES: &str = r#"{ "injuries": [] }"#;
    const EMPTY_STEPS: &str = r#"{ "profiles": [] }"#;

    fn tiny_plexus(segments: &str) -> String {
        format!(
            r#"{{
                "bounds": {{ "width": 100, "height": 100 }},
                "roots": [{{ "id": "C8", "position": {{ "x": 10, "y": 10 }}, "label": "C8", "description": "" }}],
                "junctions": [{{ "id": "trunk", "position": {{ "x": 50, "y": 10 }}, "label": "Trunk" }}],
                "terminals": [{{ "id": "ulnar", "position": {{ "x": 90, "y": 10 }}, "label": "Ulnar",
                    "description": "", "roots": ["C8"], "muscles": [], "sensory": "", "pathway": ["trunk"] }}],
                "segments": {segments}
            }}"#
        )
    }

    #[test]
    fn embedded_datasets_load() {
        let atlas = Atlas::load_embedded().expect("embedded atlas is valid");
        assert_eq!(atlas.graph.roots().len(), 5);
        assert!(atlas.graph.terminal("ulnar").is_some());
        assert!(atlas.graph.injury("erb").is_some());
        assert!(atlas.steps.profile("median").is_some());
    }

    #[test]
    fn segment_endpoints_resolve_to_node_positions() {
        let atlas = Atlas::load_embedded().unwrap();
        let g = &atlas.graph;
        for s in g.segments() {
            assert_eq!(s.start, g.node(&s.from).unwrap().position);
            assert_eq!(s.end, g.node(&s.to).unwrap().position);
        }
    }

    #[test]
    fn ulnar_pathway_leaves_only_c8_and_t1() {
        let atlas = Atlas::load_embedded().unwrap();
        let p = atlas.graph.pathway("ulnar").unwrap();
        assert_eq!(p.roots, vec!["C8", "T1"]);
        assert_eq!(p.segments.len(), 5);
        assert!(atlas.graph.pathway("phrenic").is_none());
    }

    #[test]
    fn nerves_through_c7() {
        let atlas = Atlas::load_embedded().unwrap();
        let through: Vec<&str> = atlas.graph.nerves_through("C7").into_iter().collect();
        assert_eq!(through, vec!["median", "musculocutaneous", "radial"]);
    }

    #[test]
    fn empty_tag_is_rejected() {
        let plexus = tiny_plexus(r#"[{ "from": "C8", "to": "trunk", "nerves": [] }]"#);
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::EmptyTag { index: 0, .. }));
    }

    #[test]
    fn dangling_endpoint_is_rejected() {
        let plexus = tiny_plexus(r#"[{ "from": "C9", "to": "trunk", "nerves": ["ulnar"] }]"#);
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::DanglingEndpoint { ref node, .. } if node == "C9"));
    }

    #[test]
    fn declared_roots_must_match_tagging() {
        // Nothing leaves C8 tagged for the ulnar nerve.
        let plexus = tiny_plexus(r#"[{ "from": "trunk", "to": "ulnar", "nerves": ["ulnar"] }]"#);
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::RootMismatch { .. }));
    }

    #[test]
    fn out_of_bounds_node_is_rejected() {
        let plexus = tiny_plexus(
            r#"[{ "from": "C8", "to": "trunk", "nerves": ["ulnar"] },
                { "from": "trunk", "to": "ulnar", "nerves": ["ulnar"] }]"#,
        )
        .replace(r#""x": 90, "y": 10"#, r#""x": 140, "y": 10"#);
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::OutOfBounds { .. }));
    }

    #[test]
    fn step_coordinates_must_be_percentages() {
        let plexus = tiny_plexus(
            r#"[{ "from": "C8", "to": "trunk", "nerves": ["ulnar"] },
                { "from": "trunk", "to": "ulnar", "nerves": ["ulnar"] }]"#,
        );
        let steps = r#"{ "profiles": [{ "nerve": "ulnar", "narrative": "", "image": "arm",
            "steps": [{ "title": "Elbow", "description": "", "point": { "x": 120, "y": 40 } }] }] }"#;
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, steps).unwrap_err();
        assert!(matches!(err, AtlasError::StepOutOfRange { index: 0, .. }));
    }

    #[test]
    fn injury_must_reference_known_structures() {
        let plexus = tiny_plexus(
            r#"[{ "from": "C8", "to": "trunk", "nerves": ["ulnar"] },
                { "from": "trunk", "to": "ulnar", "nerves": ["ulnar"] }]"#,
        );
        let injuries = r#"{ "injuries": [{ "id": "x", "title": "X", "affected": ["C4"],
            "mechanism": "", "clinical": [], "emg": [] }] }"#;
        let err = Atlas::from_json(&plexus, injuries, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::UnknownStructure { ref id, .. } if id == "C4"));
    }

    #[test]
    fn malformed_json_reports_dataset() {
        let err = Atlas::from_json("{", EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::Parse { dataset: "plexus", .. }));
    }

    const TRACED: &str = r#"[{ "from": "C8", "to": "trunk", "nerves": ["ulnar"] },
        { "from": "trunk", "to": "ulnar", "nerves": ["ulnar"] }]"#;

    #[test]
    fn tiny_plexus_is_valid() {
        let atlas = Atlas::from_json(&tiny_plexus(TRACED), EMPTY_INJURIES, EMPTY_STEPS).unwrap();
        assert_eq!(atlas.graph.segments().len(), 2);
    }

    #[test]
    fn unknown_nerve_tag_is_rejected() {
        let plexus = tiny_plexus(r#"[{ "from": "C8", "to": "trunk", "nerves": ["ulnar", "radial"] }]"#);
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::UnknownNerveTag { index: 0, ref nerve } if nerve == "radial"));
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let plexus = tiny_plexus(TRACED).replace(r#""id": "trunk""#, r#""id": "C8""#);
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::DuplicateId(ref id) if id == "C8"));
    }

    #[test]
    fn duplicate_injury_id_is_rejected() {
        let injuries = r#"{ "injuries": [
            { "id": "lesion", "title": "A", "affected": ["C8"], "mechanism": "", "clinical": [], "emg": [] },
            { "id": "lesion", "title": "B", "affected": ["trunk"], "mechanism": "", "clinical": [], "emg": [] }
        ] }"#;
        let err = Atlas::from_json(&tiny_plexus(TRACED), injuries, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::DuplicateId(ref id) if id == "lesion"));
    }

    #[test]
    fn nerve_without_segments_is_rejected() {
        let err = Atlas::from_json(&tiny_plexus("[]"), EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::UntracedNerve(ref id) if id == "ulnar"));
    }

    #[test]
    fn pathway_junction_must_be_passed() {
        // Roots agree, but the listed trunk is skipped.
        let plexus = tiny_plexus(r#"[{ "from": "C8", "to": "ulnar", "nerves": ["ulnar"] }]"#);
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(matches!(err, AtlasError::PathwayMismatch { ref junction, .. } if junction == "trunk"));
    }

    #[test]
    fn fallback_rule_must_name_a_known_nerve() {
        let plexus = tiny_plexus(&format!(r#"{TRACED}, "fallback": [{{ "nerve": "radial", "y": 10 }}]"#));
        let err = Atlas::from_json(&plexus, EMPTY_INJURIES, EMPTY_STEPS).unwrap_err();
        assert!(
            matches!(err, AtlasError::UnknownStructure { ref owner, ref id } if owner == "fallback rule" && id == "radial")
        );
    }

    #[test]
    fn step_profile_needs_steps() {
        let steps = r#"{ "profiles": [{ "nerve": "ulnar", "narrative": "", "image": "arm", "steps": [] }] }"#;
        let err = Atlas::from_json(&tiny_plexus(TRACED), EMPTY_INJURIES, steps).unwrap_err();
        assert!(matches!(err, AtlasError::EmptyProfile(ref id) if id == "ulnar"));
    }
}
