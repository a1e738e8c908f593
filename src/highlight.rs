//! Turns a selected nerve or injury into per-shape states on the surface.

use crate::atlas::PathwayGraph;
use crate::scene::{Geometry, ShapeKind, ShapeState, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightTarget<'a> {
    Nerve(&'a str),
    Injury(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied { segments: usize, nodes: usize },
    /// Id not in the atlas; the surface was left untouched.
    Unknown,
}

impl Resolution {
    pub fn is_applied(self) -> bool {
        matches!(self, Resolution::Applied { .. })
    }
}

pub fn apply<S: Surface>(graph: &PathwayGraph, surface: &mut S, target: HighlightTarget<'_>) -> Resolution {
    match target {
        HighlightTarget::Nerve(id) => trace_nerve(graph, surface, id),
        HighlightTarget::Injury(id) => mark_injury(graph, surface, id),
    }
}

/// Every shape back to its freshly rendered state.
pub fn clear<S: Surface>(surface: &mut S) {
    for id in 0..surface.len() {
        surface.set_state(id, ShapeState::Default);
    }
}

fn reset<S: Surface>(surface: &mut S) {
    for id in 0..surface.len() {
        let next = match surface.shape(id).map(|s| s.kind) {
            Some(ShapeKind::Segment) => ShapeState::Dimmed,
            Some(_) => ShapeState::Default,
            None => continue,
        };
        surface.set_state(id, next);
    }
}

fn trace_nerve<S: Surface>(graph: &PathwayGraph, surface: &mut S, nerve_id: &str) -> Resolution {
    let Some(nerve) = graph.terminal(nerve_id) else {
        log::warn!("trace ignored: unknown nerve `{nerve_id}`");
        return Resolution::Unknown;
    };
    reset(surface);

    let tagged = surface.query_by_tag(nerve_id);
    for &id in &tagged {
        surface.set_state(id, ShapeState::Highlighted);
    }

    let mut nodes = 0;
    for root in &nerve.roots {
        for id in surface.ids_of_structure(root) {
            if surface.shape(id).is_some_and(|s| s.kind == ShapeKind::Root) {
                surface.set_state(id, ShapeState::Highlighted);
                nodes += 1;
            }
        }
    }
    for id in surface.ids_of_structure(nerve_id) {
        surface.set_state(id, ShapeState::Active);
    }

    let extra = apply_fallback(graph, surface, nerve_id);
    log::debug!(
        "traced `{nerve_id}`: {} tagged segments, {extra} by height, {nodes} roots",
        tagged.len()
    );
    Resolution::Applied { segments: tagged.len() + extra, nodes }
}

/// Height-matched highlighting for the nerves listed in the fallback rules.
/// Returns how many segments it lit that the membership tags had not.
fn apply_fallback<S: Surface>(graph: &PathwayGraph, surface: &mut S, nerve_id: &str) -> usize {
    let mut extra = 0;
    for rule in graph.fallback_rules().filter(|r| r.nerve == nerve_id) {
        for id in surface.ids_of_kind(ShapeKind::Segment) {
            let Some(shape) = surface.shape(id) else { continue };
            let Geometry::Line { start, end } = shape.geometry else { continue };
            let on_line = (start.y - rule.y).abs() < 0.5 && (end.y - rule.y).abs() < 0.5;
            if on_line && shape.state != ShapeState::Highlighted {
                surface.set_state(id, ShapeState::Highlighted);
                extra += 1;
            }
        }
    }
    extra
}

fn mark_injury<S: Surface>(graph: &PathwayGraph, surface: &mut S, injury_id: &str) -> Resolution {
    let Some(injury) = graph.injury(injury_id) else {
        log::warn!("injury ignored: unknown pattern `{injury_id}`");
        return Resolution::Unknown;
    };
    reset(surface);

    let mut nodes = 0;
    for structure in &injury.affected {
        for id in surface.ids_of_structure(structure) {
            surface.set_state(id, ShapeState::Injured);
            nodes += 1;
        }
    }

    let mut segments = 0;
    for id in surface.ids_of_kind(ShapeKind::Segment) {
        let incident = surface
            .shape(id)
            .is_some_and(|s| injury.affected.iter().any(|a| s.touches(a)));
        if incident {
            surface.set_state(id, ShapeState::Injured);
            segments += 1;
        }
    }
    log::debug!("injury `{injury_id}`: {nodes} structures, {segments} segments");
    Resolution::Applied { segments, nodes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Atlas;
    use crate::render::{render, RenderOptions};
    use crate::model::Point;
    use crate::scene::SceneGraph;

    fn scene() -> (Atlas, SceneGraph) {
        let atlas = Atlas::load_embedded().unwrap();
        let mut scene = SceneGraph::new();
        render(&atlas.graph, &mut scene, RenderOptions::default());
        (atlas, scene)
    }

    #[test]
    fn ulnar_lights_only_its_segments_and_roots() {
        let (atlas, mut scene) = scene();
        let r = apply(&atlas.graph, &mut scene, HighlightTarget::Nerve("ulnar"));
        assert_eq!(r, Resolution::Applied { segments: 5, nodes: 2 });
        for id in scene.ids_of_kind(ShapeKind::Segment) {
            let s = scene.shape(id).unwrap();
            let expect = if s.tags.contains("ulnar") { ShapeState::Highlighted } else { ShapeState::Dimmed };
            assert_eq!(s.state, expect);
        }
        assert_eq!(scene.state_of_structure("C8"), Some(ShapeState::Highlighted));
        assert_eq!(scene.state_of_structure("T1"), Some(ShapeState::Highlighted));
        assert_eq!(scene.state_of_structure("C5"), Some(ShapeState::Default));
        assert_eq!(scene.state_of_structure("ulnar"), Some(ShapeState::Active));
    }

    #[test]
    fn fallback_heights_add_nothing_beyond_tags() {
        let (atlas, mut scene) = scene();
        for rule in atlas.graph.fallback_rules() {
            apply(&atlas.graph, &mut scene, HighlightTarget::Nerve(&rule.nerve));
            let lit = scene.ids_in_state(ShapeKind::Segment, ShapeState::Highlighted);
            assert_eq!(lit, scene.query_by_tag(&rule.nerve), "nerve {}", rule.nerve);
        }
    }

    #[test]
    fn fallback_rescues_untagged_horizontal_line() {
        let (atlas, mut scene) = scene();
        // Strip the radial tag from posterior cord -> radial and re-index.
        let mut patched = SceneGraph::new();
        for shape in scene.shapes() {
            let mut shape = shape.clone();
            if let Geometry::Line { start, end } = shape.geometry {
                if start == Point::new(560.0, 290.0) && end == Point::new(880.0, 290.0) {
                    shape.tags.remove("radial");
                    shape.tags.insert("untagged".into());
                }
            }
            patched.add_shape(shape);
        }
        scene = patched;
        let r = apply(&atlas.graph, &mut scene, HighlightTarget::Nerve("radial"));
        let tagged = scene.query_by_tag("radial").len();
        assert_eq!(r, Resolution::Applied { segments: tagged + 1, nodes: 5 });
    }

    #[test]
    fn erb_marks_c5_c6_and_upper_trunk() {
        let (atlas, mut scene) = scene();
        assert!(apply(&atlas.graph, &mut scene, HighlightTarget::Injury("erb")).is_applied());
        for id in ["C5", "C6", "upper_trunk"] {
            assert_eq!(scene.state_of_structure(id), Some(ShapeState::Injured), "{id}");
        }
        for shape in scene.shapes() {
            if let Some(id) = shape.structure.as_deref() {
                if !["C5", "C6", "upper_trunk"].contains(&id) {
                    assert_eq!(shape.state, ShapeState::Default, "{id}");
                }
            }
        }
        let injured = scene.ids_in_state(ShapeKind::Segment, ShapeState::Injured);
        // C5, C6 into the trunk, plus the trunk's three outgoing branches.
        assert_eq!(injured.len(), 5);
    }

    #[test]
    fn unknown_ids_leave_scene_untouched() {
        let (atlas, mut scene) = scene();
        apply(&atlas.graph, &mut scene, HighlightTarget::Nerve("median"));
        let before = scene.clone();
        assert_eq!(apply(&atlas.graph, &mut scene, HighlightTarget::Nerve("phrenic")), Resolution::Unknown);
        assert_eq!(apply(&atlas.graph, &mut scene, HighlightTarget::Injury("whiplash")), Resolution::Unknown);
        assert_eq!(scene, before);
    }

    #[test]
    fn clear_restores_render_state() {
        let (atlas, mut scene) = scene();
        let fresh = scene.clone();
        apply(&atlas.graph, &mut scene, HighlightTarget::Injury("klumpke"));
        clear(&mut scene);
        assert_eq!(scene, fresh);
    }

    #[test]
    fn terminal_injury_marks_the_nerve_and_its_last_segment() {
        let (atlas, mut scene) = scene();
        let r = apply(&atlas.graph, &mut scene, HighlightTarget::Injury("carpal_tunnel"));
        assert_eq!(r, Resolution::Applied { segments: 1, nodes: 1 });
        assert_eq!(scene.state_of_structure("median"), Some(ShapeState::Injured));
        assert_eq!(scene.state_of_structure("median_junction"), Some(ShapeState::Default));
    }

    #[test]
    fn injured_segments_follow_ids_not_coordinates() {
        // `decoy` sits exactly on `trunk` but no segment runs through it.
        let plexus = r#"{
            "bounds": { "width": 100, "height": 100 },
            "roots": [{ "id": "C8", "position": { "x": 10, "y": 10 }, "label": "C8", "description": "" }],
            "junctions": [
                { "id": "trunk", "position": { "x": 50, "y": 10 }, "label": "Trunk" },
                { "id": "decoy", "position": { "x": 50, "y": 10 }, "label": "Decoy" }
            ],
            "terminals": [{ "id": "ulnar", "position": { "x": 90, "y": 10 }, "label": "Ulnar",
                "description": "", "roots": ["C8"], "muscles": [], "sensory": "", "pathway": ["trunk"] }],
            "segments": [
                { "from": "C8", "to": "trunk", "nerves": ["ulnar"] },
                { "from": "trunk", "to": "ulnar", "nerves": ["ulnar"] }
            ]
        }"#;
        let injuries = r#"{ "injuries": [{ "id": "decoy_lesion", "title": "Decoy", "affected": ["decoy"],
            "mechanism": "", "clinical": [], "emg": [] }] }"#;
        let atlas = Atlas::from_json(plexus, injuries, r#"{ "profiles": [] }"#).unwrap();
        let mut scene = SceneGraph::new();
        render(&atlas.graph, &mut scene, RenderOptions::default());
        let r = apply(&atlas.graph, &mut scene, HighlightTarget::Injury("decoy_lesion"));
        assert_eq!(r, Resolution::Applied { segments: 0, nodes: 1 });
        assert!(scene.ids_in_state(ShapeKind::Segment, ShapeState::Injured).is_empty());
        assert_eq!(scene.state_of_structure("trunk"), Some(ShapeState::Default));
    }
}
