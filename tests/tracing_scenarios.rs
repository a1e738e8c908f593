use std::rc::Rc;

use plexus_tracer::render::RenderOptions;
use plexus_tracer::state::{StepAction, TraceMode, TracingAction};
use plexus_tracer::{Atlas, SceneGraph, ShapeKind, ShapeState, StepwiseAnimator, Surface, TracingController};
use yew::Reducible;

fn atlas() -> Atlas {
    Atlas::load_embedded().expect("embedded datasets are valid")
}

fn controller(atlas: &Atlas) -> TracingController {
    TracingController::new(atlas.graph.clone(), SceneGraph::new(), RenderOptions::default())
}

fn highlighted_segments(c: &TracingController) -> Vec<usize> {
    c.surface().ids_in_state(ShapeKind::Segment, ShapeState::Highlighted)
}

#[test]
fn every_nerve_lights_a_nonempty_pathway_ending_at_itself() {
    let atlas = atlas();
    let mut c = controller(&atlas);
    for t in atlas.graph.terminals() {
        assert!(c.select_nerve(&t.id), "{}", t.id);
        let lit = highlighted_segments(&c);
        assert!(!lit.is_empty(), "{} lit nothing", t.id);
        assert_eq!(lit, c.surface().query_by_tag(&t.id), "{}", t.id);
        assert_eq!(c.surface().state_of_structure(&t.id), Some(ShapeState::Active));
        for root in &t.roots {
            assert_eq!(c.surface().state_of_structure(root), Some(ShapeState::Highlighted), "{} via {root}", t.id);
        }
    }
}

#[test]
fn selecting_twice_changes_nothing() {
    let atlas = atlas();
    let mut c = controller(&atlas);
    c.select_nerve("median");
    let once = c.clone();
    c.select_nerve("median");
    assert_eq!(c, once);
}

#[test]
fn selecting_another_nerve_drops_the_first() {
    let atlas = atlas();
    let mut c = controller(&atlas);
    c.select_nerve("axillary");
    c.select_nerve("musculocutaneous");
    let scene = c.surface();
    for id in scene.ids_of_kind(ShapeKind::Segment) {
        let shape = scene.shape(id).unwrap();
        if !shape.tags.contains("musculocutaneous") {
            assert_eq!(shape.state, ShapeState::Dimmed, "segment {id} tagged {:?}", shape.tags);
        }
    }
    assert_eq!(scene.state_of_structure("axillary"), Some(ShapeState::Default));
}

#[test]
fn clearing_matches_a_fresh_render() {
    let atlas = atlas();
    let fresh = controller(&atlas);
    let mut c = controller(&atlas);
    c.select_nerve("radial");
    c.show_injury("klumpke");
    c.clear_tracing();
    assert_eq!(c.mode(), &TraceMode::Idle);
    assert_eq!(c.surface(), fresh.surface());
}

#[test]
fn ulnar_follows_lower_trunk_and_medial_cord() {
    let atlas = atlas();
    let mut c = controller(&atlas);
    c.select_nerve("ulnar");
    let pathway = atlas.graph.pathway("ulnar").unwrap();
    assert_eq!(pathway.roots, vec!["C8", "T1"]);
    assert!(pathway.junctions.contains(&"lower_trunk"));
    assert!(pathway.junctions.contains(&"medial_cord"));
    for root in ["C5", "C6", "C7"] {
        assert_eq!(c.surface().state_of_structure(root), Some(ShapeState::Default), "{root}");
    }
    let d = c.description();
    assert_eq!(d.title, "Ulnar nerve");
}

#[test]
fn erb_palsy_marks_upper_structures_only() {
    let atlas = atlas();
    let mut c = controller(&atlas);
    c.select_nerve("ulnar");
    assert!(c.show_injury("erb"));
    let scene = c.surface();
    for id in ["C5", "C6", "upper_trunk"] {
        assert_eq!(scene.state_of_structure(id), Some(ShapeState::Injured), "{id}");
    }
    for id in ["C8", "T1", "lower_trunk"] {
        assert_ne!(scene.state_of_structure(id), Some(ShapeState::Injured), "{id}");
    }
    assert!(highlighted_segments(&c).is_empty());
    assert!(!scene.ids_in_state(ShapeKind::Segment, ShapeState::Injured).is_empty());
}

#[test]
fn reducer_walks_the_state_machine() {
    let atlas = atlas();
    let c = Rc::new(controller(&atlas));
    let c = c.reduce(TracingAction::SelectNerve("radial".into()));
    assert_eq!(c.mode(), &TraceMode::Nerve("radial".into()));
    let c = c.reduce(TracingAction::ShowInjury("saturday_night".into()));
    assert_eq!(c.mode(), &TraceMode::Injury("saturday_night".into()));
    let c = c.reduce(TracingAction::Clear);
    assert_eq!(c.mode(), &TraceMode::Idle);
}

#[test]
fn stepwise_path_grows_then_stops_at_the_last_step() {
    let atlas = atlas();
    let a = Rc::new(StepwiseAnimator::new(atlas.steps.clone(), 2.5));
    let mut a = a.reduce(StepAction::SelectNerve("ulnar".into()));
    let count = a.step_count();
    assert!(count > 3);
    let mut prev = a.current_path().len();
    for _ in 1..count {
        a = a.reduce(StepAction::Advance);
        let len = a.current_path().len();
        assert!(len >= prev);
        prev = len;
    }
    assert!(a.is_last());
    let same = a.clone().reduce(StepAction::Advance);
    assert!(Rc::ptr_eq(&a, &same));
    let a = a.reduce(StepAction::GoTo(0));
    let back = a.clone().reduce(StepAction::Retreat);
    assert!(Rc::ptr_eq(&a, &back));
}

#[test]
fn entrapment_steps_zoom_and_others_do_not() {
    let atlas = atlas();
    let mut a = StepwiseAnimator::new(atlas.steps.clone(), 3.0);
    a.select_nerve("median");
    for k in 0..a.step_count() {
        a.go_to(k);
        let step = a.current_step().unwrap();
        let zoomed = !a.current_zoom().is_identity();
        assert_eq!(zoomed, step.entrapment && step.point.is_some(), "step {k}");
    }
}
