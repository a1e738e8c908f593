//! Materializes the pathway graph onto a [`Surface`].

use crate::atlas::PathwayGraph;
use crate::model::Point;
use crate::scene::{Geometry, Shape, ShapeId, ShapeKind, Surface};

pub const ROOT_BOX: (f64, f64) = (64.0, 36.0);
pub const TERMINAL_BOX: (f64, f64) = (156.0, 36.0);
pub const JUNCTION_RADIUS: f64 = 9.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub column_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { column_labels: true }
    }
}

/// Full redraw: wipes the surface, then adds labels, segments, junction markers,
/// root boxes and terminal buttons in that order (later shapes paint on top).
/// Every shape starts in the default state, so calling this twice gives the same scene.
pub fn render<S: Surface>(graph: &PathwayGraph, surface: &mut S, options: RenderOptions) {
    surface.clear_all();

    if options.column_labels {
        for label in graph.labels() {
            surface.add_shape(Shape::label(label.position, &label.text));
        }
    }
    for seg in graph.segments() {
        surface.add_shape(Shape::segment(seg.start, seg.end, seg.nerves.clone()).between(&seg.from, &seg.to));
    }
    for j in graph.junctions() {
        surface.add_shape(Shape::node(
            ShapeKind::Junction,
            &j.id,
            Geometry::Marker { center: j.position, radius: JUNCTION_RADIUS },
            None,
        ));
    }
    for r in graph.roots() {
        surface.add_shape(Shape::node(
            ShapeKind::Root,
            &r.id,
            Geometry::Rect { center: r.position, width: ROOT_BOX.0, height: ROOT_BOX.1 },
            Some(&r.label),
        ));
    }
    for t in graph.terminals() {
        surface.add_shape(Shape::node(
            ShapeKind::Terminal,
            &t.id,
            Geometry::Rect { center: t.position, width: TERMINAL_BOX.0, height: TERMINAL_BOX.1 },
            Some(&t.label),
        ));
    }
    log::debug!("diagram rendered: {} shapes", surface.len());
}

/// Topmost interactive shape (root box or terminal button) under `p`, in diagram space.
pub fn hit_test<S: Surface>(surface: &S, p: Point) -> Option<ShapeId> {
    (0..surface.len()).rev().find(|&id| {
        surface
            .shape(id)
            .is_some_and(|s| s.kind.is_interactive() && s.geometry.contains(p))
    })
}
