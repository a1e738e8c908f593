//! Drawing-surface capability and the retained scene graph that implements it.
//!
//! The diagram never talks to a canvas directly: the renderer adds shapes, the
//! highlight resolver flips their states, and the canvas view paints whatever the
//! scene currently holds. Tests use the same [`SceneGraph`] headless.

use std::collections::{BTreeSet, HashMap};

use crate::model::Point;

pub type ShapeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Traceable line carrying a membership tag.
    Segment,
    /// Spinal root box.
    Root,
    /// Terminal nerve button.
    Terminal,
    /// Hidden marker over a trunk/division/cord; only shown for injuries.
    Junction,
    /// Column header. Decorative.
    Label,
}

impl ShapeKind {
    pub fn is_interactive(self) -> bool {
        matches!(self, ShapeKind::Root | ShapeKind::Terminal)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeState {
    #[default]
    Default,
    Dimmed,
    Highlighted,
    /// The selected terminal nerve button.
    Active,
    Injured,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Line { start: Point, end: Point },
    Rect { center: Point, width: f64, height: f64 },
    Marker { center: Point, radius: f64 },
    Text { anchor: Point },
}

impl Geometry {
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Geometry::Rect { center, width, height } => {
                (p.x - center.x).abs() <= width / 2.0 && (p.y - center.y).abs() <= height / 2.0
            }
            Geometry::Marker { center, radius } => {
                let dx = p.x - center.x;
                let dy = p.y - center.y;
                dx * dx + dy * dy <= radius * radius
            }
            Geometry::Line { .. } | Geometry::Text { .. } => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub geometry: Geometry,
    /// Anatomical id for nodes and markers (`C5`, `upper_trunk`, `ulnar`).
    pub structure: Option<String>,
    /// Membership tag; empty for everything but segments.
    pub tags: BTreeSet<String>,
    /// Node ids a segment joins.
    pub endpoints: Option<(String, String)>,
    pub text: Option<String>,
    pub state: ShapeState,
}

impl Shape {
    pub fn segment(start: Point, end: Point, tags: BTreeSet<String>) -> Self {
        Self {
            kind: ShapeKind::Segment,
            geometry: Geometry::Line { start, end },
            structure: None,
            tags,
            endpoints: None,
            text: None,
            state: ShapeState::Default,
        }
    }

    pub fn node(kind: ShapeKind, id: &str, geometry: Geometry, text: Option<&str>) -> Self {
        Self {
            kind,
            geometry,
            structure: Some(id.to_string()),
            tags: BTreeSet::new(),
            endpoints: None,
            text: text.map(str::to_string),
            state: ShapeState::Default,
        }
    }

    pub fn label(anchor: Point, text: &str) -> Self {
        Self {
            kind: ShapeKind::Label,
            geometry: Geometry::Text { anchor },
            structure: None,
            tags: BTreeSet::new(),
            endpoints: None,
            text: Some(text.to_string()),
            state: ShapeState::Default,
        }
    }

    pub fn between(mut self, from: &str, to: &str) -> Self {
        self.endpoints = Some((from.to_string(), to.to_string()));
        self
    }

    /// Whether this segment starts or ends at node `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.endpoints.as_ref().is_some_and(|(a, b)| a == id || b == id)
    }

    pub fn is_structure(&self, id: &str) -> bool {
        self.structure.as_deref() == Some(id)
    }

    /// Paint parameters for the shape's current state.
    pub fn style(&self) -> Style {
        style_for(self.kind, self.state)
    }
}

/// Paint parameters for any shape of `kind` in `state`. The legend reads the same table.
pub fn style_for(kind: ShapeKind, state: ShapeState) -> Style {
    use ShapeKind::*;
    use ShapeState::*;
    match (kind, state) {
        (Segment, Default) => Style::stroke("#8b949e", 0.85, 3.0),
        (Segment, Dimmed) => Style::stroke("#8b949e", 0.18, 3.0),
        (Segment, Highlighted | Active) => Style::stroke("#58a6ff", 1.0, 6.0).glow("#58a6ff", 12.0),
        (Segment, Injured) => Style::stroke("#ff7b72", 1.0, 4.5),
        (Root, Highlighted) => Style::boxed("#1f6feb", "#58a6ff").glow("#58a6ff", 10.0),
        (Root, Injured) => Style::boxed("#5a2320", "#ff7b72"),
        (Root, _) => Style::boxed("#161b22", "#30363d"),
        (Terminal, Active | Highlighted) => Style::boxed("#0d419d", "#58a6ff").glow("#58a6ff", 8.0),
        (Terminal, Injured) => Style::boxed("#5a2320", "#ff7b72"),
        (Terminal, _) => Style::boxed("#21262d", "#30363d"),
        (Junction, Injured) => Style::boxed("#f85149", "#ff7b72"),
        (Junction, _) => Style::hidden(),
        (Label, _) => Style { fill: Some("#8b949e"), ..Style::hidden() }.with_opacity(1.0),
    }
}

/// Resolved paint parameters. Colours are CSS strings so the canvas view can pass them through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub stroke: &'static str,
    pub fill: Option<&'static str>,
    pub opacity: f64,
    pub width: f64,
    pub glow: Option<(&'static str, f64)>,
}

impl Style {
    fn stroke(stroke: &'static str, opacity: f64, width: f64) -> Self {
        Self { stroke, fill: None, opacity, width, glow: None }
    }

    fn boxed(fill: &'static str, stroke: &'static str) -> Self {
        Self { stroke, fill: Some(fill), opacity: 1.0, width: 1.5, glow: None }
    }

    fn hidden() -> Self {
        Self { stroke: "transparent", fill: None, opacity: 0.0, width: 0.0, glow: None }
    }

    fn glow(mut self, color: &'static str, blur: f64) -> Self {
        self.glow = Some((color, blur));
        self
    }

    fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// What a renderer needs from a vector-graphics backend.
pub trait Surface {
    fn add_shape(&mut self, shape: Shape) -> ShapeId;
    fn set_state(&mut self, id: ShapeId, state: ShapeState);
    fn clear_all(&mut self);
    /// Segments whose membership tag contains `nerve`.
    fn query_by_tag(&self, nerve: &str) -> Vec<ShapeId>;
    fn shape(&self, id: ShapeId) -> Option<&Shape>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ids_of_kind(&self, kind: ShapeKind) -> Vec<ShapeId> {
        (0..self.len())
            .filter(|&id| self.shape(id).is_some_and(|s| s.kind == kind))
            .collect()
    }

    fn ids_of_structure(&self, structure: &str) -> Vec<ShapeId> {
        (0..self.len())
            .filter(|&id| self.shape(id).is_some_and(|s| s.is_structure(structure)))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGraph {
    shapes: Vec<Shape>,
    by_tag: HashMap<String, Vec<ShapeId>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Snapshot of every shape's state, in insertion order.
    pub fn states(&self) -> Vec<ShapeState> {
        self.shapes.iter().map(|s| s.state).collect()
    }

    pub fn state_of_structure(&self, structure: &str) -> Option<ShapeState> {
        self.shapes.iter().find(|s| s.is_structure(structure)).map(|s| s.state)
    }

    pub fn ids_in_state(&self, kind: ShapeKind, state: ShapeState) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.kind == kind && s.state == state)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Surface for SceneGraph {
    fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.len();
        for tag in &shape.tags {
            self.by_tag.entry(tag.clone()).or_default().push(id);
        }
        self.shapes.push(shape);
        id
    }

    fn set_state(&mut self, id: ShapeId, state: ShapeState) {
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.state = state;
        }
    }

    fn clear_all(&mut self) {
        self.shapes.clear();
        self.by_tag.clear();
    }

    fn query_by_tag(&self, nerve: &str) -> Vec<ShapeId> {
        self.by_tag.get(nerve).cloned().unwrap_or_default()
    }

    fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    fn len(&self) -> usize {
        self.shapes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn query_by_tag_follows_membership() {
        let mut scene = SceneGraph::new();
        let a = scene.add_shape(Shape::segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0), tags(&["median", "ulnar"])));
        let b = scene.add_shape(Shape::segment(Point::new(1.0, 0.0), Point::new(2.0, 0.0), tags(&["ulnar"])));
        scene.add_shape(Shape::label(Point::new(0.0, 0.0), "Roots"));
        assert_eq!(scene.query_by_tag("ulnar"), vec![a, b]);
        assert_eq!(scene.query_by_tag("median"), vec![a]);
        assert!(scene.query_by_tag("radial").is_empty());
    }

    #[test]
    fn clear_all_drops_shapes_and_index() {
        let mut scene = SceneGraph::new();
        scene.add_shape(Shape::segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0), tags(&["ulnar"])));
        scene.clear_all();
        assert!(scene.is_empty());
        assert!(scene.query_by_tag("ulnar").is_empty());
    }

    #[test]
    fn set_state_ignores_unknown_ids() {
        let mut scene = SceneGraph::new();
        scene.set_state(7, ShapeState::Highlighted);
        assert!(scene.is_empty());
    }

    #[test]
    fn junction_markers_hidden_until_injured() {
        let mut marker = Shape::node(
            ShapeKind::Junction,
            "upper_trunk",
            Geometry::Marker { center: Point::new(0.0, 0.0), radius: 6.0 },
            None,
        );
        assert!(!marker.style().is_visible());
        marker.state = ShapeState::Injured;
        assert!(marker.style().is_visible());
        assert!(marker.style().glow.is_none());
    }

    #[test]
    fn highlighted_segment_is_wider_and_glows() {
        let mut seg = Shape::segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0), tags(&["ulnar"]));
        seg.state = ShapeState::Dimmed;
        let dim = seg.style();
        seg.state = ShapeState::Highlighted;
        let lit = seg.style();
        assert!(lit.width > dim.width);
        assert!(lit.opacity > dim.opacity);
        assert!(lit.glow.is_some());
    }

    #[test]
    fn segment_touches_its_endpoint_ids_only() {
        let seg = Shape::segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0), tags(&["ulnar"])).between("C8", "lower_trunk");
        assert!(seg.touches("C8"));
        assert!(seg.touches("lower_trunk"));
        assert!(!seg.touches("T1"));
        assert!(!Shape::label(Point::new(0.0, 0.0), "Roots").touches("Roots"));
    }

    #[test]
    fn rect_hit_test() {
        let g = Geometry::Rect { center: Point::new(10.0, 10.0), width: 4.0, height: 2.0 };
        assert!(g.contains(Point::new(11.9, 10.9)));
        assert!(!g.contains(Point::new(12.1, 10.0)));
    }
}


