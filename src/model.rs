//! Authored anatomy records for the brachial plexus tracer.
//! Everything here is deserialized once from the embedded datasets and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A point in the authored drawing space (diagram) or in percent of the
/// reference illustration (step coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Extent of the authored drawing space. Origin is the top left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    /// Spinal level, e.g. `C5`.
    pub id: String,
    pub position: Point,
    pub label: String,
    pub description: String,
}

/// Trunk, division, cord or branch point. Routing aid only; not drawn as a box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JunctionNode {
    pub id: String,
    pub position: Point,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminalNerve {
    pub id: String,
    pub position: Point,
    pub label: String,
    pub description: String,
    /// Spinal levels contributing fibres, in cranial to caudal order.
    pub roots: Vec<String>,
    pub muscles: Vec<String>,
    pub sensory: String,
    /// Junctions the nerve passes through on its way from the roots.
    pub pathway: Vec<String>,
}

/// Authored form of a segment: endpoints are node ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub from: String,
    pub to: String,
    /// Terminal nerves whose course uses this line.
    pub nerves: BTreeSet<String>,
}

/// A traceable line with endpoints resolved to coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: String,
    pub to: String,
    pub start: Point,
    pub end: Point,
    /// Membership tag. Never empty once the graph has been validated.
    pub nerves: BTreeSet<String>,
}

impl Segment {
    pub fn carries(&self, nerve: &str) -> bool {
        self.nerves.contains(nerve)
    }

    pub fn touches(&self, node: &str) -> bool {
        self.from == node || self.to == node
    }
}

/// Decorative text (column headers). Never participates in highlighting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub position: Point,
}

/// Extra highlight for a nerve: every traceable segment drawn on height `y`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub nerve: String,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InjuryPattern {
    pub id: String,
    pub title: String,
    /// Root, junction or terminal ids.
    pub affected: Vec<String>,
    pub mechanism: String,
    pub clinical: Vec<String>,
    pub emg: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub description: String,
    /// Percent of the reference illustration (0..=100 on both axes).
    /// Narrative-only steps have none.
    #[serde(default)]
    pub point: Option<Point>,
    #[serde(default)]
    pub entrapment: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NerveStepProfile {
    pub nerve: String,
    pub narrative: String,
    pub image: String,
    pub steps: Vec<Step>,
}

/// Raw contents of `plexus.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct PlexusDataset {
    pub bounds: Bounds,
    pub roots: Vec<RootNode>,
    pub junctions: Vec<JunctionNode>,
    pub terminals: Vec<TerminalNerve>,
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub fallback: Vec<FallbackRule>,
}

/// Raw contents of `injuries.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct InjuryDataset {
    pub injuries: Vec<InjuryPattern>,
}

/// Raw contents of `pathways.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct StepDataset {
    pub profiles: Vec<NerveStepProfile>,
}

/// What kind of anatomical structure an id names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Junction,
    Terminal,
}

/// Borrowed view over any node, for lookups that do not care about the kind.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    pub id: &'a str,
    pub kind: NodeKind,
    pub position: Point,
    pub label: &'a str,
    pub description: &'a str,
}
