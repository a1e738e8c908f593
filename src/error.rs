use thiserror::Error;

/// Problems found while loading or validating the authored datasets.
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("failed to parse {dataset}: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate node id `{0}`")]
    DuplicateId(String),
    #[error("segment {index} references unknown node `{node}`")]
    DanglingEndpoint { index: usize, node: String },
    #[error("segment {index} ({from} -> {to}) has an empty membership tag")]
    EmptyTag {
        index: usize,
        from: String,
        to: String,
    },
    #[error("segment {index} is tagged with unknown nerve `{nerve}`")]
    UnknownNerveTag { index: usize, nerve: String },
    #[error("{what} at ({x}, {y}) lies outside the drawing bounds")]
    OutOfBounds { what: String, x: f64, y: f64 },
    #[error("nerve `{nerve}` declares roots {declared:?} but its segments leave roots {tagged:?}")]
    RootMismatch {
        nerve: String,
        declared: Vec<String>,
        tagged: Vec<String>,
    },
    #[error("nerve `{nerve}` lists pathway junction `{junction}` which it never passes")]
    PathwayMismatch { nerve: String, junction: String },
    #[error("nerve `{0}` has no tagged segments")]
    UntracedNerve(String),
    #[error("{owner} references unknown structure `{id}`")]
    UnknownStructure { owner: String, id: String },
    #[error("step {index} of `{nerve}` has coordinate ({x}, {y}) outside 0..=100%")]
    StepOutOfRange {
        nerve: String,
        index: usize,
        x: f64,
        y: f64,
    },
    #[error("step profile `{0}` has no steps")]
    EmptyProfile(String),
}
