pub mod stepwise;
pub mod tracing;
pub mod viewport;

pub use stepwise::{CoordinatePicker, StepAction, StepPhase, StepwiseAnimator, ZoomTransform};
pub use tracing::{Description, TraceMode, TracingAction, TracingController};
pub use viewport::Viewport;
