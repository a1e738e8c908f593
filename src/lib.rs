//! Interactive brachial plexus tracer.
//!
//! The engine (`atlas`, `render`, `highlight`, `state`) draws into any [`scene::Surface`]
//! and runs natively; `components` wires it to a canvas and the DOM through yew.

pub mod atlas;
pub mod components;
pub mod error;
pub mod highlight;
pub mod model;
pub mod render;
pub mod scene;
pub mod settings;
pub mod state;
pub mod util;

pub use atlas::{Atlas, PathwayGraph, StepLibrary};
pub use error::AtlasError;
pub use scene::{SceneGraph, ShapeKind, ShapeState, Surface};
pub use state::{StepwiseAnimator, TracingController};
