//! Debug visualization
//!
//! [`DebugDrawSystem`] collects line shapes from anywhere in a frame and
//! [`DebugRenderer`] streams them to the backend as a single line list.

pub mod draw;
pub mod renderer;

pub use draw::{DebugDrawSystem, DebugPrimitive, DebugShape, DebugShapeId};
pub use renderer::DebugRenderer;
