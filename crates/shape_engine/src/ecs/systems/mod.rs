//! ECS Systems module
//!
//! Per-frame order, as driven by the engine:
//! camera → spin → collision → bounds debug → lighting + rendering.

pub mod bounds_debug;
pub mod camera_system;
pub mod collision_system;
pub mod lighting;
pub mod motion_system;
pub mod rendering_system;

pub use bounds_debug::BoundsDebugSystem;
pub use camera_system::{active_camera, CameraSystem};
pub use collision_system::CollisionSystem;
pub use lighting::LightingSystem;
pub use motion_system::SpinSystem;
pub use rendering_system::{set_wireframe_all, FrameStats, RenderingSystem};
