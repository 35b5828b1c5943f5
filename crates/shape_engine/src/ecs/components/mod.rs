//! ECS Components module
//!
//! Plain data attached to entities; the logic lives in `ecs::systems`.

pub mod camera;
pub mod collision;
pub mod lighting;
pub mod motion;
pub mod renderable;
pub mod transform;

pub use camera::CameraComponent;
pub use collision::{ColliderComponent, ColliderShape, CollisionStateComponent};
pub use lighting::{LightComponent, LightFactory, LightType};
pub use motion::SpinComponent;
pub use renderable::RenderableComponent;
pub use transform::TransformComponent;
