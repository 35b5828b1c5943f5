//! # Shape Engine
//!
//! Bounding volumes, procedural primitive meshes and a small OpenGL runtime
//! for looking at them.
//!
//! ## Features
//!
//! - **Geometry**: `Aabb`, `Sphere`, `Obb` and `Ray` with overlap and transform queries
//! - **Mesh builders**: cube, sphere, plane, triangle and ray vertex lists
//! - **Renderers**: per-primitive wrappers with lazy upload and a wireframe toggle
//! - **ECS**: generational entities with typed component tables
//! - **Backends**: OpenGL 3.3 through `glow`, plus a headless recorder for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shape_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, context: &mut AppContext) -> Result<(), AppError> {
//!         context.spawn_camera()?;
//!         let cube = CubeRenderer::new(Vec3::zeros(), Vec3::repeat(1.0), Vec3::new(0.8, 0.3, 0.2))?;
//!         context.spawn_primitive(cube, TransformComponent::identity(), true)?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _context: &mut AppContext, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Engine::run_windowed(AppConfig::default(), &mut MyApp)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod debug;
pub mod ecs;
pub mod foundation;
pub mod geometry;
pub mod input;
pub mod render;
pub mod window;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{AppContext, Engine, EngineError, RenderSettings, HEADLESS_TIME_STEP};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{AppConfig, Config},
        debug::DebugDrawSystem,
        ecs::components::{
            CameraComponent, ColliderComponent, ColliderShape, CollisionStateComponent,
            LightFactory, RenderableComponent, SpinComponent, TransformComponent,
        },
        ecs::{Component, Entity, System, World},
        foundation::math::{Color, Mat4, Quat, Transform, Vec3},
        geometry::{Aabb, GeometryError, Obb, Ray, Sphere},
        input::{KeyCode, MouseButton},
        render::{
            CubeRenderer, PlaneRenderer, PrimitiveRenderer, RayRenderer, SphereRenderer,
            TriangleRenderer,
        },
        AppContext, AppError, AppEvent, Application, Engine, EngineError,
    };
}
