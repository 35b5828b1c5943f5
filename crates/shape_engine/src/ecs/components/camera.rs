//! Camera component

use crate::config::CameraConfig;
use crate::ecs::Component;
use crate::render::{Camera, CameraController};

/// Camera attached to an entity
///
/// The rendering system uses the first active camera it finds; a scene
/// without one renders nothing.
#[derive(Debug, Clone)]
pub struct CameraComponent {
    /// View parameters
    pub camera: Camera,
    /// Keyboard/mouse driver, `None` for a fixed camera
    pub controller: Option<CameraController>,
    /// Whether this camera is used for rendering
    pub active: bool,
}

impl Component for CameraComponent {}

impl CameraComponent {
    /// Fixed camera
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            controller: None,
            active: true,
        }
    }

    /// Fly camera built from configuration
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            camera: Camera::from_config(config, aspect),
            controller: Some(CameraController::from_config(config)),
            active: true,
        }
    }
}
