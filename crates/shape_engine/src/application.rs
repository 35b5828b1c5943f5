//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::ecs::EcsError;
use crate::engine::AppContext;
use crate::geometry::GeometryError;
use crate::input::{KeyCode, Modifiers, MouseButton};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a scene with the engine. Every hook receives
/// the explicit [`AppContext`]; there is no global state to reach for.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Spawn entities here.
    fn initialize(&mut self, context: &mut AppContext) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the engine systems run.
    fn update(&mut self, context: &mut AppContext, delta_time: f32) -> Result<(), AppError>;

    /// Handle application events
    ///
    /// The default forwards everything to the context's input state.
    fn handle_event(&mut self, context: &mut AppContext, event: AppEvent) -> Result<(), AppError> {
        context.handle_event(&event);
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once on shutdown, before GPU resources are released.
    fn cleanup(&mut self, _context: &mut AppContext) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid shape parameters
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Entity bookkeeping failed
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Framebuffer was resized
    WindowResized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
        /// Modifier keys held at the time
        modifiers: Modifiers,
    },

    /// Mouse button event
    MouseButton {
        /// The mouse button that was pressed/released
        button: MouseButton,
        /// Whether the button was pressed (true) or released (false)
        pressed: bool,
        /// Modifier keys held at the time
        modifiers: Modifiers,
    },

    /// Mouse movement
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },

    /// Mouse wheel
    MouseWheel {
        /// Horizontal scroll delta
        delta_x: f64,
        /// Vertical scroll delta
        delta_y: f64,
    },
}
