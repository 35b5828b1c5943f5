//! Rendering backend implementations
//!
//! - [`HeadlessBackend`] keeps everything in memory and records what it was
//!   asked to do. Tests and `--headless` runs use it.
//! - [`GlBackend`] drives an OpenGL 3.3 core context through `glow`.

pub mod headless;
pub mod opengl;

pub use headless::{HeadlessBackend, HeadlessStats};
pub use opengl::GlBackend;
