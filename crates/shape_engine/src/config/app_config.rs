//! Application configuration structures

use super::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shader source locations
///
/// Paths are resolved against a few common directories so the demos work when
/// started from the workspace root or from inside a crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Path to the vertex shader GLSL file
    pub vertex_shader_path: String,
    /// Path to the fragment shader GLSL file
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// The first directory containing each file wins; unresolved files keep a
    /// `shaders/` prefix so the later load error names a sensible path.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        const SHADER_DIRS: [&str; 5] = [
            "shaders/",
            "crates/shape_engine/shaders/",
            "resources/shaders/",
            "../shaders/",
            "./",
        ];

        let resolve = |file: &str| {
            SHADER_DIRS
                .iter()
                .map(|dir| format!("{dir}{file}"))
                .find(|candidate| Path::new(candidate).exists())
                .unwrap_or_else(|| format!("shaders/{file}"))
        };

        Self {
            vertex_shader_path: resolve(base_vertex),
            fragment_shader_path: resolve(base_fragment),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution("primitive.vert", "primitive.frag")
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Width in screen coordinates
    pub width: u32,
    /// Height in screen coordinates
    pub height: u32,
    /// Whether to synchronize buffer swaps with the display
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shape Engine".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Camera and camera-controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial eye position
    pub position: [f32; 3],
    /// Initial yaw in degrees (-90 looks down -Z)
    pub yaw_degrees: f32,
    /// Initial pitch in degrees
    pub pitch_degrees: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 8.0],
            yaw_degrees: -90.0,
            pitch_degrees: -10.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            move_speed: 5.0,
            mouse_sensitivity: 0.1,
        }
    }
}

/// Procedural mesh resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Sphere sector (longitude) count
    pub sphere_sectors: u32,
    /// Sphere stack (latitude) count
    pub sphere_stacks: u32,
    /// Segments per great circle in debug sphere outlines
    pub debug_circle_segments: u32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            sphere_sectors: 36,
            sphere_stacks: 18,
            debug_circle_segments: 32,
        }
    }
}

/// Debug visualization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw collider bounds at startup
    pub show_bounds: bool,
    /// Start with every renderable in wireframe
    pub wireframe: bool,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_bounds: true,
            wireframe: false,
            log_level: "info".to_string(),
        }
    }
}

/// Top-level configuration for the demo applications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Framebuffer clear color
    pub clear_color: ClearColor,
    /// Window settings
    pub window: WindowConfig,
    /// Shader locations
    pub shaders: ShaderConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Mesh resolution
    pub mesh: MeshConfig,
    /// Debug settings
    pub debug: DebugConfig,
}

/// Linear RGBA clear color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearColor(pub [f32; 4]);

impl Default for ClearColor {
    fn default() -> Self {
        Self([0.1, 0.1, 0.12, 1.0])
    }
}

impl AppConfig {
    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set the window size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set custom shader configuration
    pub fn with_shaders(mut self, shaders: ShaderConfig) -> Self {
        self.shaders = shaders;
        self
    }

    /// Set the framebuffer clear color
    pub fn with_clear_color(mut self, rgba: [f32; 4]) -> Self {
        self.clear_color = ClearColor(rgba);
        self
    }

    /// Set sphere tessellation
    pub fn with_sphere_resolution(mut self, sectors: u32, stacks: u32) -> Self {
        self.mesh.sphere_sectors = sectors;
        self.mesh.sphere_stacks = stacks;
        self
    }

    /// Window aspect ratio, guarding against a zero height
    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return invalid(format!("fov must be in (0, 180), got {}", camera.fov_degrees));
        }
        if camera.near <= 0.0 || camera.far <= camera.near {
            return invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            ));
        }
        if camera.move_speed < 0.0 || camera.mouse_sensitivity < 0.0 {
            return invalid("camera speeds must be non-negative".to_string());
        }

        if self.mesh.sphere_sectors < 3 || self.mesh.sphere_stacks < 2 {
            return invalid(format!(
                "sphere resolution must be at least 3x2, got {}x{}",
                self.mesh.sphere_sectors, self.mesh.sphere_stacks
            ));
        }
        if self.mesh.debug_circle_segments < 3 {
            return invalid("debug circles need at least 3 segments".to_string());
        }

        if !self.clear_color.0.iter().all(|c| c.is_finite()) {
            return invalid(format!("clear color must be finite, got {:?}", self.clear_color.0));
        }

        Ok(())
    }
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_size = AppConfig::default().with_size(0, 600);
        assert!(matches!(zero_size.validate(), Err(ConfigError::Invalid(_))));

        let coarse_sphere = AppConfig::default().with_sphere_resolution(2, 18);
        assert!(coarse_sphere.validate().is_err());

        let mut inverted_planes = AppConfig::default();
        inverted_planes.camera.near = 10.0;
        inverted_planes.camera.far = 1.0;
        assert!(inverted_planes.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [window]
            title = "Partial"

            [mesh]
            sphere_sectors = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Partial");
        assert_eq!(config.window.width, WindowConfig::default().width);
        assert_eq!(config.mesh.sphere_sectors, 12);
        assert_eq!(config.mesh.sphere_stacks, 18);
    }

    #[test]
    fn test_aspect_ratio() {
        let config = AppConfig::default().with_size(1600, 800);
        assert!((config.aspect_ratio() - 2.0).abs() < f32::EPSILON);
    }
}
