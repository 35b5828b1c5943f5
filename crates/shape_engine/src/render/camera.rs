//! # 3D Camera
//!
//! A yaw/pitch fly camera producing right-handed, Y-up OpenGL matrices, and
//! the keyboard/mouse controller that drives it.
//!
//! Angles are kept in degrees because that is what the configuration and the
//! mouse sensitivity are expressed in; conversion happens when matrices are built.

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::geometry::{GeometryResult, Ray};
use crate::input::{InputManager, KeyCode, MouseButton};

/// Pitch limit that keeps the view direction away from the up vector
const MAX_PITCH_DEGREES: f32 = 89.0;

/// Zoom range for the vertical field of view
const MIN_FOV_DEGREES: f32 = 1.0;
const MAX_FOV_DEGREES: f32 = 90.0;

/// Perspective fly camera
///
/// # Coordinate System
/// Right-handed, Y-up. A yaw of -90 degrees with zero pitch looks down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Heading in degrees around +Y
    pub yaw: f32,
    /// Elevation in degrees, clamped to +-89
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Distance to near clipping plane
    pub near: f32,
    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            fov: fov_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Create a camera from configuration
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::perspective(
            Vec3::from(config.position),
            config.fov_degrees,
            aspect,
            config.near,
            config.far,
        );
        camera.yaw = config.yaw_degrees;
        camera.pitch = config.pitch_degrees.clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
        camera
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.front().cross(&Vec3::y()).normalize()
    }

    /// Unit up vector, orthogonal to front and right
    pub fn up(&self) -> Vec3 {
        self.right().cross(&self.front())
    }

    /// Turn the camera by the given yaw and pitch deltas in degrees
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
    }

    /// Narrow (positive) or widen (negative) the field of view
    pub fn zoom(&mut self, amount: f32) {
        self.fov = (self.fov - amount).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Generate view matrix for world-to-camera space transformation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front(), self.up())
    }

    /// Generate OpenGL perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_gl(utils::deg_to_rad(self.fov), self.aspect, self.near, self.far)
    }

    /// Ray from the eye along the view direction
    pub fn forward_ray(&self, length: f32) -> GeometryResult<Ray> {
        Ray::new(self.position, self.front(), length)
    }
}

/// Keyboard and mouse fly controls
///
/// WASD moves in the view plane, Space and LeftShift move along world Y, the
/// mouse rotates while the right button is held and the scroll wheel zooms.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    /// Units per second
    pub move_speed: f32,
    /// Degrees per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl CameraController {
    /// Create a controller from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }

    /// Apply this frame's input to the camera
    pub fn update(&self, camera: &mut Camera, input: &InputManager, delta_time: f32) {
        let front = camera.front();
        let right = camera.right();
        let mut direction = Vec3::zeros();

        if input.is_key_pressed(KeyCode::W) {
            direction += front;
        }
        if input.is_key_pressed(KeyCode::S) {
            direction -= front;
        }
        if input.is_key_pressed(KeyCode::D) {
            direction += right;
        }
        if input.is_key_pressed(KeyCode::A) {
            direction -= right;
        }
        if input.is_key_pressed(KeyCode::Space) {
            direction += Vec3::y();
        }
        if input.is_key_pressed(KeyCode::LeftShift) {
            direction -= Vec3::y();
        }

        if direction.norm_squared() > 0.0 {
            camera.position += direction.normalize() * self.move_speed * delta_time;
        }

        if input.is_mouse_button_pressed(MouseButton::Right) {
            let (dx, dy) = input.mouse_delta();
            // window y grows downwards
            camera.rotate(dx * self.mouse_sensitivity, -dy * self.mouse_sensitivity);
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            camera.zoom(scroll);
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
