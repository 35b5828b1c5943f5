//! Renderer wrappers for the primitive shapes
//!
//! Each wrapper owns its shape parameters, a color, a wireframe flag and a
//! lazily uploaded vertex buffer. [`PrimitiveRenderer`] is the closed set of
//! them, which is what the ECS stores.
//!
//! Lifecycle: `initialize(shader)` → any number of `render(..)` calls →
//! `cleanup(backend)`. Shape and color setters schedule a rebuild; the
//! wireframe toggle only changes the fill mode of the next draw.

mod cube;
mod gpu_mesh;
mod plane;
mod ray;
mod sphere;
mod triangle;

pub use cube::CubeRenderer;
pub use plane::PlaneRenderer;
pub use ray::RayRenderer;
pub use sphere::SphereRenderer;
pub use triangle::TriangleRenderer;

use crate::foundation::math::{Color, Mat4};
use crate::geometry::Aabb;
use crate::render::{RenderBackend, RenderResult, ShaderHandle};

/// Any of the primitive renderers
#[derive(Debug)]
pub enum PrimitiveRenderer {
    /// Axis-aligned or oriented box
    Cube(CubeRenderer),
    /// UV sphere
    Sphere(SphereRenderer),
    /// Square plane patch
    Plane(PlaneRenderer),
    /// Single triangle
    Triangle(TriangleRenderer),
    /// Ray segment
    Ray(RayRenderer),
}

macro_rules! dispatch {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            PrimitiveRenderer::Cube($r) => $body,
            PrimitiveRenderer::Sphere($r) => $body,
            PrimitiveRenderer::Plane($r) => $body,
            PrimitiveRenderer::Triangle($r) => $body,
            PrimitiveRenderer::Ray($r) => $body,
        }
    };
}

impl PrimitiveRenderer {
    /// Short name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cube(_) => "Cube",
            Self::Sphere(_) => "Sphere",
            Self::Plane(_) => "Plane",
            Self::Triangle(_) => "Triangle",
            Self::Ray(_) => "Ray",
        }
    }

    /// Store the shared shader and schedule the first upload
    pub fn initialize(&mut self, shader: ShaderHandle) {
        dispatch!(self, r => r.initialize(shader));
    }

    /// Draw with the given matrices
    pub fn render(
        &mut self,
        backend: &mut dyn RenderBackend,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
    ) -> RenderResult<()> {
        dispatch!(self, r => r.render(backend, model, view, projection))
    }

    /// Release GPU resources; safe to call more than once
    pub fn cleanup(&mut self, backend: &mut dyn RenderBackend) {
        dispatch!(self, r => r.cleanup(backend));
    }

    /// Current color
    pub fn color(&self) -> Color {
        dispatch!(self, r => r.color())
    }

    /// Change the color
    pub fn set_color(&mut self, color: Color) {
        dispatch!(self, r => r.set_color(color));
    }

    /// Whether polygons are drawn as outlines
    pub fn is_wireframe(&self) -> bool {
        dispatch!(self, r => r.is_wireframe())
    }

    /// Toggle outline drawing
    pub fn set_wireframe(&mut self, wireframe: bool) {
        dispatch!(self, r => r.set_wireframe(wireframe));
    }

    /// Whether `initialize` has been called
    pub fn is_initialized(&self) -> bool {
        dispatch!(self, r => r.is_initialized())
    }

    /// Whether the next render rebuilds the vertices
    pub fn needs_upload(&self) -> bool {
        dispatch!(self, r => r.needs_upload())
    }

    /// Local-space bounds
    pub fn local_bounds(&self) -> Aabb {
        dispatch!(self, r => r.local_bounds())
    }
}

impl From<CubeRenderer> for PrimitiveRenderer {
    fn from(renderer: CubeRenderer) -> Self {
        Self::Cube(renderer)
    }
}

impl From<SphereRenderer> for PrimitiveRenderer {
    fn from(renderer: SphereRenderer) -> Self {
        Self::Sphere(renderer)
    }
}

impl From<PlaneRenderer> for PrimitiveRenderer {
    fn from(renderer: PlaneRenderer) -> Self {
        Self::Plane(renderer)
    }
}

impl From<TriangleRenderer> for PrimitiveRenderer {
    fn from(renderer: TriangleRenderer) -> Self {
        Self::Triangle(renderer)
    }
}

impl From<RayRenderer> for PrimitiveRenderer {
    fn from(renderer: RayRenderer) -> Self {
        Self::Ray(renderer)
    }
}
