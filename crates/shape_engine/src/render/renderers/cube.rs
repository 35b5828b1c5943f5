use super::gpu_mesh::GpuMesh;
use crate::foundation::math::{Color, Mat4, Vec3};
use crate::geometry::{Aabb, GeometryError, GeometryResult, Obb};
use crate::render::mesh::{check_finite, check_non_negative, oriented_cube_vertices};
use crate::render::{FillMode, RenderBackend, RenderResult, ShaderHandle, Topology};

/// Solid box renderer
///
/// Axis aligned by default; `set_axes` turns it into an oriented box.
#[derive(Debug)]
pub struct CubeRenderer {
    center: Vec3,
    size: Vec3,
    axes: [Vec3; 3],
    color: Color,
    wireframe: bool,
    mesh: GpuMesh,
}

impl CubeRenderer {
    /// Create a cube spanning `center +- size / 2`
    pub fn new(center: Vec3, size: Vec3, color: Color) -> GeometryResult<Self> {
        let mut renderer = Self {
            center: Vec3::zeros(),
            size: Vec3::repeat(1.0),
            axes: [Vec3::x(), Vec3::y(), Vec3::z()],
            color,
            wireframe: false,
            mesh: GpuMesh::new(),
        };
        renderer.set_center(center)?;
        renderer.set_size(size)?;
        Ok(renderer)
    }

    /// Store the shared shader and schedule the first upload
    pub fn initialize(&mut self, shader: ShaderHandle) {
        self.mesh.initialize(shader);
    }

    /// Draw with the given matrices
    pub fn render(
        &mut self,
        backend: &mut dyn RenderBackend,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
    ) -> RenderResult<()> {
        let obb = self.obb();
        let color = self.color;
        self.mesh.draw(
            backend,
            "Cube",
            move || oriented_cube_vertices(&obb, color),
            Topology::Triangles,
            FillMode::from_wireframe(self.wireframe),
            model,
            view,
            projection,
        )
    }

    /// Release GPU resources
    pub fn cleanup(&mut self, backend: &mut dyn RenderBackend) {
        self.mesh.cleanup(backend);
    }

    /// Oriented box described by the current parameters
    pub fn obb(&self) -> Obb {
        Obb::new(self.center, self.axes, self.size * 0.5)
    }

    /// Center in local space
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Move the cube within its local space
    pub fn set_center(&mut self, center: Vec3) -> GeometryResult<()> {
        check_finite(&center, "cube center")?;
        self.center = center;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Full edge lengths
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Change the edge lengths
    pub fn set_size(&mut self, size: Vec3) -> GeometryResult<()> {
        for i in 0..3 {
            check_non_negative(size[i], "cube size")?;
        }
        self.size = size;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Change the box orientation; axes must be orthonormal
    pub fn set_axes(&mut self, axes: [Vec3; 3]) -> GeometryResult<()> {
        let candidate = Obb::new(self.center, axes, self.size * 0.5);
        if !candidate.is_orthonormal() {
            return Err(GeometryError::InvalidInput(format!(
                "cube axes must be orthonormal, got {axes:?}"
            )));
        }
        self.axes = axes;
        self.mesh.mark_dirty();
        Ok(())
    }

    /// Current color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the color; vertex colors are baked, so this re-uploads
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.mesh.mark_dirty();
    }

    /// Whether polygons are drawn as outlines
    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Toggle outline drawing without touching the mesh
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    /// Whether `initialize` has been called
    pub fn is_initialized(&self) -> bool {
        self.mesh.is_initialized()
    }

    /// Whether the next render rebuilds the vertices
    pub fn needs_upload(&self) -> bool {
        self.mesh.is_dirty()
    }

    /// Local-space bounds
    pub fn local_bounds(&self) -> Aabb {
        self.obb().enclosing_aabb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::HeadlessBackend;
    use crate::render::{RenderError, ShaderSource};

    fn setup() -> (HeadlessBackend, CubeRenderer) {
        let mut backend = HeadlessBackend::new();
        let shader = backend.create_shader("test", &ShaderSource::builtin()).unwrap();
        let mut cube = CubeRenderer::new(Vec3::zeros(), Vec3::repeat(2.0), Vec3::x()).unwrap();
        cube.initialize(shader);
        (backend, cube)
    }

    fn draw(cube: &mut CubeRenderer, backend: &mut HeadlessBackend) {
        let identity = Mat4::identity();
        cube.render(backend, &identity, &identity, &identity).unwrap();
    }

    #[test]
    fn test_render_before_initialize_fails() {
        let mut backend = HeadlessBackend::new();
        let mut cube = CubeRenderer::new(Vec3::zeros(), Vec3::repeat(1.0), Vec3::x()).unwrap();
        let identity = Mat4::identity();

        let result = cube.render(&mut backend, &identity, &identity, &identity);
        assert!(matches!(result, Err(RenderError::NotInitialized("Cube"))));
        assert_eq!(backend.stats().buffers_created, 0);
    }

    #[test]
    fn test_buffer_created_once_then_reused() {
        let (mut backend, mut cube) = setup();
        draw(&mut cube, &mut backend);
        draw(&mut cube, &mut backend);

        let stats = backend.stats();
        assert_eq!(stats.buffers_created, 1);
        assert_eq!(stats.buffers_updated, 0);
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(backend.draws()[0].vertex_count, 36);
    }

    #[test]
    fn test_color_change_reuploads() {
        let (mut backend, mut cube) = setup();
        draw(&mut cube, &mut backend);

        cube.set_color(Vec3::y());
        draw(&mut cube, &mut backend);

        assert_eq!(backend.stats().buffers_updated, 1);
        let buffer = backend.draws()[1].buffer;
        assert!(backend.buffer(buffer).unwrap().iter().all(|v| v.color == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_wireframe_toggle_does_not_reupload() {
        let (mut backend, mut cube) = setup();
        draw(&mut cube, &mut backend);

        cube.set_wireframe(true);
        assert!(!cube.needs_upload());
        draw(&mut cube, &mut backend);

        assert_eq!(backend.stats().buffers_updated, 0);
        assert_eq!(backend.draws()[1].fill_mode, FillMode::Wireframe);
        assert_eq!(backend.draws()[1].topology, Topology::Triangles);
    }

    #[test]
    fn test_invalid_setters_leave_state_untouched() {
        let (mut backend, mut cube) = setup();
        draw(&mut cube, &mut backend);

        assert!(cube.set_size(Vec3::new(1.0, -2.0, 1.0)).is_err());
        assert!(cube.set_axes([Vec3::x(), Vec3::x(), Vec3::z()]).is_err());
        assert!(!cube.needs_upload());
        assert_eq!(cube.size(), Vec3::repeat(2.0));
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let (mut backend, mut cube) = setup();
        draw(&mut cube, &mut backend);

        cube.cleanup(&mut backend);
        cube.cleanup(&mut backend);
        assert_eq!(backend.stats().buffers_destroyed, 1);
        assert_eq!(backend.live_buffers(), 0);
    }
}
