//! # Rendering System
//!
//! Draws every visible renderable through the backend using the active
//! camera, then the debug line list. Renderers are initialized with the shared
//! shader the first time they are seen.

use super::{active_camera, LightingSystem};
use crate::debug::{DebugDrawSystem, DebugRenderer};
use crate::ecs::components::{RenderableComponent, TransformComponent};
use crate::ecs::World;
use crate::foundation::math::Mat4;
use crate::render::{RenderBackend, ShaderHandle};

/// What one render pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Renderables drawn successfully
    pub drawn: usize,
    /// Renderables whose draw failed (logged and skipped)
    pub failed: usize,
    /// Whether the debug line list was submitted
    pub debug_drawn: bool,
}

/// System responsible for drawing renderables and debug shapes
#[derive(Debug, Default)]
pub struct RenderingSystem {
    lighting: LightingSystem,
    debug_renderer: DebugRenderer,
}

impl RenderingSystem {
    /// Create a new rendering system
    pub fn new(lighting: LightingSystem, debug_renderer: DebugRenderer) -> Self {
        Self {
            lighting,
            debug_renderer,
        }
    }

    /// Lighting configuration
    pub fn lighting_mut(&mut self) -> &mut LightingSystem {
        &mut self.lighting
    }

    /// Draw one frame
    ///
    /// Without an active camera nothing is drawn. A renderer that fails to
    /// draw is logged and the rest of the frame continues.
    pub fn render(
        &mut self,
        world: &mut World,
        backend: &mut dyn RenderBackend,
        shader: ShaderHandle,
        debug: Option<&DebugDrawSystem>,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        let Some((_, camera)) = active_camera(world) else {
            log::trace!("No active camera, skipping render pass");
            return stats;
        };
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        let eye = camera.position;

        backend.set_lighting(&self.lighting.build_uniform(world, eye));

        for entity in world.entities_with::<RenderableComponent>() {
            let model = world
                .get_component::<TransformComponent>(entity)
                .map_or_else(Mat4::identity, TransformComponent::to_matrix);
            let Some(renderable) = world.get_component_mut::<RenderableComponent>(entity) else {
                continue;
            };
            if !renderable.visible {
                continue;
            }

            let renderer = &mut renderable.renderer;
            if !renderer.is_initialized() {
                log::debug!("Initializing {} renderer for {entity:?}", renderer.kind());
                renderer.initialize(shader);
            }
            match renderer.render(backend, &model, &view, &projection) {
                Ok(()) => stats.drawn += 1,
                Err(e) => {
                    log::error!("Failed to draw {} for {entity:?}: {e}", renderer.kind());
                    stats.failed += 1;
                }
            }
        }

        if let Some(debug) = debug {
            match self.debug_renderer.render(debug, backend, shader, &view, &projection) {
                Ok(()) => stats.debug_drawn = self.debug_renderer.vertex_count() > 0,
                Err(e) => log::error!("Failed to draw debug shapes: {e}"),
            }
        }

        stats
    }

    /// Release every renderer buffer and the debug buffer
    pub fn cleanup(&mut self, world: &mut World, backend: &mut dyn RenderBackend) {
        for entity in world.entities_with::<RenderableComponent>() {
            if let Some(renderable) = world.get_component_mut::<RenderableComponent>(entity) {
                renderable.renderer.cleanup(backend);
            }
        }
        self.debug_renderer.cleanup(backend);
        log::info!("Rendering resources released");
    }
}

/// Apply the global wireframe toggle to every renderable
pub fn set_wireframe_all(world: &mut World, wireframe: bool) {
    for entity in world.entities_with::<RenderableComponent>() {
        if let Some(renderable) = world.get_component_mut::<RenderableComponent>(entity) {
            renderable.renderer.set_wireframe(wireframe);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::CameraComponent;
    use crate::foundation::math::Vec3;
    use crate::render::backends::HeadlessBackend;
    use crate::render::{Camera, CubeRenderer, FillMode, ShaderSource, SphereRenderer};

    fn setup() -> (World, HeadlessBackend, ShaderHandle) {
        let mut backend = HeadlessBackend::new();
        let shader = backend.create_shader("primitive", &ShaderSource::builtin()).unwrap();
        let mut world = World::new();
        let cube = world.create_entity();
        world
            .add_component(
                cube,
                RenderableComponent::new(CubeRenderer::new(Vec3::zeros(), Vec3::repeat(1.0), Vec3::x()).unwrap()),
            )
            .unwrap();
        (world, backend, shader)
    }

    fn add_camera(world: &mut World) {
        let camera = world.create_entity();
        world
            .add_component(
                camera,
                CameraComponent::new(Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0, 1.0, 0.1, 100.0)),
            )
            .unwrap();
    }

    #[test]
    fn test_no_camera_no_draws() {
        let (mut world, mut backend, shader) = setup();
        let stats = RenderingSystem::default().render(&mut world, &mut backend, shader, None);
        assert_eq!(stats, FrameStats::default());
        assert!(backend.draws().is_empty());
        assert!(backend.lighting().is_none());
    }

    #[test]
    fn test_renderers_initialized_lazily_and_drawn() {
        let (mut world, mut backend, shader) = setup();
        add_camera(&mut world);
        let hidden = world.create_entity();
        world
            .add_component(
                hidden,
                RenderableComponent::new(SphereRenderer::new(Vec3::zeros(), 1.0, Vec3::y()).unwrap())
                    .with_visible(false),
            )
            .unwrap();

        let mut system = RenderingSystem::default();
        let stats = system.render(&mut world, &mut backend, shader, None);

        assert_eq!(stats.drawn, 1);
        assert_eq!(backend.draws().len(), 1);
        assert_eq!(backend.draws()[0].shader, shader);
        assert!(backend.lighting().is_some());
        assert!(!world.get_component::<RenderableComponent>(hidden).unwrap().renderer.is_initialized());

        system.cleanup(&mut world, &mut backend);
        assert_eq!(backend.live_buffers(), 0);
    }

    #[test]
    fn test_failed_draw_does_not_stop_frame() {
        let (mut world, mut backend, shader) = setup();
        add_camera(&mut world);
        let bogus = ShaderHandle(u64::MAX);
        let broken = world.create_entity();
        let mut renderable =
            RenderableComponent::new(SphereRenderer::new(Vec3::zeros(), 1.0, Vec3::y()).unwrap());
        renderable.renderer.initialize(bogus);
        world.add_component(broken, renderable).unwrap();

        let stats = RenderingSystem::default().render(&mut world, &mut backend, shader, None);
        assert_eq!((stats.drawn, stats.failed), (1, 1));
    }

    #[test]
    fn test_wireframe_toggle_reaches_every_renderable() {
        let (mut world, mut backend, shader) = setup();
        add_camera(&mut world);
        set_wireframe_all(&mut world, true);

        RenderingSystem::default().render(&mut world, &mut backend, shader, None);
        assert!(backend.draws().iter().all(|d| d.fill_mode == FillMode::Wireframe));
    }

    #[test]
    fn test_debug_shapes_drawn_after_renderables() {
        let (mut world, mut backend, shader) = setup();
        add_camera(&mut world);
        let mut debug = DebugDrawSystem::new();
        debug.draw_line(Vec3::zeros(), Vec3::x(), Vec3::x(), 0.0);

        let stats = RenderingSystem::default().render(&mut world, &mut backend, shader, Some(&debug));
        assert!(stats.debug_drawn);
        assert_eq!(backend.draws().len(), 2);
        assert!(backend.draws()[1].unlit);
    }
}
