//! Core engine implementation
//!
//! [`Engine`] owns the systems and drives one frame at a time in a fixed
//! order. Everything an application may touch lives in [`AppContext`], which
//! is passed explicitly to every [`Application`] hook.

use crate::application::{AppError, AppEvent, Application};
use crate::config::{AppConfig, ConfigError};
use crate::debug::{DebugDrawSystem, DebugRenderer};
use crate::ecs::components::{
    CameraComponent, ColliderComponent, RenderableComponent, TransformComponent,
};
use crate::ecs::systems::{
    set_wireframe_all, BoundsDebugSystem, CameraSystem, CollisionSystem, FrameStats,
    LightingSystem, RenderingSystem, SpinSystem,
};
use crate::ecs::{EcsError, Entity, System, World};
use crate::foundation::time::Timer;
use crate::geometry::GeometryResult;
use crate::input::{InputManager, KeyCode};
use crate::render::backends::HeadlessBackend;
use crate::render::{
    PrimitiveRenderer, RenderBackend, RenderError, ShaderHandle, ShaderSource, SphereRenderer,
};
use crate::foundation::math::{Color, Vec3};
use crate::window::{GlfwWindow, WindowError};
use thiserror::Error;

/// Fixed time step used by headless runs
pub const HEADLESS_TIME_STEP: f32 = 1.0 / 60.0;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window or context creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Backend failure outside of individual draws
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The application returned an error
    #[error("Application error: {0}")]
    Application(#[from] AppError),
}

/// Frame-wide render switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Framebuffer clear color
    pub clear_color: [f32; 4],
    /// Draw collider bounds
    pub show_bounds: bool,
    /// Draw every renderable as outlines
    pub wireframe: bool,
}

impl RenderSettings {
    fn from_config(config: &AppConfig) -> Self {
        Self {
            clear_color: config.clear_color.0,
            show_bounds: config.debug.show_bounds,
            wireframe: config.debug.wireframe,
        }
    }
}

/// Everything an application can reach during a frame
pub struct AppContext {
    /// Entities and components
    pub world: World,
    /// Input state for the current frame
    pub input: InputManager,
    /// Debug shapes drawn on top of the scene
    pub debug: DebugDrawSystem,
    /// Render switches
    pub settings: RenderSettings,
    /// Frame timing
    pub timer: Timer,
    config: AppConfig,
    shader: ShaderHandle,
    running: bool,
}

impl AppContext {
    fn new(config: AppConfig, shader: ShaderHandle) -> Self {
        Self {
            world: World::new(),
            input: InputManager::new(),
            debug: DebugDrawSystem::new(),
            settings: RenderSettings::from_config(&config),
            timer: Timer::new(),
            config,
            shader,
            running: true,
        }
    }

    /// Configuration the engine was started with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared primitive shader
    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    /// Whether the frame loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop after the current frame
    pub fn quit(&mut self) {
        log::info!("Shutdown requested");
        self.running = false;
    }

    /// Feed a window event into the input state
    pub fn handle_event(&mut self, event: &AppEvent) {
        match *event {
            AppEvent::WindowCloseRequested => self.quit(),
            AppEvent::WindowResized { width, height } => self.input.handle_resize(width, height),
            AppEvent::KeyInput {
                key,
                pressed,
                modifiers,
            } => self.input.handle_key_input(key, pressed, modifiers),
            AppEvent::MouseButton {
                button,
                pressed,
                modifiers,
            } => self.input.handle_mouse_button(button, pressed, modifiers),
            AppEvent::MouseMoved { x, y } => self.input.handle_mouse_move(x, y),
            AppEvent::MouseWheel { delta_y, .. } => self.input.handle_scroll(delta_y),
        }
    }

    /// Add a fly camera built from the configuration
    pub fn spawn_camera(&mut self) -> Result<Entity, EcsError> {
        let entity = self.world.create_entity();
        let camera = CameraComponent::from_config(&self.config.camera, self.config.aspect_ratio());
        self.world.add_component(entity, camera)?;
        Ok(entity)
    }

    /// Add a renderable primitive at `transform`, optionally with a fitted collider
    ///
    /// The global wireframe setting is applied to the new renderer.
    pub fn spawn_primitive(
        &mut self,
        renderer: impl Into<PrimitiveRenderer>,
        transform: TransformComponent,
        collide: bool,
    ) -> Result<Entity, EcsError> {
        let mut renderable = RenderableComponent::new(renderer);
        renderable.renderer.set_wireframe(self.settings.wireframe);

        let entity = self.world.create_entity();
        if collide {
            self.world
                .add_component(entity, ColliderComponent::from_renderer(&renderable.renderer))?;
        }
        self.world.add_component(entity, transform)?;
        self.world.add_component(entity, renderable)?;
        Ok(entity)
    }

    /// Sphere renderer at the configured tessellation
    pub fn sphere_renderer(&self, center: Vec3, radius: f32, color: Color) -> GeometryResult<SphereRenderer> {
        let mut sphere = SphereRenderer::new(center, radius, color)?;
        sphere.set_resolution(self.config.mesh.sphere_sectors, self.config.mesh.sphere_stacks)?;
        Ok(sphere)
    }
}

/// Main engine struct
///
/// Per frame: application update, built-in hotkeys, camera, spin,
/// collision, bounds debug, then lighting and rendering.
pub struct Engine {
    context: AppContext,
    camera_system: CameraSystem,
    systems: Vec<Box<dyn System>>,
    bounds_debug: BoundsDebugSystem,
    rendering: RenderingSystem,
    applied_wireframe: bool,
}

impl Engine {
    /// Validate the configuration, compile the shared shader and set up systems
    pub fn new(config: AppConfig, backend: &mut dyn RenderBackend) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let source = ShaderSource::load_or_builtin(&config.shaders);
        let shader = backend.create_shader("primitive", &source)?;
        backend.resize(config.window.width, config.window.height);

        let rendering = RenderingSystem::new(
            LightingSystem::new(),
            DebugRenderer::new(config.mesh.debug_circle_segments),
        );

        Ok(Self {
            context: AppContext::new(config, shader),
            camera_system: CameraSystem::new(),
            systems: vec![Box::new(SpinSystem), Box::new(CollisionSystem::new())],
            bounds_debug: BoundsDebugSystem::new(),
            rendering,
            applied_wireframe: false,
        })
    }

    /// Application-facing state
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Mutable application-facing state
    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    /// Open a window and run until it closes or the application quits
    pub fn run_windowed<A: Application>(config: AppConfig, app: &mut A) -> Result<(), EngineError> {
        config.validate()?;
        let mut window = GlfwWindow::new(&config.window)?;
        let mut backend = window.create_backend();
        let mut engine = Self::new(config, &mut backend)?;

        let result = engine.windowed_loop(app, &mut window, &mut backend);
        engine.shutdown(app, &mut backend);
        result
    }

    fn windowed_loop<A: Application>(
        &mut self,
        app: &mut A,
        window: &mut GlfwWindow,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), EngineError> {
        app.initialize(&mut self.context)?;

        let (width, height) = window.framebuffer_size();
        app.handle_event(&mut self.context, AppEvent::WindowResized { width, height })?;

        log::info!("Starting main loop...");
        while self.context.running && !window.should_close() {
            for event in window.poll_events() {
                app.handle_event(&mut self.context, event)?;
            }
            self.context.timer.update();
            let delta_time = self.context.timer.delta_time();
            self.frame(app, backend, delta_time)?;
            window.swap_buffers();
        }
        Ok(())
    }

    /// Run `frames` frames on the headless backend with a fixed time step
    ///
    /// Returns the backend so callers can inspect what was drawn.
    pub fn run_headless<A: Application>(
        config: AppConfig,
        app: &mut A,
        frames: u32,
    ) -> Result<HeadlessBackend, EngineError> {
        let mut backend = HeadlessBackend::new();
        let mut engine = Self::new(config, &mut backend)?;

        let result = engine.headless_loop(app, &mut backend, frames);
        engine.shutdown(app, &mut backend);
        result.map(|()| backend)
    }

    fn headless_loop<A: Application>(
        &mut self,
        app: &mut A,
        backend: &mut dyn RenderBackend,
        frames: u32,
    ) -> Result<(), EngineError> {
        app.initialize(&mut self.context)?;
        log::info!("Running {frames} headless frames");

        for _ in 0..frames {
            if !self.context.running {
                break;
            }
            self.context.timer.advance(HEADLESS_TIME_STEP);
            self.frame(app, backend, HEADLESS_TIME_STEP)?;
        }
        Ok(())
    }

    /// Run one frame in the fixed system order
    pub fn frame<A: Application>(
        &mut self,
        app: &mut A,
        backend: &mut dyn RenderBackend,
        delta_time: f32,
    ) -> Result<FrameStats, EngineError> {
        let ctx = &mut self.context;

        // expire last frame's shapes before anything queues this frame's
        ctx.debug.update(delta_time);

        app.update(ctx, delta_time)?;
        Self::apply_hotkeys(ctx);

        self.camera_system.update(&mut ctx.world, &ctx.input, delta_time);
        for system in &mut self.systems {
            log::trace!("Running {}", system.name());
            system.update(&mut ctx.world, delta_time);
        }

        if ctx.settings.wireframe != self.applied_wireframe {
            set_wireframe_all(&mut ctx.world, ctx.settings.wireframe);
            self.applied_wireframe = ctx.settings.wireframe;
        }
        if ctx.settings.show_bounds {
            self.bounds_debug.update(&ctx.world, &mut ctx.debug);
        }

        if let Some((width, height)) = ctx.input.last_resize() {
            backend.resize(width, height);
        }

        backend.begin_frame(ctx.settings.clear_color)?;
        let debug = ctx.debug.enabled.then_some(&ctx.debug);
        let stats = self.rendering.render(&mut ctx.world, backend, ctx.shader, debug);
        backend.end_frame()?;

        ctx.input.end_frame();
        Ok(stats)
    }

    /// Built-in keys: Escape quits, F1 toggles wireframe, F2 toggles bounds
    fn apply_hotkeys(ctx: &mut AppContext) {
        if ctx.input.was_key_just_pressed(KeyCode::Escape) {
            ctx.quit();
        }
        if ctx.input.was_key_just_pressed(KeyCode::F1) {
            ctx.settings.wireframe = !ctx.settings.wireframe;
            log::info!("Wireframe {}", if ctx.settings.wireframe { "on" } else { "off" });
        }
        if ctx.input.was_key_just_pressed(KeyCode::F2) {
            ctx.settings.show_bounds = !ctx.settings.show_bounds;
            log::info!("Bounds {}", if ctx.settings.show_bounds { "shown" } else { "hidden" });
        }
    }

    /// Let the application clean up, then release every GPU resource
    pub fn shutdown<A: Application>(&mut self, app: &mut A, backend: &mut dyn RenderBackend) {
        app.cleanup(&mut self.context);
        self.rendering.cleanup(&mut self.context.world, backend);
        backend.destroy_shader(self.context.shader);
        log::info!("Engine shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::SpinComponent;
    use crate::input::Modifiers;
    use crate::geometry::Aabb;
    use crate::render::{CubeRenderer, FillMode, Topology};

    #[derive(Default)]
    struct TestApp {
        updates: u32,
        cleaned_up: bool,
        quit_after: Option<u32>,
        spawn_camera: bool,
        frame_marker: bool,
    }

    impl Application for TestApp {
        fn initialize(&mut self, context: &mut AppContext) -> Result<(), AppError> {
            if self.spawn_camera {
                context.spawn_camera()?;
            }
            let cube = CubeRenderer::new(Vec3::zeros(), Vec3::repeat(1.0), Vec3::x())?;
            let entity = context.spawn_primitive(cube, TransformComponent::identity(), true)?;
            context.world.add_component(entity, SpinComponent::new(Vec3::y(), 1.0))?;
            let sphere = context.sphere_renderer(Vec3::zeros(), 0.5, Vec3::y())?;
            context.spawn_primitive(sphere, TransformComponent::from_position(Vec3::x()), true)?;
            Ok(())
        }

        fn update(&mut self, context: &mut AppContext, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            if self.frame_marker {
                let marker = Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0));
                context.debug.draw_aabb(marker, Vec3::z(), 0.0);
            }
            if self.quit_after == Some(self.updates) {
                context.quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, _context: &mut AppContext) {
            self.cleaned_up = true;
        }
    }

    fn camera_app() -> TestApp {
        TestApp {
            spawn_camera: true,
            ..TestApp::default()
        }
    }

    #[test]
    fn test_headless_run_draws_and_releases_everything() {
        let mut app = camera_app();
        let backend = Engine::run_headless(AppConfig::default(), &mut app, 3).unwrap();

        assert_eq!(app.updates, 3);
        assert!(app.cleaned_up);
        assert_eq!(backend.stats().frames, 3);
        // two primitives plus the bounds line list in the last frame
        assert_eq!(backend.draws().len(), 3);
        assert_eq!(backend.draws_with_topology(Topology::Lines).count(), 1);
        assert_eq!(backend.live_buffers(), 0);
        assert_eq!(backend.live_shaders(), 0);
        assert_eq!(backend.size(), (1280, 720));
    }

    #[test]
    fn test_frame_only_shape_from_update_is_drawn() {
        let mut config = AppConfig::default();
        config.debug.show_bounds = false;
        let mut app = TestApp {
            frame_marker: true,
            ..camera_app()
        };
        let backend = Engine::run_headless(config, &mut app, 2).unwrap();

        assert_eq!(backend.draws_with_topology(Topology::Lines).count(), 1);
        let lines = backend.draws_with_topology(Topology::Lines).next().unwrap();
        // one box, 12 edges
        assert_eq!(lines.vertex_count, 24);
    }

    #[test]
    fn test_no_camera_renders_nothing() {
        let mut app = TestApp::default();
        let backend = Engine::run_headless(AppConfig::default(), &mut app, 2).unwrap();
        assert_eq!(backend.stats().frames, 2);
        assert_eq!(backend.stats().draw_calls, 0);
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut app = TestApp {
            quit_after: Some(2),
            ..camera_app()
        };
        let backend = Engine::run_headless(AppConfig::default(), &mut app, 10).unwrap();
        assert_eq!(app.updates, 2);
        assert_eq!(backend.stats().frames, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut app = camera_app();
        let config = AppConfig::default().with_size(0, 720);
        assert!(matches!(
            Engine::run_headless(config, &mut app, 1),
            Err(EngineError::Config(_))
        ));
        assert_eq!(app.updates, 0);
    }

    #[test]
    fn test_hotkeys_toggle_wireframe_and_bounds() {
        let mut backend = HeadlessBackend::new();
        let mut engine = Engine::new(AppConfig::default(), &mut backend).unwrap();
        let mut app = camera_app();
        app.initialize(engine.context_mut()).unwrap();

        let ctx = engine.context_mut();
        ctx.handle_event(&AppEvent::KeyInput {
            key: KeyCode::F1,
            pressed: true,
            modifiers: Modifiers::empty(),
        });
        ctx.handle_event(&AppEvent::KeyInput {
            key: KeyCode::F2,
            pressed: true,
            modifiers: Modifiers::empty(),
        });

        let stats = engine.frame(&mut app, &mut backend, HEADLESS_TIME_STEP).unwrap();
        assert_eq!(stats.drawn, 2);
        assert!(!stats.debug_drawn);
        assert!(engine.context().settings.wireframe);
        assert!(backend
            .draws()
            .iter()
            .all(|d| d.fill_mode == FillMode::Wireframe));

        engine.shutdown(&mut app, &mut backend);
        assert_eq!(backend.live_buffers(), 0);
    }

    #[test]
    fn test_close_event_stops_running() {
        let mut backend = HeadlessBackend::new();
        let mut engine = Engine::new(AppConfig::default(), &mut backend).unwrap();
        engine.context_mut().handle_event(&AppEvent::WindowCloseRequested);
        assert!(!engine.context().is_running());
    }
}
