//! Primitives demo
//!
//! One of each primitive: a spinning cube, a sphere, a floor plane, a
//! triangle and a ray. F1 toggles wireframe, F2 toggles collider bounds,
//! C cycles the cube color and Escape quits.

mod cli;

use shape_engine::prelude::*;

const PALETTE: [[f32; 3]; 4] = [
    [0.85, 0.35, 0.25],
    [0.25, 0.65, 0.85],
    [0.35, 0.8, 0.35],
    [0.9, 0.8, 0.3],
];

#[derive(Default)]
struct PrimitivesDemo {
    cube: Option<Entity>,
    palette_index: usize,
}

impl Application for PrimitivesDemo {
    fn initialize(&mut self, context: &mut AppContext) -> Result<(), AppError> {
        log::info!("Building primitives scene");
        context.spawn_camera()?;

        let sun = context.world.create_entity();
        context.world.add_component(
            sun,
            LightFactory::directional(Vec3::new(-0.4, -1.0, -0.3), Vec3::new(1.0, 0.97, 0.9), 1.0),
        )?;

        let cube = CubeRenderer::new(Vec3::zeros(), Vec3::repeat(1.2), Vec3::from(PALETTE[0]))?;
        let cube = context.spawn_primitive(
            cube,
            TransformComponent::from_position(Vec3::new(-2.5, 0.6, 0.0)),
            true,
        )?;
        context
            .world
            .add_component(cube, SpinComponent::new(Vec3::new(0.3, 1.0, 0.0), 0.8))?;
        self.cube = Some(cube);

        let sphere = context.sphere_renderer(Vec3::zeros(), 0.8, Vec3::new(0.3, 0.5, 0.9))?;
        context.spawn_primitive(
            sphere,
            TransformComponent::from_position(Vec3::new(0.0, 0.8, 0.0)),
            true,
        )?;

        let floor = PlaneRenderer::new(Vec3::y(), 0.0, 12.0, Vec3::new(0.45, 0.45, 0.5))?;
        context.spawn_primitive(floor, TransformComponent::identity(), false)?;

        let triangle = TriangleRenderer::new(
            Vec3::new(-0.8, 0.0, 0.0),
            Vec3::new(0.8, 0.0, 0.0),
            Vec3::new(0.0, 1.4, 0.0),
            Vec3::new(0.9, 0.6, 0.2),
        )?;
        context.spawn_primitive(
            triangle,
            TransformComponent::from_position(Vec3::new(2.5, 0.0, 0.0)),
            true,
        )?;

        let ray = RayRenderer::new(Vec3::new(-4.0, 2.5, 0.0), Vec3::new(1.0, -0.2, 0.0), 8.0, Vec3::new(1.0, 1.0, 0.2))?;
        context.spawn_primitive(ray, TransformComponent::identity(), false)?;

        log::info!("Scene ready with {} entities", context.world.entity_count());
        Ok(())
    }

    fn update(&mut self, context: &mut AppContext, _delta_time: f32) -> Result<(), AppError> {
        if !context.input.was_key_just_pressed(KeyCode::C) {
            return Ok(());
        }
        self.palette_index = (self.palette_index + 1) % PALETTE.len();
        let color = Vec3::from(PALETTE[self.palette_index]);

        let Some(cube) = self.cube else {
            return Ok(());
        };
        if let Some(renderable) = context.world.get_component_mut::<RenderableComponent>(cube) {
            renderable.renderer.set_color(color);
            log::info!("Cube color set to {color:?}");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = cli::parse("primitives_demo", "Renders one of each primitive shape");
    cli::run(&options, "Shape Engine - Primitives", &mut PrimitivesDemo::default())
}
