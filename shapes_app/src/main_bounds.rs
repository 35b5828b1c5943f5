//! Bounds demo
//!
//! Colliders slide back and forth through each other; their bounds turn red
//! while they overlap. The rotating box also shows its oriented bounds.
//! Enter casts a ray from the camera and reports the first collider it hits.

mod cli;

use shape_engine::ecs::components::ColliderShape;
use shape_engine::foundation::math::Mat4;
use shape_engine::prelude::*;

/// A collider moving along X around `base`
struct Slider {
    entity: Entity,
    base: Vec3,
    amplitude: f32,
    speed: f32,
}

#[derive(Default)]
struct BoundsDemo {
    sliders: Vec<Slider>,
    spinner: Option<Entity>,
    elapsed: f32,
}

impl BoundsDemo {
    fn spawn_slider(
        &mut self,
        context: &mut AppContext,
        renderer: impl Into<PrimitiveRenderer>,
        base: Vec3,
        amplitude: f32,
        speed: f32,
    ) -> Result<(), AppError> {
        let entity = context.spawn_primitive(renderer, TransformComponent::from_position(base), true)?;
        self.sliders.push(Slider {
            entity,
            base,
            amplitude,
            speed,
        });
        Ok(())
    }

    /// Nearest collider along a ray from the active camera
    fn pick(context: &AppContext, ray: &Ray) -> Option<(Entity, f32)> {
        context
            .world
            .query::<ColliderComponent>()
            .into_iter()
            .filter_map(|(entity, collider)| {
                let model = context
                    .world
                    .get_component::<TransformComponent>(entity)
                    .map_or_else(Mat4::identity, TransformComponent::to_matrix);
                let hit = match collider.world_shape(&model) {
                    ColliderShape::Aabb(aabb) => ray.intersect_aabb(&aabb),
                    ColliderShape::Sphere(sphere) => sphere.intersect_ray(ray),
                };
                hit.map(|distance| (entity, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn cast_ray(context: &mut AppContext) -> Result<(), AppError> {
        let Some(camera) = context
            .world
            .query::<CameraComponent>()
            .into_iter()
            .find(|(_, c)| c.active)
            .map(|(_, c)| c.camera.clone())
        else {
            return Ok(());
        };

        let ray = camera.forward_ray(camera.far)?;
        match Self::pick(context, &ray) {
            Some((entity, distance)) => {
                log::info!("Ray hit {entity:?} at distance {distance:.2}");
                let hit = Ray::new(ray.origin, ray.direction, distance)?;
                context.debug.draw_ray(hit, Vec3::new(1.0, 1.0, 0.2), 2.0);
            }
            None => {
                log::info!("Ray hit nothing");
                context.debug.draw_ray(ray, Vec3::new(0.6, 0.6, 0.6), 2.0);
            }
        }
        Ok(())
    }
}

impl Application for BoundsDemo {
    fn initialize(&mut self, context: &mut AppContext) -> Result<(), AppError> {
        context.spawn_camera()?;
        let light = context.world.create_entity();
        context
            .world
            .add_component(light, LightFactory::point(Vec3::new(3.0, 6.0, 4.0), Vec3::repeat(1.0), 1.0))?;

        let left = context.sphere_renderer(Vec3::zeros(), 0.7, Vec3::new(0.3, 0.5, 0.9))?;
        self.spawn_slider(context, left, Vec3::new(-1.5, 0.8, 0.0), 1.5, 0.9)?;

        let right = CubeRenderer::new(Vec3::zeros(), Vec3::repeat(1.0), Vec3::new(0.85, 0.4, 0.25))?;
        self.spawn_slider(context, right, Vec3::new(1.5, 0.8, 0.0), -1.5, 0.9)?;

        let spinner = CubeRenderer::new(Vec3::zeros(), Vec3::new(2.0, 0.5, 0.8), Vec3::new(0.4, 0.8, 0.4))?;
        let spinner = context.spawn_primitive(
            spinner,
            TransformComponent::from_position(Vec3::new(0.0, 0.8, -3.0)),
            true,
        )?;
        context.world.add_component(spinner, SpinComponent::new(Vec3::y(), 0.6))?;
        self.spinner = Some(spinner);

        let wall = Aabb::new(Vec3::new(-6.0, 0.0, -6.0), Vec3::new(6.0, 4.0, 6.0));
        context.debug.draw_persistent(
            "arena",
            shape_engine::debug::DebugShape::new(shape_engine::debug::DebugPrimitive::Aabb(wall), Vec3::repeat(0.5)),
        );
        Ok(())
    }

    fn update(&mut self, context: &mut AppContext, delta_time: f32) -> Result<(), AppError> {
        self.elapsed += delta_time;

        for slider in &self.sliders {
            let offset = slider.amplitude * (self.elapsed * slider.speed).sin();
            if let Some(transform) = context.world.get_component_mut::<TransformComponent>(slider.entity) {
                transform.position = slider.base + Vec3::new(offset, 0.0, 0.0);
            }
        }

        if let Some(spinner) = self.spinner {
            let obb = context
                .world
                .get_component::<TransformComponent>(spinner)
                .zip(context.world.get_component::<RenderableComponent>(spinner))
                .map(|(transform, renderable)| {
                    Obb::from_aabb_transform(&renderable.renderer.local_bounds(), &transform.to_math_transform())
                });
            if let Some(obb) = obb {
                context.debug.draw_obb(obb, Vec3::new(0.2, 0.8, 0.9), 0.0);
            }
        }

        if context.input.was_key_just_pressed(KeyCode::Enter) {
            Self::cast_ray(context)?;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = cli::parse("bounds_demo", "Shows collider bounds, overlaps and ray picking");
    cli::run(&options, "Shape Engine - Bounds", &mut BoundsDemo::default())
}
