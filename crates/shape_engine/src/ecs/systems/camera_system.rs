//! Camera update

use crate::ecs::components::CameraComponent;
use crate::ecs::{Entity, World};
use crate::input::InputManager;
use crate::render::Camera;

/// First active camera in the world
pub fn active_camera(world: &World) -> Option<(Entity, &Camera)> {
    world
        .query::<CameraComponent>()
        .into_iter()
        .find(|(_, component)| component.active)
        .map(|(entity, component)| (entity, &component.camera))
}

/// Applies input to controlled cameras and keeps aspect ratios in sync with
/// the window
#[derive(Debug, Default)]
pub struct CameraSystem;

impl CameraSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }

    /// Move active cameras and react to this frame's resize
    pub fn update(&mut self, world: &mut World, input: &InputManager, delta_time: f32) {
        let resize = input
            .last_resize()
            .filter(|&(width, height)| width > 0 && height > 0);

        for entity in world.entities_with::<CameraComponent>() {
            let Some(component) = world.get_component_mut::<CameraComponent>(entity) else {
                continue;
            };

            if let Some((width, height)) = resize {
                component.camera.set_aspect_ratio(width as f32 / height as f32);
            }
            if !component.active {
                continue;
            }
            if let Some(controller) = &component.controller {
                controller.update(&mut component.camera, input, delta_time);
            }
        }
    }
}
