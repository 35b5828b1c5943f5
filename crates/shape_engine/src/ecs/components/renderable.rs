//! Renderable component

use crate::ecs::Component;
use crate::render::PrimitiveRenderer;

/// A primitive drawn at the entity's transform
#[derive(Debug)]
pub struct RenderableComponent {
    /// The renderer owning the shape parameters and GPU buffer
    pub renderer: PrimitiveRenderer,
    /// Hidden entities keep their buffers but issue no draws
    pub visible: bool,
}

impl Component for RenderableComponent {}

impl RenderableComponent {
    /// Wrap any primitive renderer
    pub fn new(renderer: impl Into<PrimitiveRenderer>) -> Self {
        Self {
            renderer: renderer.into(),
            visible: true,
        }
    }

    /// Builder pattern: Set visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}
