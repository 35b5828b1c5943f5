//! System trait

use super::World;

/// A per-frame step that only needs the world and the frame time
///
/// Systems with extra inputs (input state, a render backend) expose their
/// own `update`/`render` functions instead.
pub trait System {
    /// Human-readable name for logs
    fn name(&self) -> &'static str;

    /// Advance the system by `delta_time` seconds
    fn update(&mut self, world: &mut World, delta_time: f32);
}
