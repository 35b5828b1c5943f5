//! Entity-Component-System implementation
//!
//! Components live in one typed table per component type, keyed by
//! [`Entity`]. Multi-component views intersect tables by walking the smallest
//! one and probing the others.

pub mod component;
pub mod components;
pub mod entity;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::Component;
pub use entity::Entity;
pub use system::System;
pub use world::{EcsError, World};
