//! Foundation module
//!
//! `f32` nalgebra aliases and the TRS [`math::Transform`], frame timing, and
//! the logger setup shared by the demo binaries.

pub mod logging;
pub mod math;
pub mod time;
