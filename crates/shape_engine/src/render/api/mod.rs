//! Backend-agnostic rendering API

mod render_backend;

pub use render_backend::{
    BackendResult, BufferHandle, DrawCall, FillMode, RenderBackend, ShaderHandle, Topology,
};
