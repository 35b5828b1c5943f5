//! OpenGL 3.3 core backend built on `glow`
//!
//! Every GL call is `unsafe` in glow; this is the only module of the crate
//! allowed to use it. The context must be current on the calling thread for
//! the lifetime of the backend.

#![allow(unsafe_code)]

use crate::foundation::math::{utils, Mat4, Vec3};
use crate::render::{
    BackendResult, BufferHandle, DrawCall, FillMode, LightingUniform, RenderBackend,
    RenderError, ShaderHandle, ShaderSource, Topology, Vertex,
};
use glfw::Context as _;
use glow::HasContext;
use std::collections::HashMap;
use std::ffi::c_void;

type ProgramId = <glow::Context as HasContext>::Program;
type ShaderId = <glow::Context as HasContext>::Shader;
type BufferId = <glow::Context as HasContext>::Buffer;
type VertexArrayId = <glow::Context as HasContext>::VertexArray;
type UniformLocation = <glow::Context as HasContext>::UniformLocation;

/// Uniform locations looked up once after linking
struct Uniforms {
    model: Option<UniformLocation>,
    view: Option<UniformLocation>,
    projection: Option<UniformLocation>,
    light_dir: Option<UniformLocation>,
    light_color: Option<UniformLocation>,
    ambient: Option<UniformLocation>,
    view_pos: Option<UniformLocation>,
    unlit: Option<UniformLocation>,
}

struct GlProgram {
    id: ProgramId,
    uniforms: Uniforms,
}

struct GlBuffer {
    vao: VertexArrayId,
    vbo: BufferId,
    capacity_bytes: usize,
}

/// OpenGL rendering backend
pub struct GlBackend {
    gl: glow::Context,
    programs: HashMap<ShaderHandle, GlProgram>,
    buffers: HashMap<BufferHandle, GlBuffer>,
    next_handle: u64,
    lighting: LightingUniform,
}

impl GlBackend {
    /// Load GL entry points through `loader` and set default state
    ///
    /// # Safety
    /// An OpenGL 3.3 core context must be current on this thread and remain
    /// current for as long as the backend is used.
    pub unsafe fn from_loader<F>(loader: F, width: u32, height: u32) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        // SAFETY: the caller guarantees a current 3.3 core context, so every
        // pointer `loader` returns belongs to it, and the GL calls below and in
        // later methods run on the thread that owns that context.
        let gl = glow::Context::from_loader_function(loader);
        log::info!(
            "OpenGL context: {} / {}",
            gl.get_parameter_string(glow::VERSION),
            gl.get_parameter_string(glow::RENDERER)
        );

        gl.enable(glow::DEPTH_TEST);
        gl.depth_func(glow::LESS);

        let mut backend = Self {
            gl,
            programs: HashMap::new(),
            buffers: HashMap::new(),
            next_handle: 0,
            lighting: LightingUniform::default(),
        };
        backend.resize(width, height);
        backend
    }

    fn allocate_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Compile one stage, logging the info log on failure
    ///
    /// A stage that fails to compile is still returned; linking will then
    /// fail too and be logged, but the frame loop keeps running.
    fn compile_stage(&self, name: &str, kind: u32, source: &str) -> BackendResult<ShaderId> {
        let stage = if kind == glow::VERTEX_SHADER { "vertex" } else { "fragment" };
        unsafe {
            let shader = self
                .gl
                .create_shader(kind)
                .map_err(RenderError::ResourceCreationFailed)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                log::error!(
                    "Failed to compile {stage} shader for '{name}':\n{}",
                    self.gl.get_shader_info_log(shader)
                );
            }
            Ok(shader)
        }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let location = unsafe { self.gl.get_uniform_location(program, name) };
        if location.is_none() {
            log::debug!("Uniform {name} not active in program");
        }
        location
    }

    fn set_mat4(&self, location: Option<&UniformLocation>, matrix: &Mat4) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(location, false, &utils::to_cols_array(matrix));
        }
    }

    fn set_vec3(&self, location: Option<&UniformLocation>, v: &Vec3) {
        unsafe { self.gl.uniform_3_f32(location, v.x, v.y, v.z) }
    }
}

impl GlBackend {
    /// Make the window's context current and build a backend for it
    pub fn for_window(window: &mut glfw::PWindow) -> Self {
        window.make_current();
        let (width, height) = window.get_framebuffer_size();
        let (width, height) = (width.max(0) as u32, height.max(0) as u32);
        // SAFETY: the context was made current on this thread just above and
        // the window outlives the frame loop that uses the backend.
        unsafe {
            Self::from_loader(
                |name| window.get_proc_address(name) as *const c_void,
                width,
                height,
            )
        }
    }
}

impl RenderBackend for GlBackend {
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> BackendResult<()> {
        let [r, g, b, a] = clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        Ok(())
    }

    fn create_shader(&mut self, name: &str, source: &ShaderSource) -> BackendResult<ShaderHandle> {
        let vertex = self.compile_stage(name, glow::VERTEX_SHADER, &source.vertex)?;
        let fragment = self.compile_stage(name, glow::FRAGMENT_SHADER, &source.fragment)?;

        let program = unsafe {
            let program = self
                .gl
                .create_program()
                .map_err(RenderError::ResourceCreationFailed)?;
            self.gl.attach_shader(program, vertex);
            self.gl.attach_shader(program, fragment);
            self.gl.link_program(program);
            if !self.gl.get_program_link_status(program) {
                log::error!(
                    "Failed to link shader program '{name}':\n{}",
                    self.gl.get_program_info_log(program)
                );
            }
            for stage in [vertex, fragment] {
                self.gl.detach_shader(program, stage);
                self.gl.delete_shader(stage);
            }
            program
        };

        let uniforms = Uniforms {
            model: self.uniform_location(program, "u_model"),
            view: self.uniform_location(program, "u_view"),
            projection: self.uniform_location(program, "u_projection"),
            light_dir: self.uniform_location(program, "u_light_dir"),
            light_color: self.uniform_location(program, "u_light_color"),
            ambient: self.uniform_location(program, "u_ambient"),
            view_pos: self.uniform_location(program, "u_view_pos"),
            unlit: self.uniform_location(program, "u_unlit"),
        };

        let handle = ShaderHandle(self.allocate_handle());
        self.programs.insert(handle, GlProgram { id: program, uniforms });
        log::info!("Shader program '{name}' created as {handle:?}");
        Ok(handle)
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) {
        if let Some(program) = self.programs.remove(&shader) {
            unsafe { self.gl.delete_program(program.id) };
        }
    }

    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> BackendResult<BufferHandle> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let stride = i32::try_from(Vertex::STRIDE)
            .map_err(|e| RenderError::ResourceCreationFailed(e.to_string()))?;

        let buffer = unsafe {
            let vao = self
                .gl
                .create_vertex_array()
                .map_err(RenderError::ResourceCreationFailed)?;
            let vbo = self
                .gl
                .create_buffer()
                .map_err(RenderError::ResourceCreationFailed)?;

            self.gl.bind_vertex_array(Some(vao));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::DYNAMIC_DRAW);

            for (location, components, offset) in Vertex::ATTRIBUTES {
                self.gl.enable_vertex_attrib_array(location);
                self.gl.vertex_attrib_pointer_f32(
                    location,
                    components,
                    glow::FLOAT,
                    false,
                    stride,
                    offset as i32,
                );
            }

            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);

            GlBuffer {
                vao,
                vbo,
                capacity_bytes: bytes.len(),
            }
        };

        let handle = BufferHandle(self.allocate_handle());
        self.buffers.insert(handle, buffer);
        log::debug!("Vertex buffer {handle:?} created with {} vertices", vertices.len());
        Ok(handle)
    }

    fn update_vertex_buffer(&mut self, buffer: BufferHandle, vertices: &[Vertex]) -> BackendResult<()> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let stored = self.buffers.get_mut(&buffer).ok_or_else(|| {
            RenderError::BackendError(format!("update of unknown buffer {buffer:?}"))
        })?;

        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(stored.vbo));
            if bytes.len() <= stored.capacity_bytes {
                self.gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, bytes);
            } else {
                self.gl
                    .buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::DYNAMIC_DRAW);
                stored.capacity_bytes = bytes.len();
            }
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        Ok(())
    }

    fn destroy_vertex_buffer(&mut self, buffer: BufferHandle) {
        if let Some(stored) = self.buffers.remove(&buffer) {
            unsafe {
                self.gl.delete_vertex_array(stored.vao);
                self.gl.delete_buffer(stored.vbo);
            }
        }
    }

    fn set_lighting(&mut self, lighting: &LightingUniform) {
        self.lighting = *lighting;
    }

    fn draw(&mut self, call: &DrawCall) -> BackendResult<()> {
        let program = self.programs.get(&call.shader).ok_or_else(|| {
            RenderError::BackendError(format!("draw with unknown shader {:?}", call.shader))
        })?;
        let buffer = self.buffers.get(&call.buffer).ok_or_else(|| {
            RenderError::BackendError(format!("draw with unknown buffer {:?}", call.buffer))
        })?;
        let count = i32::try_from(call.vertex_count)
            .map_err(|e| RenderError::BackendError(e.to_string()))?;

        let uniforms = &program.uniforms;
        unsafe { self.gl.use_program(Some(program.id)) };

        self.set_mat4(uniforms.model.as_ref(), &call.model);
        self.set_mat4(uniforms.view.as_ref(), &call.view);
        self.set_mat4(uniforms.projection.as_ref(), &call.projection);
        self.set_vec3(uniforms.light_dir.as_ref(), &self.lighting.direction);
        self.set_vec3(uniforms.light_color.as_ref(), &self.lighting.color);
        self.set_vec3(uniforms.ambient.as_ref(), &self.lighting.ambient);
        self.set_vec3(uniforms.view_pos.as_ref(), &self.lighting.view_position);

        let mode = match call.topology {
            Topology::Triangles => glow::TRIANGLES,
            Topology::Lines => glow::LINES,
        };
        let polygon_mode = match call.fill_mode {
            FillMode::Solid => glow::FILL,
            FillMode::Wireframe => glow::LINE,
        };

        unsafe {
            self.gl.uniform_1_i32(uniforms.unlit.as_ref(), i32::from(call.unlit));
            self.gl.polygon_mode(glow::FRONT_AND_BACK, polygon_mode);
            self.gl.bind_vertex_array(Some(buffer.vao));
            self.gl.draw_arrays(mode, 0, count);
            self.gl.bind_vertex_array(None);
            self.gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
        }
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        let error = unsafe { self.gl.get_error() };
        if error != glow::NO_ERROR {
            log::error!("OpenGL error 0x{error:04X} during frame");
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        unsafe { self.gl.viewport(0, 0, w, h) };
        log::debug!("Viewport resized to {width}x{height}");
    }
}

impl Drop for GlBackend {
    fn drop(&mut self) {
        if !self.buffers.is_empty() || !self.programs.is_empty() {
            log::warn!(
                "GlBackend dropped with {} buffers and {} programs still alive",
                self.buffers.len(),
                self.programs.len()
            );
        }
    }
}
