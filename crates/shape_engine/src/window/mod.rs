//! GLFW window with an OpenGL 3.3 core context

use crate::application::AppEvent;
use crate::config::WindowConfig;
use crate::input::{KeyCode, Modifiers, MouseButton};
use crate::render::backends::GlBackend;
use glfw::Context as _;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its GL context could not be created
    #[error("Window creation failed ({width}x{height})")]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Open a window and make its context current
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed {
                width: config.width,
                height: config.height,
            })?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        log::info!("Window '{}' created ({}x{})", config.title, config.width, config.height);
        Ok(Self { glfw, window, events })
    }

    /// Build the OpenGL backend for this window's context
    pub fn create_backend(&mut self) -> GlBackend {
        GlBackend::for_window(&mut self.window)
    }

    /// Whether the user asked to close the window
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request the window to close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Pump the event queue and translate what the engine understands
    pub fn poll_events(&mut self) -> Vec<AppEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(event))
            .collect()
    }
}

fn translate_event(event: glfw::WindowEvent) -> Option<AppEvent> {
    match event {
        glfw::WindowEvent::Key(key, _, action, mods) => {
            let pressed = match action {
                glfw::Action::Press => true,
                glfw::Action::Release => false,
                glfw::Action::Repeat => return None,
            };
            Some(AppEvent::KeyInput {
                key: translate_key(key)?,
                pressed,
                modifiers: translate_modifiers(mods),
            })
        }
        glfw::WindowEvent::MouseButton(button, action, mods) => {
            let button = match button {
                glfw::MouseButton::Button1 => MouseButton::Left,
                glfw::MouseButton::Button2 => MouseButton::Right,
                glfw::MouseButton::Button3 => MouseButton::Middle,
                _ => return None,
            };
            Some(AppEvent::MouseButton {
                button,
                pressed: action != glfw::Action::Release,
                modifiers: translate_modifiers(mods),
            })
        }
        glfw::WindowEvent::CursorPos(x, y) => Some(AppEvent::MouseMoved { x, y }),
        glfw::WindowEvent::Scroll(delta_x, delta_y) => Some(AppEvent::MouseWheel { delta_x, delta_y }),
        glfw::WindowEvent::FramebufferSize(width, height) => Some(AppEvent::WindowResized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }),
        glfw::WindowEvent::Close => Some(AppEvent::WindowCloseRequested),
        _ => None,
    }
}

fn translate_modifiers(mods: glfw::Modifiers) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, mods.contains(glfw::Modifiers::Shift));
    modifiers.set(Modifiers::CONTROL, mods.contains(glfw::Modifiers::Control));
    modifiers.set(Modifiers::ALT, mods.contains(glfw::Modifiers::Alt));
    modifiers.set(Modifiers::SUPER, mods.contains(glfw::Modifiers::Super));
    modifiers
}

fn translate_key(key: glfw::Key) -> Option<KeyCode> {
    use glfw::Key;
    let code = match key {
        Key::A => KeyCode::A,
        Key::B => KeyCode::B,
        Key::C => KeyCode::C,
        Key::D => KeyCode::D,
        Key::E => KeyCode::E,
        Key::F => KeyCode::F,
        Key::G => KeyCode::G,
        Key::H => KeyCode::H,
        Key::I => KeyCode::I,
        Key::J => KeyCode::J,
        Key::K => KeyCode::K,
        Key::L => KeyCode::L,
        Key::M => KeyCode::M,
        Key::N => KeyCode::N,
        Key::O => KeyCode::O,
        Key::P => KeyCode::P,
        Key::Q => KeyCode::Q,
        Key::R => KeyCode::R,
        Key::S => KeyCode::S,
        Key::T => KeyCode::T,
        Key::U => KeyCode::U,
        Key::V => KeyCode::V,
        Key::W => KeyCode::W,
        Key::X => KeyCode::X,
        Key::Y => KeyCode::Y,
        Key::Z => KeyCode::Z,
        Key::Space => KeyCode::Space,
        Key::Enter => KeyCode::Enter,
        Key::Escape => KeyCode::Escape,
        Key::Tab => KeyCode::Tab,
        Key::LeftShift => KeyCode::LeftShift,
        Key::LeftControl => KeyCode::LeftControl,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::F1 => KeyCode::F1,
        Key::F2 => KeyCode::F2,
        Key::F3 => KeyCode::F3,
        _ => return None,
    };
    Some(code)
}
