//! Input management system
//!
//! [`InputManager`] turns the window's event stream into queryable state:
//! keys and mouse buttons currently held, keys pressed this frame, and the
//! mouse and scroll motion accumulated since the last [`InputManager::end_frame`].

use bitflags::bitflags;
use std::collections::HashSet;

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    pressed_keys: HashSet<KeyCode>,
    just_pressed_keys: HashSet<KeyCode>,
    pressed_buttons: HashSet<MouseButton>,
    cursor_position: Option<(f64, f64)>,
    mouse_delta: (f32, f32),
    scroll_delta: f32,
    last_resize: Option<(u32, u32)>,
    modifiers: Modifiers,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if pressed {
            if self.pressed_keys.insert(key) {
                self.just_pressed_keys.insert(key);
            }
        } else {
            self.pressed_keys.remove(&key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if pressed {
            self.pressed_buttons.insert(button);
        } else {
            self.pressed_buttons.remove(&button);
        }
    }

    /// Handle mouse movement
    ///
    /// The first position after startup only seeds the cursor so the camera
    /// does not jump.
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.cursor_position {
            self.mouse_delta.0 += (x - last_x) as f32;
            self.mouse_delta.1 += (y - last_y) as f32;
        }
        self.cursor_position = Some((x, y));
    }

    /// Handle vertical scroll
    pub fn handle_scroll(&mut self, y_offset: f64) {
        self.scroll_delta += y_offset as f32;
    }

    /// Handle a framebuffer resize
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.last_resize = Some((width, height));
    }

    /// Whether the key is currently held
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Whether the key went down during this frame
    pub fn was_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Whether the mouse button is currently held
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Last known cursor position in window coordinates
    pub fn cursor_position(&self) -> Option<(f64, f64)> {
        self.cursor_position
    }

    /// Mouse motion accumulated this frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Scroll accumulated this frame
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Resize received this frame, if any
    pub fn last_resize(&self) -> Option<(u32, u32)> {
        self.last_resize
    }

    /// Modifier keys reported with the most recent key or button event
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Clear per-frame state; held keys and buttons persist
    pub fn end_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
        self.last_resize = None;
    }
}

bitflags! {
    /// Modifier keys held during an input event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 0b0001;
        /// Either control key
        const CONTROL = 0b0010;
        /// Either alt key
        const ALT = 0b0100;
        /// Either super / command key
        const SUPER = 0b1000;
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Left shift
    LeftShift,
    /// Left control
    LeftControl,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// F1 function key
    F1,
    /// F2 function key
    F2,
    /// F3 function key
    F3,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
