use serde::{Deserialize, Serialize};

use crate::assets::registry::TextureId;

/// Bounding rectangle of the canvas in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }
}

/// Keys the scenes react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    /// Any other DOM key code.
    Other(u32),
}

impl Key {
    /// Map a DOM `keyCode`.
    pub fn from_code(code: u32) -> Self {
        match code {
            32 => Key::Space,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            other => Key::Other(other),
        }
    }

    /// Map a DOM `KeyboardEvent.key` string. Unknown names map to `Other(0)`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => Key::Other(0),
        }
    }
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click at client coordinates, with the canvas rect at click time.
    PointerClick { client_x: f32, client_y: f32, rect: Rect },
    /// A key was pressed.
    KeyDown { key: Key },
    /// The drawing surface changed size (pixels).
    Resize { width: f32, height: f32 },
    /// The host finished loading a texture.
    TextureLoaded { id: TextureId, ok: bool },
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them at the start of each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
