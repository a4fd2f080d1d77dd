/// Raw input the host forwards to the engine.
/// Generic: mapping to frontend actions happens in [`ControlMap`](super::controls::ControlMap).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A keyboard key was released.
    KeyUp { key_code: u32 },
    /// A gamepad button was pressed (standard gamepad layout index).
    ButtonDown { button: u32 },
    /// A gamepad button was released.
    ButtonUp { button: u32 },
    /// A custom event from the host UI layer.
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    pub fn is_press(&self) -> bool {
        matches!(self, InputEvent::KeyDown { .. } | InputEvent::ButtonDown { .. })
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
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

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
