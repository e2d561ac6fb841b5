/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A command from the host UI layer (DOM buttons, etc.).
    /// `kind` is one of the [`commands`] constants; `a`, `b`, `c` carry its data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// `InputEvent::Custom` kinds.
pub mod commands {
    /// Show the next dialogue line.
    pub const DIALOGUE_NEXT: u32 = 1;
    /// Toggle dialogue autoplay.
    pub const AUTOPLAY_TOGGLE: u32 = 2;
    /// Line audio finished. `a` = autoplay cycle id it was started under.
    pub const PLAYBACK_COMPLETE: u32 = 3;
    /// Host can play line audio. `a` = 1.0 to enable, 0.0 to disable.
    pub const AUDIO_AVAILABLE: u32 = 4;
}

impl InputEvent {
    pub fn dialogue_next() -> Self {
        Self::command(commands::DIALOGUE_NEXT, 0.0)
    }

    pub fn autoplay_toggle() -> Self {
        Self::command(commands::AUTOPLAY_TOGGLE, 0.0)
    }

    pub fn playback_complete(cycle_id: u32) -> Self {
        Self::command(commands::PLAYBACK_COMPLETE, cycle_id as f32)
    }

    pub fn audio_available(available: bool) -> Self {
        Self::command(commands::AUDIO_AVAILABLE, if available { 1.0 } else { 0.0 })
    }

    fn command(kind: u32, a: f32) -> Self {
        Self::Custom { kind, a, b: 0.0, c: 0.0 }
    }
}

/// A queue of input events.
/// The host writes events into the queue; Rust reads and drains them each frame.
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

    /// Pending `Custom` events of one kind, as their `a` payloads.
    pub fn commands(&self, kind: u32) -> impl Iterator<Item = f32> + '_ {
        self.events.iter().filter_map(move |e| match *e {
            InputEvent::Custom { kind: k, a, .. } if k == kind => Some(a),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
