use crate::api::types::{NodeId, SceneEvent};
use crate::core::clock::FrameClock;
use crate::core::nodes::NodeStore;
use crate::core::timer::IntervalTimer;
use crate::core::viewport::{ResizePayload, Viewport};
use crate::input::queue::InputQueue;

/// The contract every showcase scene fulfills.
///
/// The director calls `resize` right after construction and on every viewport
/// change, `update` once per frame after the stage has advanced, and `destroy`
/// when the scene is closed.
pub trait Scene {
    /// Route-style name, for logs.
    fn name(&self) -> &'static str;

    /// Design resolution the scene was laid out for.
    fn design(&self) -> Viewport;

    fn resize(&mut self, stage: &mut Stage, payload: ResizePayload);

    fn update(&mut self, stage: &mut Stage, input: &InputQueue);

    /// Release every subscription, timer and node the scene owns.
    /// Must be safe to call more than once.
    fn destroy(&mut self, stage: &mut Stage);
}

/// Mutable world state shared by the scenes: nodes plus the two time sources.
pub struct Stage {
    pub nodes: NodeStore,
    pub clock: FrameClock,
    pub timers: IntervalTimer,
    /// Events for the host. Ones already handed over are dropped by
    /// `clear_frame_data`; ones emitted between frames wait for the next frame.
    pub events: Vec<SceneEvent>,
    delivered: usize,
    next_id: u32,
    seed_state: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            nodes: NodeStore::new(),
            clock: FrameClock::new(),
            timers: IntervalTimer::new(),
            events: Vec::new(),
            delivered: 0,
            next_id: 1,
            seed_state: 0,
        }
    }

    /// Advance the frame clock and the interval timers together.
    pub fn advance(&mut self, delta_ms: f32) {
        self.clock.advance(delta_ms);
        self.timers.advance(delta_ms);
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A new RNG seed on every call, mixed from a counter and the clock (splitmix64).
    pub fn fresh_seed(&mut self) -> u64 {
        self.seed_state = self.seed_state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.seed_state ^ self.clock.now_ms().to_bits();
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Emit an event to be forwarded to the host.
    pub fn emit_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Everything in `events` has been exposed to the host.
    pub fn mark_events_delivered(&mut self) {
        self.delivered = self.events.len();
    }

    /// Drop the events the host has already seen.
    pub fn clear_frame_data(&mut self) {
        let delivered = self.delivered.min(self.events.len());
        self.events.drain(..delivered);
        self.delivered = 0;
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
