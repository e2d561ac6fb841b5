/// Handle to a per-frame subscription on the [`FrameClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(pub u32);

/// Shared frame clock.
///
/// The host advances it once per rendered frame. Components subscribe while they
/// have per-frame work and unsubscribe when they go idle or are torn down, so
/// `subscriber_count()` is the leak check for a destroyed scene.
#[derive(Debug, Default)]
pub struct FrameClock {
    now_ms: f64,
    delta_ms: f32,
    frame: u64,
    subscribers: Vec<TickHandle>,
    next_handle: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame. Negative deltas clamp to zero.
    pub fn advance(&mut self, delta_ms: f32) {
        let delta = delta_ms.max(0.0);
        self.delta_ms = delta;
        self.now_ms += delta as f64;
        self.frame += 1;
    }

    /// Milliseconds since the clock was created.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Delta of the most recent frame.
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn subscribe(&mut self) -> TickHandle {
        let handle = TickHandle(self.next_handle);
        self.next_handle += 1;
        self.subscribers.push(handle);
        handle
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, handle: TickHandle) -> bool {
        match self.subscribers.iter().position(|h| *h == handle) {
            Some(idx) => {
                self.subscribers.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self, handle: TickHandle) -> bool {
        self.subscribers.contains(&handle)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Frames-per-second counter averaged over a fixed window.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    window_ms: f32,
    elapsed_ms: f32,
    frames: u32,
    fps: f32,
}

impl FpsMeter {
    pub const DEFAULT_WINDOW_MS: f32 = 200.0;

    pub fn new(window_ms: f32) -> Self {
        Self {
            window_ms: window_ms.max(1.0),
            elapsed_ms: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Record one frame. Returns the new reading when a window closes.
    pub fn record(&mut self, delta_ms: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed_ms += delta_ms.max(0.0);
        if self.elapsed_ms < self.window_ms {
            return None;
        }
        self.fps = self.frames as f32 * 1000.0 / self.elapsed_ms;
        self.frames = 0;
        self.elapsed_ms = 0.0;
        Some(self.fps)
    }

    /// Last completed reading (0 before the first window closes).
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_time() {
        let mut clock = FrameClock::new();
        clock.advance(16.0);
        clock.advance(17.0);
        assert_eq!(clock.now_ms(), 33.0);
        assert_eq!(clock.delta_ms(), 17.0);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn negative_delta_clamps() {
        let mut clock = FrameClock::new();
        clock.advance(-5.0);
        assert_eq!(clock.now_ms(), 0.0);
        assert_eq!(clock.delta_ms(), 0.0);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut clock = FrameClock::new();
        let a = clock.subscribe();
        let b = clock.subscribe();
        assert_ne!(a, b);
        assert_eq!(clock.subscriber_count(), 2);
        assert!(clock.unsubscribe(a));
        assert!(!clock.unsubscribe(a));
        assert!(!clock.is_subscribed(a));
        assert!(clock.is_subscribed(b));
        assert_eq!(clock.subscriber_count(), 1);
    }

    #[test]
    fn fps_meter_reports_per_window() {
        let mut meter = FpsMeter::default();
        for _ in 0..12 {
            assert!(meter.record(16.0).is_none());
        }
        // 13th frame crosses 200 ms
        let fps = meter.record(16.0).unwrap();
        assert!((fps - 62.5).abs() < 0.01, "got {}", fps);
        assert_eq!(meter.fps(), fps);
    }
}
