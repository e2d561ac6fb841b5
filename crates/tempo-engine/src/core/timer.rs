/// Handle to a timer registered on the [`IntervalTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Shortest allowed period; a zero period would fire forever within one advance.
pub const MIN_PERIOD_MS: f64 = 1.0;

#[derive(Debug, Clone)]
struct TimerSlot {
    id: TimerId,
    period_ms: f64,
    next_fire_ms: f64,
    repeating: bool,
    active: bool,
    /// Scheduled timestamps of firings not yet taken by the owner.
    fired: Vec<f64>,
}

/// Coarse repeating/one-shot timers, independent of the frame clock's subscribers.
///
/// Firings are recorded with their exact scheduled time rather than the time the
/// frame happened to land on, so owners can reconstruct a frame-rate independent
/// timeline. Owners drain them with [`IntervalTimer::take_firings`].
#[derive(Debug, Default)]
pub struct IntervalTimer {
    now_ms: f64,
    slots: Vec<TimerSlot>,
    next_id: u32,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Fire every `period_ms`, first firing one period from now.
    pub fn set_interval(&mut self, period_ms: f32) -> TimerId {
        self.insert(period_ms, true)
    }

    /// Fire once after `delay_ms`.
    pub fn set_timeout(&mut self, delay_ms: f32) -> TimerId {
        self.insert(delay_ms, false)
    }

    fn insert(&mut self, period_ms: f32, repeating: bool) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period_ms = (period_ms as f64).max(MIN_PERIOD_MS);
        self.slots.push(TimerSlot {
            id,
            period_ms,
            next_fire_ms: self.now_ms + period_ms,
            repeating,
            active: true,
            fired: Vec::new(),
        });
        id
    }

    /// Cancel a timer and drop its untaken firings.
    /// Returns false if it had already been cleared or had run out.
    pub fn clear(&mut self, id: TimerId) -> bool {
        match self.slots.iter().position(|s| s.id == id) {
            Some(idx) => self.slots.remove(idx).active,
            None => false,
        }
    }

    /// Move time forward, recording every firing that falls due.
    pub fn advance(&mut self, delta_ms: f32) {
        self.now_ms += delta_ms.max(0.0) as f64;
        let now = self.now_ms;
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            while slot.next_fire_ms <= now {
                slot.fired.push(slot.next_fire_ms);
                if slot.repeating {
                    slot.next_fire_ms += slot.period_ms;
                } else {
                    slot.active = false;
                    break;
                }
            }
        }
    }

    /// Drain the scheduled timestamps of firings since the last call.
    /// A spent one-shot is forgotten once its firing has been taken.
    pub fn take_firings(&mut self, id: TimerId) -> Vec<f64> {
        let Some(idx) = self.slots.iter().position(|s| s.id == id) else {
            return Vec::new();
        };
        let fired = std::mem::take(&mut self.slots[idx].fired);
        if !self.slots[idx].active {
            self.slots.remove(idx);
        }
        fired
    }

    /// Whether the timer can still fire.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.slots.iter().any(|s| s.id == id && s.active)
    }

    /// Number of timers that can still fire.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }
}
