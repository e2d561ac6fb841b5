//! Autoplay: show a line, wait, show the next.
//!
//! Each shown line opens a new cycle. The wait ends either when the host
//! reports that the line's audio finished (tagged with the cycle id it was
//! started under) or when a one-shot timeout fires, whichever comes first.
//! Stopping bumps the cycle id so late completions are ignored.

use crate::core::timer::{IntervalTimer, TimerId};

#[derive(Debug, Clone)]
pub struct AutoPlay {
    interval_ms: f32,
    audio_safety_ms: f32,
    playing: bool,
    has_started: bool,
    cycle_id: u32,
    timeout: Option<TimerId>,
}

impl AutoPlay {
    pub fn new(interval_ms: f32, audio_safety_ms: f32) -> Self {
        Self {
            interval_ms,
            audio_safety_ms,
            playing: false,
            has_started: false,
            cycle_id: 0,
            timeout: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn cycle_id(&self) -> u32 {
        self.cycle_id
    }

    pub fn is_waiting(&self) -> bool {
        self.timeout.is_some()
    }

    /// Enter the playing state. Returns true on the very first start,
    /// when playback should begin from the first line.
    pub fn start(&mut self) -> bool {
        self.playing = true;
        let first = !self.has_started;
        self.has_started = true;
        first
    }

    /// Leave the playing state and invalidate the current cycle.
    pub fn stop(&mut self, timers: &mut IntervalTimer) {
        self.playing = false;
        self.cycle_id = self.cycle_id.wrapping_add(1);
        self.clear_timeout(timers);
    }

    /// Open a new cycle for the line about to be shown.
    pub fn begin_cycle(&mut self, timers: &mut IntervalTimer) -> u32 {
        self.clear_timeout(timers);
        self.cycle_id = self.cycle_id.wrapping_add(1);
        self.cycle_id
    }

    /// Arm the fallback wait for the current cycle. A line with audio waits
    /// for the safety timeout, a silent one for the autoplay interval.
    pub fn arm(&mut self, timers: &mut IntervalTimer, has_audio: bool) {
        self.clear_timeout(timers);
        let wait = if has_audio { self.audio_safety_ms } else { self.interval_ms };
        self.timeout = Some(timers.set_timeout(wait));
    }

    /// Whether a playback-complete report for `cycle_id` should advance.
    pub fn accepts(&self, cycle_id: u32) -> bool {
        self.playing && cycle_id == self.cycle_id
    }

    /// True once the armed wait has elapsed. Consumes the timeout.
    pub fn poll_timeout(&mut self, timers: &mut IntervalTimer) -> bool {
        let Some(id) = self.timeout else {
            return false;
        };
        if timers.take_firings(id).is_empty() {
            return false;
        }
        self.timeout = None;
        self.playing
    }

    fn clear_timeout(&mut self, timers: &mut IntervalTimer) {
        if let Some(id) = self.timeout.take() {
            timers.clear(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_start_only_once() {
        let mut auto = AutoPlay::new(3000.0, 15000.0);
        let mut timers = IntervalTimer::new();
        assert!(auto.start());
        auto.stop(&mut timers);
        assert!(!auto.start());
        assert!(auto.is_playing());
    }

    #[test]
    fn silent_line_waits_the_interval() {
        let mut auto = AutoPlay::new(3000.0, 15000.0);
        let mut timers = IntervalTimer::new();
        auto.start();
        auto.begin_cycle(&mut timers);
        auto.arm(&mut timers, false);

        timers.advance(2999.0);
        assert!(!auto.poll_timeout(&mut timers));
        timers.advance(1.0);
        assert!(auto.poll_timeout(&mut timers));
        assert!(!auto.is_waiting());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn audio_line_waits_the_safety_timeout() {
        let mut auto = AutoPlay::new(3000.0, 15000.0);
        let mut timers = IntervalTimer::new();
        auto.start();
        auto.begin_cycle(&mut timers);
        auto.arm(&mut timers, true);
        timers.advance(3000.0);
        assert!(!auto.poll_timeout(&mut timers));
        timers.advance(12000.0);
        assert!(auto.poll_timeout(&mut timers));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut auto = AutoPlay::new(3000.0, 15000.0);
        let mut timers = IntervalTimer::new();
        auto.start();
        let cycle = auto.begin_cycle(&mut timers);
        assert!(auto.accepts(cycle));

        auto.stop(&mut timers);
        assert!(!auto.accepts(cycle));
        auto.start();
        assert!(!auto.accepts(cycle));
        let next = auto.begin_cycle(&mut timers);
        assert!(auto.accepts(next));
        assert_ne!(next, cycle);
    }

    #[test]
    fn stop_clears_pending_wait() {
        let mut auto = AutoPlay::new(3000.0, 15000.0);
        let mut timers = IntervalTimer::new();
        auto.start();
        auto.begin_cycle(&mut timers);
        auto.arm(&mut timers, false);
        auto.stop(&mut timers);
        assert_eq!(timers.active_count(), 0);
        timers.advance(5000.0);
        assert!(!auto.poll_timeout(&mut timers));
    }
}
