// extensions/tween.rs
//
// Tween system: timed A-to-B transitions of node properties, addressed by NodeId.
// Progress is sampled from the stage clock (elapsed since start / duration), so
// the result does not depend on how many frames happened in between.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.start(stage, Tween::position(node, from, to, 500.0).with_easing(Easing::QuadOut));
//   let done = tweens.tick(stage);  // Applies every active tween, returns completed ids

use std::collections::BTreeMap;
use glam::Vec2;
use crate::api::scene::Stage;
use crate::api::types::NodeId;
use crate::core::clock::TickHandle;
use super::easing::{Easing, lerp, lerp_vec2};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Animate Node.pos
    Position { from: Vec2, to: Vec2 },
    /// Animate Node.scale
    Scale { from: Vec2, to: Vec2 },
    /// Animate sprite alpha (if the node has a sprite)
    Alpha { from: f32, to: f32 },
}

type ProgressFn = Box<dyn FnMut(f32)>;
type CompleteFn = Box<dyn FnOnce()>;

/// A tween description, consumed by [`TweenState::start`].
pub struct Tween {
    pub node: NodeId,
    pub target: TweenTarget,
    /// Duration in milliseconds. Zero or negative completes on start.
    pub duration_ms: f32,
    /// Curve applied to the written value. Callbacks always see linear progress.
    pub easing: Easing,
    on_progress: Option<ProgressFn>,
    on_complete: Option<CompleteFn>,
}

impl Tween {
    fn new(node: NodeId, target: TweenTarget, duration_ms: f32) -> Self {
        Self {
            node,
            target,
            duration_ms,
            easing: Easing::Linear,
            on_progress: None,
            on_complete: None,
        }
    }

    pub fn position(node: NodeId, from: Vec2, to: Vec2, duration_ms: f32) -> Self {
        Self::new(node, TweenTarget::Position { from, to }, duration_ms)
    }

    pub fn scale(node: NodeId, from: Vec2, to: Vec2, duration_ms: f32) -> Self {
        Self::new(node, TweenTarget::Scale { from, to }, duration_ms)
    }

    pub fn scale_uniform(node: NodeId, from: f32, to: f32, duration_ms: f32) -> Self {
        Self::scale(node, Vec2::splat(from), Vec2::splat(to), duration_ms)
    }

    pub fn alpha(node: NodeId, from: f32, to: f32, duration_ms: f32) -> Self {
        Self::new(node, TweenTarget::Alpha { from, to }, duration_ms)
    }

    // -- Builder methods --

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Called every sampled frame with linear progress in [0, 1].
    pub fn on_progress(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called once when progress reaches 1. Never called after a cancel.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    fn apply(&self, stage: &mut Stage, t: f32) {
        let Some(node) = stage.nodes.get_mut(self.node) else {
            return;
        };
        let e = self.easing.apply(t);
        match self.target {
            TweenTarget::Position { from, to } => node.pos = lerp_vec2(from, to, e),
            TweenTarget::Scale { from, to } => node.scale = lerp_vec2(from, to, e),
            TweenTarget::Alpha { from, to } => node.set_alpha(lerp(from, to, e)),
        }
    }

    fn progress_at(&self, elapsed_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((elapsed_ms / self.duration_ms as f64) as f32).clamp(0.0, 1.0)
    }

    fn finish(&mut self) {
        if let Some(f) = self.on_complete.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("node", &self.node)
            .field("target", &self.target)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

#[derive(Debug)]
struct ActiveTween {
    tween: Tween,
    started_at: f64,
    progress: f32,
    tick: TickHandle,
}

/// Manages all active tweens. Iteration follows start order.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: BTreeMap<TweenId, ActiveTween>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap the node to the start value and begin ticking.
    /// A non-positive duration snaps to the end value and completes right away.
    pub fn start(&mut self, stage: &mut Stage, mut tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;

        if tween.duration_ms <= 0.0 {
            tween.apply(stage, 1.0);
            if let Some(f) = tween.on_progress.as_mut() {
                f(1.0);
            }
            tween.finish();
            return id;
        }

        tween.apply(stage, 0.0);
        let tick = stage.clock.subscribe();
        self.tweens.insert(
            id,
            ActiveTween {
                tween,
                started_at: stage.clock.now_ms(),
                progress: 0.0,
                tick,
            },
        );
        id
    }

    /// Stop a tween where it is. No callbacks fire afterwards.
    /// Returns false if it already completed or was cancelled.
    pub fn cancel(&mut self, stage: &mut Stage, id: TweenId) -> bool {
        match self.tweens.remove(&id) {
            Some(active) => {
                stage.clock.unsubscribe(active.tick);
                true
            }
            None => false,
        }
    }

    /// Cancel every tween driving `node`. Returns how many were stopped.
    pub fn cancel_node(&mut self, stage: &mut Stage, node: NodeId) -> usize {
        let ids: Vec<TweenId> = self
            .tweens
            .iter()
            .filter(|(_, a)| a.tween.node == node)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.cancel(stage, *id);
        }
        ids.len()
    }

    /// Sample every active tween at the current clock time.
    /// Returns the tweens that completed on this tick.
    pub fn tick(&mut self, stage: &mut Stage) -> Vec<TweenId> {
        let now = stage.clock.now_ms();
        let mut completed = Vec::new();

        for (&id, active) in self.tweens.iter_mut() {
            let t = active.tween.progress_at(now - active.started_at);
            active.progress = t;
            active.tween.apply(stage, t);
            if let Some(f) = active.tween.on_progress.as_mut() {
                f(t);
            }
            if t >= 1.0 {
                completed.push(id);
            }
        }

        for id in &completed {
            if let Some(mut active) = self.tweens.remove(id) {
                stage.clock.unsubscribe(active.tick);
                active.tween.finish();
            }
        }

        completed
    }

    /// Last sampled progress of an active tween.
    pub fn progress(&self, id: TweenId) -> Option<f32> {
        self.tweens.get(&id).map(|a| a.progress)
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self, stage: &mut Stage) {
        for (_, active) in std::mem::take(&mut self.tweens) {
            stage.clock.unsubscribe(active.tick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use crate::components::node::Node;
    use crate::components::sprite::{SpriteComponent, TextureId};

    fn stage_with_node() -> (Stage, NodeId) {
        let mut stage = Stage::new();
        let id = stage.next_id();
        stage.nodes.spawn(Node::new(id).with_pos(Vec2::new(-5.0, -5.0)));
        (stage, id)
    }

    #[test]
    fn start_snaps_to_from() {
        let (mut stage, id) = stage_with_node();
        let mut tweens = TweenState::new();
        tweens.start(&mut stage, Tween::position(id, Vec2::ZERO, Vec2::new(100.0, 0.0), 1000.0));
        assert_eq!(stage.nodes.get(id).unwrap().pos, Vec2::ZERO);
        assert_eq!(stage.clock.subscriber_count(), 1);
    }

    #[test]
    fn position_is_linear_by_default() {
        let (mut stage, id) = stage_with_node();
        let mut tweens = TweenState::new();
        tweens.start(&mut stage, Tween::position(id, Vec2::ZERO, Vec2::new(100.0, 0.0), 1000.0));

        stage.advance(250.0);
        tweens.tick(&mut stage);
        assert!((stage.nodes.get(id).unwrap().pos.x - 25.0).abs() < 0.01);

        stage.advance(750.0);
        let done = tweens.tick(&mut stage);
        assert_eq!(done.len(), 1);
        assert!((stage.nodes.get(id).unwrap().pos.x - 100.0).abs() < 0.01);
        assert!(tweens.is_empty());
        assert_eq!(stage.clock.subscriber_count(), 0);
    }

    #[test]
    fn progress_is_monotonic_and_reaches_one_only_at_duration() {
        let (mut stage, id) = stage_with_node();
        let mut tweens = TweenState::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        tweens.start(
            &mut stage,
            Tween::position(id, Vec2::ZERO, Vec2::ONE, 100.0)
                .on_progress(move |t| sink.borrow_mut().push(t)),
        );
        for dt in [7.0, 13.0, 0.0, 31.0, 48.0, 1.0, 20.0] {
            stage.advance(dt);
            tweens.tick(&mut stage);
        }
        let seen = seen.borrow();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
        // 99 ms elapsed after five frames
        assert!(seen[4] < 1.0);
        assert_eq!(seen.len(), 6);
        assert_eq!(*seen.last().unwrap(), 1.0);
        assert_eq!(seen.iter().filter(|t| **t == 1.0).count(), 1);
    }

    #[test]
    fn completes_exactly_once() {
        let (mut stage, id) = stage_with_node();
        let mut tweens = TweenState::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let tid = tweens.start(
            &mut stage,
            Tween::position(id, Vec2::ZERO, Vec2::ONE, 50.0).on_complete(move || c.set(c.get() + 1)),
        );
        for _ in 0..5 {
            stage.advance(40.0);
            tweens.tick(&mut stage);
        }
        assert_eq!(count.get(), 1);
        assert!(!tweens.cancel(&mut stage, tid));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cancel_suppresses_callbacks() {
        let (mut stage, id) = stage_with_node();
        let mut tweens = TweenState::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let p = count.clone();
        let tid = tweens.start(
            &mut stage,
            Tween::position(id, Vec2::ZERO, Vec2::ONE, 50.0)
                .on_progress(move |_| p.set(p.get() + 100))
                .on_complete(move || c.set(c.get() + 1)),
        );
        stage.advance(10.0);
        tweens.tick(&mut stage);
        assert_eq!(count.get(), 100);

        assert!(tweens.cancel(&mut stage, tid));
        assert!(!tweens.cancel(&mut stage, tid));
        stage.advance(100.0);
        tweens.tick(&mut stage);
        assert_eq!(count.get(), 100);
        assert_eq!(stage.clock.subscriber_count(), 0);
    }

    #[test]
    fn zero_duration_completes_on_start() {
        let (mut stage, id) = stage_with_node();
        let mut tweens = TweenState::new();
        let done = Rc::new(Cell::new(false));
        let d = done.clone();
        tweens.start(
            &mut stage,
            Tween::position(id, Vec2::ZERO, Vec2::new(3.0, 4.0), 0.0).on_complete(move || d.set(true)),
        );
        assert!(done.get());
        assert_eq!(stage.nodes.get(id).unwrap().pos, Vec2::new(3.0, 4.0));
        assert!(tweens.is_empty());
        assert_eq!(stage.clock.subscriber_count(), 0);
    }

    #[test]
    fn easing_shapes_written_value_not_progress() {
        let (mut stage, id) = stage_with_node();
        let mut tweens = TweenState::new();
        let last = Rc::new(Cell::new(0.0));
        let l = last.clone();
        tweens.start(
            &mut stage,
            Tween::scale_uniform(id, 1.0, 2.0, 100.0)
                .with_easing(Easing::QuadOut)
                .on_progress(move |t| l.set(t)),
        );
        stage.advance(50.0);
        tweens.tick(&mut stage);
        assert_eq!(last.get(), 0.5);
        assert!((stage.nodes.get(id).unwrap().scale.x - 1.75).abs() < 1e-5);
    }

    #[test]
    fn alpha_tween_and_cancel_node() {
        let mut stage = Stage::new();
        let id = stage.next_id();
        stage
            .nodes
            .spawn(Node::new(id).with_sprite(SpriteComponent::new(TextureId(0))));
        let mut tweens = TweenState::new();
        tweens.start(&mut stage, Tween::alpha(id, 0.0, 1.0, 100.0));
        tweens.start(&mut stage, Tween::scale_uniform(id, 1.0, 2.0, 100.0));
        stage.advance(40.0);
        tweens.tick(&mut stage);
        assert!((stage.nodes.get(id).unwrap().alpha() - 0.4).abs() < 1e-5);

        assert_eq!(tweens.cancel_node(&mut stage, id), 2);
        assert!(tweens.is_empty());
        assert_eq!(stage.clock.subscriber_count(), 0);
    }

    #[test]
    fn missing_node_is_ignored() {
        let mut stage = Stage::new();
        let mut tweens = TweenState::new();
        tweens.start(&mut stage, Tween::position(NodeId(99), Vec2::ZERO, Vec2::ONE, 10.0));
        stage.advance(20.0);
        assert_eq!(tweens.tick(&mut stage).len(), 1);
    }
}
