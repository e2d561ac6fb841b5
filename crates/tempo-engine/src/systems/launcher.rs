//! Sequential launcher: deals a fixed set of nodes one at a time from a pile
//! into a landing column, stacking each one a fixed offset from the last.
//!
//! Nodes move in the local space of a shared container. A viewport change
//! re-derives the container placement and the local travel distance; landed
//! nodes snap to the new column while flights keep their launch basis and
//! simply aim at the new column from the next frame on.

use std::collections::VecDeque;
use std::f32::consts::PI;
use glam::Vec2;
use crate::api::scene::Stage;
use crate::api::types::{NodeId, SceneEvent};
use crate::config::{LaunchOrder, LauncherConfig};
use crate::core::clock::TickHandle;
use crate::core::timer::TimerId;
use crate::core::viewport::{responsive_scale, Viewport};
use crate::extensions::transform::{ContainerSpace, LocalPoint, ScreenPoint};

/// Where a node is in its journey. Every node is in exactly one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    Pending,
    InFlight,
    Landed,
}

/// One node's journey from the pile to its slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub node: NodeId,
    /// Local position at launch, in the basis current at launch time.
    pub from: LocalPoint,
    pub target_y: f32,
    pub started_at: f64,
    pub duration_ms: f32,
}

impl Flight {
    /// Linear progress in [0, 1] at `now`.
    pub fn raw_progress(&self, now: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (((now - self.started_at) / self.duration_ms as f64) as f32).clamp(0.0, 1.0)
    }
}

pub struct SequentialLauncher {
    container: NodeId,
    total: usize,
    config: LauncherConfig,
    pending: VecDeque<NodeId>,
    flights: Vec<Flight>,
    landed: Vec<(NodeId, f32)>,
    launched_count: usize,
    space: ContainerSpace,
    travel_x: f32,
    center_y: f32,
    started: bool,
    cancelled: bool,
    interval: Option<TimerId>,
    tick: Option<TickHandle>,
}

impl SequentialLauncher {
    /// `objects` are children of `container`, bottom of the pile first.
    pub fn new(container: NodeId, objects: Vec<NodeId>, config: LauncherConfig) -> Self {
        let total = objects.len();
        let pending: VecDeque<NodeId> = match config.launch_order {
            LaunchOrder::TopFirst => objects.into_iter().rev().collect(),
            LaunchOrder::BottomFirst => objects.into_iter().collect(),
        };
        Self {
            container,
            total,
            config,
            pending,
            flights: Vec::new(),
            landed: Vec::new(),
            launched_count: 0,
            space: ContainerSpace::default(),
            travel_x: 0.0,
            center_y: 0.0,
            started: false,
            cancelled: false,
            interval: None,
            tick: None,
        }
    }

    /// Re-derive the layout for a new viewport.
    ///
    /// The first accepted call also launches the first node and arms the
    /// launch interval. Degenerate viewports are ignored.
    pub fn update_layout(&mut self, stage: &mut Stage, viewport: Viewport) {
        if self.cancelled {
            return;
        }
        if viewport.is_degenerate() {
            log::warn!(
                "launcher ignoring degenerate viewport {}x{}",
                viewport.width,
                viewport.height
            );
            return;
        }

        let scale = responsive_scale(self.config.scale, viewport, self.config.breakpoint);
        let start = viewport.at_ratio(self.config.start_x_ratio, self.config.center_y_ratio);
        let end_x = viewport.width * self.config.end_x_ratio;
        self.center_y = start.y;
        self.space = ContainerSpace::new(ScreenPoint(start), scale);
        self.travel_x = self.space.to_local(ScreenPoint::new(end_x, start.y)).0.x;

        if let Some(container) = stage.nodes.get_mut(self.container) {
            self.space.apply_to(container);
        }
        for &(node, target_y) in &self.landed {
            if let Some(n) = stage.nodes.get_mut(node) {
                n.pos = Vec2::new(self.travel_x, target_y);
            }
        }

        if !self.started {
            self.started = true;
            log::info!("launcher started with {} objects", self.total);
            let now = stage.now_ms();
            self.launch_next(stage, now);
            self.interval = Some(stage.timers.set_interval(self.config.launch_interval_ms));
        }
    }

    /// Per-frame work: launch for every interval firing since the last frame,
    /// then advance the flights. Call after the stage has advanced.
    pub fn update(&mut self, stage: &mut Stage) {
        if self.cancelled {
            return;
        }
        if let Some(interval) = self.interval {
            for fired_at in stage.timers.take_firings(interval) {
                self.launch_next(stage, fired_at);
            }
        }
        if self.tick.is_some() {
            let now = stage.now_ms();
            self.update_flights(stage, now);
        }
    }

    /// Stop launching and stop ticking. Nodes stay where they are.
    /// Safe to call repeatedly.
    pub fn cancel(&mut self, stage: &mut Stage) {
        if let Some(interval) = self.interval.take() {
            stage.timers.clear(interval);
        }
        if let Some(tick) = self.tick.take() {
            stage.clock.unsubscribe(tick);
        }
        if !self.cancelled {
            self.cancelled = true;
            log::info!(
                "launcher cancelled: {} pending, {} in flight, {} landed",
                self.pending.len(),
                self.flights.len(),
                self.landed.len()
            );
        }
    }

    fn launch_next(&mut self, stage: &mut Stage, at: f64) {
        let Some(node) = self.pending.pop_front() else {
            if let Some(interval) = self.interval.take() {
                stage.timers.clear(interval);
                log::info!("launcher queue drained, interval cleared");
            }
            return;
        };

        stage.nodes.bring_to_front(node);
        let from = stage
            .nodes
            .get(node)
            .map(|n| LocalPoint(n.pos))
            .unwrap_or_default();
        let target_y = self.config.landed_stack_offset_y * self.launched_count as f32;
        self.launched_count += 1;
        self.flights.push(Flight {
            node,
            from,
            target_y,
            started_at: at,
            duration_ms: self.config.duration_ms,
        });
        log::debug!("launched {:?} at {:.0} ms toward y={}", node, at, target_y);

        if self.tick.is_none() {
            self.tick = Some(stage.clock.subscribe());
        }
    }

    fn update_flights(&mut self, stage: &mut Stage, now: f64) {
        let travel_x = self.travel_x;
        let arc_lift_y = self.config.arc_lift_y;
        let easing = self.config.easing;
        let mut landed_now = Vec::new();

        self.flights.retain(|flight| {
            let t_raw = flight.raw_progress(now);
            let done = t_raw >= 1.0;
            if let Some(node) = stage.nodes.get_mut(flight.node) {
                node.pos = if done {
                    Vec2::new(travel_x, flight.target_y)
                } else {
                    let t = easing.ease(t_raw);
                    let from = flight.from.0;
                    Vec2::new(
                        from.x + (travel_x - from.x) * t,
                        from.y + (flight.target_y - from.y) * t - (PI * t_raw).sin() * arc_lift_y,
                    )
                };
            }
            if done {
                landed_now.push((flight.node, flight.target_y));
            }
            !done
        });

        for landed in landed_now {
            self.landed.push(landed);
            stage.emit_event(SceneEvent::new(
                SceneEvent::CARD_LANDED,
                self.landed.len() as f32,
                self.total as f32,
                0.0,
            ));
        }

        if self.flights.is_empty() {
            if let Some(tick) = self.tick.take() {
                stage.clock.unsubscribe(tick);
            }
        }
    }

    // -- Queries --

    pub fn state_of(&self, node: NodeId) -> Option<FlightState> {
        if self.flights.iter().any(|f| f.node == node) {
            Some(FlightState::InFlight)
        } else if self.landed.iter().any(|(n, _)| *n == node) {
            Some(FlightState::Landed)
        } else if self.pending.contains(&node) {
            Some(FlightState::Pending)
        } else {
            None
        }
    }

    /// Recorded resting Y of a landed node.
    pub fn landed_y(&self, node: NodeId) -> Option<f32> {
        self.landed.iter().find(|(n, _)| *n == node).map(|(_, y)| *y)
    }

    pub fn flight(&self, node: NodeId) -> Option<&Flight> {
        self.flights.iter().find(|f| f.node == node)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn in_flight_len(&self) -> usize {
        self.flights.len()
    }

    pub fn landed_len(&self) -> usize {
        self.landed.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn launched_count(&self) -> usize {
        self.launched_count
    }

    /// Local X of the landing column.
    pub fn travel_x(&self) -> f32 {
        self.travel_x
    }

    /// Screen Y of the container origin.
    pub fn center_y(&self) -> f32 {
        self.center_y
    }

    pub fn space(&self) -> ContainerSpace {
        self.space
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ticking(&self) -> bool {
        self.tick.is_some()
    }

    pub fn has_interval(&self) -> bool {
        self.interval.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.landed.len() == self.total
    }
}
