//! Magic Words: a scripted chat between avatars, stepped by hand or on autoplay.
//!
//! The scene owns the avatar and bubble nodes and the timing. Text layout and
//! audio belong to the host, which reads the current line through
//! [`DialogueScene::current_line`] whenever a `DIALOGUE_PROGRESS` event arrives.

pub mod autoplay;
pub mod flow;
pub mod layout;
pub mod payload;
pub mod segments;

pub use autoplay::AutoPlay;
pub use flow::{DialogueFlow, Progress, ShownLine};
pub use layout::{avatar_size, bubble_offset, layout_slots, SlotLayout};
pub use payload::{DialogueLine, DialoguePayload, NamedAsset};
pub use segments::{tokenize, Segment};

use glam::Vec2;

use crate::api::scene::{Scene, Stage};
use crate::api::types::{NodeId, SceneEvent};
use crate::assets::registry::TextureRegistry;
use crate::components::layer::RenderLayer;
use crate::components::node::Node;
use crate::components::sprite::SpriteComponent;
use crate::config::{DialogueConfig, Side};
use crate::core::viewport::{ResizePayload, Viewport};
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Tween, TweenState};
use crate::input::queue::{commands, InputQueue};

pub const ROUTE: &str = "/magic-words";

/// Texture name of the speech bubble.
pub const BUBBLE_TEXTURE: &str = "bubble";

/// One speaker: avatar node plus its bubble.
#[derive(Debug, Clone)]
struct Slot {
    name: String,
    side: Side,
    avatar: NodeId,
    bubble: NodeId,
    base_scale: f32,
}

pub struct DialogueScene {
    config: DialogueConfig,
    slots: Vec<Slot>,
    flow: DialogueFlow,
    autoplay: AutoPlay,
    tweens: TweenState,
    active_speaker: Option<String>,
    current: Option<ShownLine>,
    audio_available: bool,
    destroyed: bool,
}

impl DialogueScene {
    /// Spawn one avatar per configured slot. Avatar textures are looked up by
    /// speaker name, the bubble by [`BUBBLE_TEXTURE`].
    pub fn new(
        stage: &mut Stage,
        config: DialogueConfig,
        payload: DialoguePayload,
        textures: &TextureRegistry,
    ) -> Self {
        let bubble_texture = textures.get(BUBBLE_TEXTURE).unwrap_or_default();
        let mut slots = Vec::with_capacity(config.slots.len());
        for slot in &config.slots {
            let avatar = stage.next_id();
            let texture = textures.get(&slot.name).unwrap_or_else(|| {
                log::warn!("no avatar texture for {:?}", slot.name);
                Default::default()
            });
            stage.nodes.spawn(
                Node::new(avatar)
                    .with_tag(format!("avatar-{}", slot.name))
                    .with_layer(RenderLayer::Objects)
                    .with_sprite(SpriteComponent::new(texture)),
            );

            let bubble = stage.next_id();
            let mut bubble_node = Node::new(bubble)
                .with_tag(format!("bubble-{}", slot.name))
                .with_parent(avatar)
                .with_pos(bubble_offset(slot.side, &config))
                .with_layer(RenderLayer::Ui)
                .with_sprite(SpriteComponent::new(bubble_texture));
            bubble_node.visible = false;
            stage.nodes.spawn(bubble_node);

            slots.push(Slot {
                name: slot.name.clone(),
                side: slot.side,
                avatar,
                bubble,
                base_scale: 1.0,
            });
        }

        let speakers = slots.iter().map(|s| s.name.clone()).collect();
        let flow = DialogueFlow::new(
            payload,
            speakers,
            config.fallback_speaker.clone(),
            config.fallback_emoji.clone(),
        );
        let autoplay = AutoPlay::new(config.autoplay_interval_ms, config.audio_safety_timeout_ms);
        log::info!("dialogue scene ready with {} lines", flow.len());

        Self {
            config,
            slots,
            flow,
            autoplay,
            tweens: TweenState::new(),
            active_speaker: None,
            current: None,
            audio_available: false,
            destroyed: false,
        }
    }

    /// Replace the dialogue. Stops autoplay and clears the bubbles.
    pub fn set_payload(&mut self, stage: &mut Stage, payload: DialoguePayload) {
        self.stop_autoplay(stage);
        self.hide_bubbles(stage);
        self.current = None;
        self.active_speaker = None;
        self.flow.set_payload(payload);
        self.apply_focus(stage, false);
    }

    /// Show the next line by hand. While autoplaying this restarts the wait.
    pub fn next(&mut self, stage: &mut Stage) {
        if self.destroyed {
            return;
        }
        if self.autoplay.is_playing() {
            self.play_and_await(stage);
        } else {
            self.show_next(stage, 0);
        }
    }

    pub fn toggle_autoplay(&mut self, stage: &mut Stage) {
        if self.destroyed {
            return;
        }
        if self.autoplay.is_playing() {
            self.stop_autoplay(stage);
            return;
        }
        if !self.flow.has_lines() {
            return;
        }
        if self.autoplay.start() {
            self.flow.reset_index();
        }
        log::debug!("autoplay on");
        stage.emit_event(SceneEvent::new(SceneEvent::AUTOPLAY_CHANGED, 1.0, 0.0, 0.0));
        self.play_and_await(stage);
    }

    /// The host finished playing the audio of a line shown in `cycle_id`.
    pub fn playback_complete(&mut self, stage: &mut Stage, cycle_id: u32) {
        if self.autoplay.accepts(cycle_id) {
            self.play_and_await(stage);
        }
    }

    /// Whether the host plays line audio. Lengthens the autoplay wait.
    pub fn set_audio_available(&mut self, available: bool) {
        self.audio_available = available;
    }

    pub fn current_line(&self) -> Option<&ShownLine> {
        self.current.as_ref()
    }

    pub fn flow(&self) -> &DialogueFlow {
        &self.flow
    }

    pub fn autoplay(&self) -> &AutoPlay {
        &self.autoplay
    }

    pub fn active_speaker(&self) -> Option<&str> {
        self.active_speaker.as_deref()
    }

    pub fn avatar_of(&self, name: &str) -> Option<NodeId> {
        self.slot(name).map(|s| s.avatar)
    }

    pub fn bubble_of(&self, name: &str) -> Option<NodeId> {
        self.slot(name).map(|s| s.bubble)
    }

    pub fn base_scale_of(&self, name: &str) -> Option<f32> {
        self.slot(name).map(|s| s.base_scale)
    }

    fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    fn stop_autoplay(&mut self, stage: &mut Stage) {
        if !self.autoplay.is_playing() {
            return;
        }
        self.autoplay.stop(&mut stage.timers);
        log::debug!("autoplay off");
        stage.emit_event(SceneEvent::new(SceneEvent::AUTOPLAY_CHANGED, 0.0, 0.0, 0.0));
    }

    fn play_and_await(&mut self, stage: &mut Stage) {
        let cycle = self.autoplay.begin_cycle(&mut stage.timers);
        self.show_next(stage, cycle);
        self.autoplay.arm(&mut stage.timers, self.audio_available);
    }

    fn show_next(&mut self, stage: &mut Stage, cycle: u32) {
        let Some(shown) = self.flow.show_next() else {
            return;
        };
        self.hide_bubbles(stage);

        stage.emit_event(SceneEvent::new(
            SceneEvent::DIALOGUE_PROGRESS,
            shown.progress.index as f32,
            shown.progress.total as f32,
            cycle as f32,
        ));

        self.active_speaker = Some(shown.speaker.clone());
        self.apply_focus(stage, true);

        if let Some(bubble) = self.slot(&shown.speaker).map(|s| s.bubble) {
            if let Some(node) = stage.nodes.get_mut(bubble) {
                node.visible = true;
            }
            self.tweens.start(
                stage,
                Tween::scale_uniform(bubble, self.config.bubble_pop_from, 1.0, self.config.bubble_pop_ms)
                    .with_easing(Easing::QuadOut),
            );
        }
        self.current = Some(shown);
    }

    fn hide_bubbles(&mut self, stage: &mut Stage) {
        for slot in &self.slots {
            self.tweens.cancel_node(stage, slot.bubble);
            if let Some(node) = stage.nodes.get_mut(slot.bubble) {
                node.visible = false;
                node.scale = Vec2::ONE;
            }
        }
    }

    /// Scale the active speaker up and everyone else back to base.
    fn apply_focus(&mut self, stage: &mut Stage, animate: bool) {
        for slot in &self.slots {
            let focused = self.active_speaker.as_deref() == Some(slot.name.as_str());
            let target = slot.base_scale * if focused { self.config.focus_scale } else { 1.0 };
            self.tweens.cancel_node(stage, slot.avatar);

            if !animate {
                if let Some(node) = stage.nodes.get_mut(slot.avatar) {
                    node.scale = Vec2::splat(target);
                }
                continue;
            }
            let from = stage.nodes.get(slot.avatar).map_or(target, |n| n.scale.x);
            self.tweens.start(
                stage,
                Tween::scale_uniform(slot.avatar, from, target, self.config.focus_duration_ms)
                    .with_easing(Easing::QuadOut),
            );
        }
    }
}

impl Scene for DialogueScene {
    fn name(&self) -> &'static str {
        ROUTE
    }

    fn design(&self) -> Viewport {
        self.config.design
    }

    fn resize(&mut self, stage: &mut Stage, payload: ResizePayload) {
        let viewport = payload.viewport();
        if self.destroyed || viewport.is_degenerate() {
            return;
        }
        for layout in layout_slots(viewport, &self.config) {
            let Some(slot) = self.slots.iter_mut().find(|s| s.name == layout.name) else {
                continue;
            };
            slot.base_scale = layout.base_scale;
            if let Some(node) = stage.nodes.get_mut(slot.avatar) {
                node.pos = layout.pos;
            }
            if let Some(node) = stage.nodes.get_mut(slot.bubble) {
                node.pos = bubble_offset(slot.side, &self.config);
            }
        }
        self.apply_focus(stage, false);
    }

    fn update(&mut self, stage: &mut Stage, input: &InputQueue) {
        if self.destroyed {
            return;
        }
        for a in input.commands(commands::AUDIO_AVAILABLE) {
            self.audio_available = a != 0.0;
        }
        for _ in input.commands(commands::AUTOPLAY_TOGGLE) {
            self.toggle_autoplay(stage);
        }
        for _ in input.commands(commands::DIALOGUE_NEXT) {
            self.next(stage);
        }
        for cycle in input.commands(commands::PLAYBACK_COMPLETE) {
            self.playback_complete(stage, cycle as u32);
        }
        if self.autoplay.poll_timeout(&mut stage.timers) {
            self.play_and_await(stage);
        }
        self.tweens.tick(stage);
    }

    fn destroy(&mut self, stage: &mut Stage) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.autoplay.stop(&mut stage.timers);
        self.tweens.clear(stage);
        for slot in &self.slots {
            stage.nodes.despawn_tree(slot.avatar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::{ShowcaseManifest, TextureDescriptor};
    use crate::input::queue::InputEvent;

    fn registry() -> TextureRegistry {
        let manifest = ShowcaseManifest {
            textures: ["bubble", "Sheldon", "Penny", "Leonard"]
                .iter()
                .map(|n| TextureDescriptor {
                    name: n.to_string(),
                    path: format!("{n}.png"),
                    width: 0.0,
                    height: 0.0,
                })
                .collect(),
            ..ShowcaseManifest::default()
        };
        TextureRegistry::from_manifest(&manifest)
    }

    fn payload() -> DialoguePayload {
        let line = |name: &str, text: &str| DialogueLine { name: name.into(), text: text.into() };
        DialoguePayload {
            avatars: Vec::new(),
            emojis: Vec::new(),
            dialogue: vec![
                line("Sheldon", "one {smile}"),
                line("Penny", "two"),
                line("Stranger", "three"),
            ],
        }
    }

    fn open() -> (Stage, DialogueScene) {
        let mut stage = Stage::new();
        let mut scene = DialogueScene::new(&mut stage, DialogueConfig::default(), payload(), &registry());
        let payload = ResizePayload::new(Viewport::new(1280.0, 720.0), scene.design());
        scene.resize(&mut stage, payload);
        (stage, scene)
    }

    fn frame(stage: &mut Stage, scene: &mut DialogueScene, dt: f32, events: &[InputEvent]) {
        stage.events.clear();
        stage.advance(dt);
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        scene.update(stage, &input);
    }

    fn progress_events(stage: &Stage) -> Vec<(f32, f32)> {
        stage
            .events
            .iter()
            .filter(|e| e.kind == SceneEvent::DIALOGUE_PROGRESS)
            .map(|e| (e.a, e.c))
            .collect()
    }

    #[test]
    fn resize_places_avatars_at_base_scale() {
        let (stage, scene) = open();
        let sheldon = stage.nodes.get(scene.avatar_of("Sheldon").unwrap()).unwrap();
        assert!(sheldon.pos.abs_diff_eq(Vec2::new(192.0, 360.0), 1e-3));
        // 720 * 0.2 / 64
        assert!((sheldon.scale.x - 2.25).abs() < 1e-5);
        let bubble = stage.nodes.get(scene.bubble_of("Penny").unwrap()).unwrap();
        assert!(!bubble.visible);
        assert_eq!(bubble.pos, Vec2::new(-75.0, -60.0));
    }

    #[test]
    fn next_shows_line_focuses_speaker_and_pops_bubble() {
        let (mut stage, mut scene) = open();
        frame(&mut stage, &mut scene, 16.0, &[InputEvent::dialogue_next()]);
        assert_eq!(progress_events(&stage), vec![(0.0, 0.0)]);
        assert_eq!(scene.active_speaker(), Some("Sheldon"));
        let line = scene.current_line().unwrap();
        assert_eq!(line.segments.len(), 2);

        let bubble = scene.bubble_of("Sheldon").unwrap();
        assert!(stage.nodes.get(bubble).unwrap().visible);

        for _ in 0..30 {
            frame(&mut stage, &mut scene, 16.0, &[]);
        }
        let avatar = stage.nodes.get(scene.avatar_of("Sheldon").unwrap()).unwrap();
        assert!((avatar.scale.x - 2.25 * 1.1).abs() < 1e-4);
        assert!(stage.nodes.get(bubble).unwrap().scale.abs_diff_eq(Vec2::ONE, 1e-5));
        let penny = stage.nodes.get(scene.avatar_of("Penny").unwrap()).unwrap();
        assert!((penny.scale.x - 2.25).abs() < 1e-4);
        assert_eq!(stage.clock.subscriber_count(), 0);
    }

    #[test]
    fn unknown_speaker_uses_fallback_slot() {
        let (mut stage, mut scene) = open();
        for _ in 0..3 {
            scene.next(&mut stage);
        }
        assert_eq!(scene.active_speaker(), Some("Leonard"));
        let leonard_bubble = scene.bubble_of("Leonard").unwrap();
        assert!(stage.nodes.get(leonard_bubble).unwrap().visible);
        let penny_bubble = scene.bubble_of("Penny").unwrap();
        assert!(!stage.nodes.get(penny_bubble).unwrap().visible);
    }

    #[test]
    fn autoplay_starts_from_first_line_and_steps_on_interval() {
        let (mut stage, mut scene) = open();
        scene.next(&mut stage);
        scene.next(&mut stage);

        frame(&mut stage, &mut scene, 16.0, &[InputEvent::autoplay_toggle()]);
        assert!(scene.autoplay().is_playing());
        let first = progress_events(&stage);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].0, 0.0);
        assert!(first[0].1 > 0.0);

        let mut shown = Vec::new();
        for _ in 0..200 {
            frame(&mut stage, &mut scene, 16.0, &[]);
            shown.extend(progress_events(&stage));
        }
        // 3200 ms: exactly one more step at 3000 ms
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, 1.0);
    }

    #[test]
    fn stale_playback_complete_is_ignored() {
        let (mut stage, mut scene) = open();
        scene.set_audio_available(true);
        scene.toggle_autoplay(&mut stage);
        let stale = scene.autoplay().cycle_id();

        scene.toggle_autoplay(&mut stage);
        scene.toggle_autoplay(&mut stage);
        let index = scene.flow().index();

        frame(&mut stage, &mut scene, 16.0, &[InputEvent::playback_complete(stale)]);
        assert_eq!(scene.flow().index(), index);

        let current = scene.autoplay().cycle_id();
        frame(&mut stage, &mut scene, 16.0, &[InputEvent::playback_complete(current)]);
        assert_eq!(progress_events(&stage).len(), 1);
    }

    #[test]
    fn audio_waits_for_safety_timeout() {
        let (mut stage, mut scene) = open();
        frame(
            &mut stage,
            &mut scene,
            16.0,
            &[InputEvent::audio_available(true), InputEvent::autoplay_toggle()],
        );
        stage.events.clear();
        stage.advance(14_000.0);
        scene.update(&mut stage, &InputQueue::new());
        assert!(progress_events(&stage).is_empty());
        stage.advance(1_000.0);
        scene.update(&mut stage, &InputQueue::new());
        assert_eq!(progress_events(&stage).len(), 1);
    }

    #[test]
    fn manual_next_while_autoplaying_restarts_the_wait() {
        let (mut stage, mut scene) = open();
        scene.toggle_autoplay(&mut stage);
        stage.advance(2_000.0);
        scene.update(&mut stage, &InputQueue::new());
        scene.next(&mut stage);

        stage.events.clear();
        stage.advance(2_000.0);
        scene.update(&mut stage, &InputQueue::new());
        assert!(progress_events(&stage).is_empty());
        stage.advance(1_000.0);
        scene.update(&mut stage, &InputQueue::new());
        assert_eq!(progress_events(&stage).len(), 1);
    }

    #[test]
    fn toggle_without_lines_does_nothing() {
        let mut stage = Stage::new();
        let mut scene = DialogueScene::new(
            &mut stage,
            DialogueConfig::default(),
            DialoguePayload::default(),
            &registry(),
        );
        scene.toggle_autoplay(&mut stage);
        assert!(!scene.autoplay().is_playing());
        assert!(stage.events.is_empty());
    }

    #[test]
    fn destroy_stops_everything() {
        let (mut stage, mut scene) = open();
        scene.toggle_autoplay(&mut stage);
        assert!(stage.timers.active_count() > 0);
        assert!(stage.clock.subscriber_count() > 0);

        scene.destroy(&mut stage);
        scene.destroy(&mut stage);
        assert_eq!(stage.timers.active_count(), 0);
        assert_eq!(stage.clock.subscriber_count(), 0);
        assert!(stage.nodes.is_empty());
    }
}
