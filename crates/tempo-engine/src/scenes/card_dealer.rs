//! Ace of Shadows: a pile of cards dealt one by one onto a second stack.

use glam::Vec2;

use crate::api::scene::{Scene, Stage};
use crate::api::types::NodeId;
use crate::components::layer::RenderLayer;
use crate::components::node::Node;
use crate::components::sprite::{SpriteComponent, TextureId};
use crate::config::CardDealerConfig;
use crate::core::viewport::{ResizePayload, Viewport};
use crate::input::queue::InputQueue;
use crate::systems::launcher::SequentialLauncher;

pub const ROUTE: &str = "/ace-of-shadows";

pub struct CardDealerScene {
    config: CardDealerConfig,
    container: NodeId,
    cards: Vec<NodeId>,
    launcher: SequentialLauncher,
    destroyed: bool,
}

impl CardDealerScene {
    /// Spawn the deck container and `total_cards` cards piled inside it.
    /// Faces cycle through `faces`; with no faces every card uses texture 0.
    pub fn new(stage: &mut Stage, config: CardDealerConfig, faces: &[TextureId]) -> Self {
        if faces.is_empty() {
            log::warn!("no card faces; dealing blank cards");
        }

        let container = stage.next_id();
        stage.nodes.spawn(
            Node::new(container)
                .with_tag("card-container")
                .with_layer(RenderLayer::Objects),
        );

        let mut cards = Vec::with_capacity(config.total_cards);
        for i in 0..config.total_cards {
            let id = stage.next_id();
            let texture = faces.get(i % faces.len().max(1)).copied().unwrap_or_default();
            stage.nodes.spawn(
                Node::new(id)
                    .with_tag(format!("card-{}", i))
                    .with_parent(container)
                    .with_pos(Vec2::new(0.0, config.pile_offset_y * i as f32))
                    .with_sprite(SpriteComponent::new(texture)),
            );
            cards.push(id);
        }

        let launcher = SequentialLauncher::new(container, cards.clone(), config.launcher);
        log::info!("card dealer ready with {} cards", cards.len());

        Self {
            config,
            container,
            cards,
            launcher,
            destroyed: false,
        }
    }

    pub fn launcher(&self) -> &SequentialLauncher {
        &self.launcher
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Card nodes, bottom of the initial pile first.
    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }
}

impl Scene for CardDealerScene {
    fn name(&self) -> &'static str {
        ROUTE
    }

    fn design(&self) -> Viewport {
        self.config.design
    }

    fn resize(&mut self, stage: &mut Stage, payload: ResizePayload) {
        if self.destroyed {
            return;
        }
        self.launcher.update_layout(stage, payload.viewport());
    }

    fn update(&mut self, stage: &mut Stage, _input: &InputQueue) {
        if self.destroyed {
            return;
        }
        self.launcher.update(stage);
    }

    fn destroy(&mut self, stage: &mut Stage) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.launcher.cancel(stage);
        stage.nodes.despawn_tree(self.container);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SceneEvent;
    use crate::config::LauncherConfig;

    fn small_config(total: usize) -> CardDealerConfig {
        CardDealerConfig {
            total_cards: total,
            launcher: LauncherConfig {
                duration_ms: 100.0,
                launch_interval_ms: 50.0,
                ..LauncherConfig::default()
            },
            ..CardDealerConfig::default()
        }
    }

    fn open(stage: &mut Stage, total: usize, faces: &[TextureId]) -> CardDealerScene {
        let mut scene = CardDealerScene::new(stage, small_config(total), faces);
        let payload = ResizePayload::new(Viewport::new(1200.0, 720.0), scene.design());
        scene.resize(stage, payload);
        scene
    }

    #[test]
    fn cards_pile_up_and_cycle_faces() {
        let mut stage = Stage::new();
        let scene = CardDealerScene::new(
            &mut stage,
            small_config(5),
            &[TextureId(3), TextureId(4)],
        );
        assert_eq!(scene.cards().len(), 5);
        let third = stage.nodes.get(scene.cards()[2]).unwrap();
        assert_eq!(third.pos, Vec2::new(0.0, -3.0));
        assert_eq!(third.parent, Some(scene.container()));
        assert_eq!(third.sprite.unwrap().texture, TextureId(3));
        let second = stage.nodes.get(scene.cards()[1]).unwrap();
        assert_eq!(second.sprite.unwrap().texture, TextureId(4));
    }

    #[test]
    fn blank_faces_fall_back_to_texture_zero() {
        let mut stage = Stage::new();
        let scene = CardDealerScene::new(&mut stage, small_config(2), &[]);
        let card = stage.nodes.get(scene.cards()[1]).unwrap();
        assert_eq!(card.sprite.unwrap().texture, TextureId(0));
    }

    #[test]
    fn deals_every_card_then_goes_quiet() {
        let mut stage = Stage::new();
        let mut scene = open(&mut stage, 3, &[TextureId(1)]);
        let input = InputQueue::new();
        let mut landed = 0;
        for _ in 0..30 {
            stage.events.clear();
            stage.advance(10.0);
            scene.update(&mut stage, &input);
            landed += stage
                .events
                .iter()
                .filter(|e| e.kind == SceneEvent::CARD_LANDED)
                .count();
        }
        assert_eq!(landed, 3);
        assert!(scene.launcher().is_finished());
        assert_eq!(stage.clock.subscriber_count(), 0);
        assert_eq!(stage.timers.active_count(), 0);
    }

    #[test]
    fn destroy_releases_everything() {
        let mut stage = Stage::new();
        let mut scene = open(&mut stage, 4, &[TextureId(1)]);
        stage.advance(60.0);
        scene.update(&mut stage, &InputQueue::new());
        assert!(stage.clock.subscriber_count() > 0);

        scene.destroy(&mut stage);
        scene.destroy(&mut stage);
        assert_eq!(stage.clock.subscriber_count(), 0);
        assert_eq!(stage.timers.active_count(), 0);
        assert!(stage.nodes.is_empty());
    }
}
