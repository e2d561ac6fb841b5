//! Maps routes to scenes and keeps at most one scene alive.

use crate::api::scene::{Scene, Stage};
use crate::assets::manifest::ShowcaseManifest;
use crate::assets::registry::TextureRegistry;
use crate::config::ShowcaseConfig;
use crate::core::viewport::{ResizePayload, Viewport};
use crate::error::ShowcaseError;
use crate::input::queue::InputQueue;

use super::card_dealer::{self, CardDealerScene};
use super::dialogue::{self, DialoguePayload, DialogueScene};
use super::flame::{self, FlameScene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    CardDealer,
    Dialogue,
    Flame,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [SceneKind::CardDealer, SceneKind::Dialogue, SceneKind::Flame];

    /// Leading and trailing slashes are ignored: "magic-words/" matches.
    pub fn from_route(route: &str) -> Option<Self> {
        let slug = route.trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|kind| kind.route().trim_start_matches('/') == slug)
    }

    pub fn parse(route: &str) -> Result<Self, ShowcaseError> {
        Self::from_route(route).ok_or_else(|| ShowcaseError::UnknownRoute(route.to_string()))
    }

    pub fn route(self) -> &'static str {
        match self {
            SceneKind::CardDealer => card_dealer::ROUTE,
            SceneKind::Dialogue => dialogue::ROUTE,
            SceneKind::Flame => flame::ROUTE,
        }
    }
}

/// The scene currently on stage.
pub enum ActiveScene {
    CardDealer(CardDealerScene),
    Dialogue(DialogueScene),
    Flame(FlameScene),
}

impl ActiveScene {
    pub fn kind(&self) -> SceneKind {
        match self {
            ActiveScene::CardDealer(_) => SceneKind::CardDealer,
            ActiveScene::Dialogue(_) => SceneKind::Dialogue,
            ActiveScene::Flame(_) => SceneKind::Flame,
        }
    }

    pub fn as_scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            ActiveScene::CardDealer(s) => s,
            ActiveScene::Dialogue(s) => s,
            ActiveScene::Flame(s) => s,
        }
    }
}

pub struct SceneDirector {
    config: ShowcaseConfig,
    textures: TextureRegistry,
    dialogue_payload: DialoguePayload,
    viewport: Option<Viewport>,
    active: Option<ActiveScene>,
}

impl SceneDirector {
    pub fn new(config: ShowcaseConfig, textures: TextureRegistry) -> Self {
        Self {
            config,
            textures,
            dialogue_payload: DialoguePayload::default(),
            viewport: None,
            active: None,
        }
    }

    /// Takes effect for the next scene opened.
    pub fn set_config(&mut self, config: ShowcaseConfig) {
        self.config = config;
    }

    /// Takes effect for the next scene opened.
    pub fn set_textures(&mut self, textures: TextureRegistry) {
        self.textures = textures;
    }

    /// Fail if the menu links to a route no scene serves.
    pub fn validate_routes(manifest: &ShowcaseManifest) -> Result<(), ShowcaseError> {
        let missing: Vec<String> = manifest
            .routes()
            .filter(|route| SceneKind::from_route(route).is_none())
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ShowcaseError::MissingScene(missing))
        }
    }

    /// Tear down the current scene, then open the one serving `route`.
    /// An unknown route leaves the menu showing and returns None.
    pub fn open(&mut self, stage: &mut Stage, route: &str) -> Option<SceneKind> {
        self.close(stage);
        let kind = match SceneKind::parse(route) {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("{}; showing menu", e);
                return None;
            }
        };

        let mut active = match kind {
            SceneKind::CardDealer => ActiveScene::CardDealer(CardDealerScene::new(
                stage,
                self.config.card_dealer.clone(),
                self.textures.card_faces(),
            )),
            SceneKind::Dialogue => ActiveScene::Dialogue(DialogueScene::new(
                stage,
                self.config.dialogue.clone(),
                self.dialogue_payload.clone(),
                &self.textures,
            )),
            SceneKind::Flame => ActiveScene::Flame(FlameScene::new(
                stage,
                self.config.flame.clone(),
                &self.textures,
            )),
        };

        if let Some(viewport) = self.viewport {
            let scene = active.as_scene_mut();
            let payload = ResizePayload::new(viewport, scene.design());
            scene.resize(stage, payload);
        }
        log::info!("opened scene {}", kind.route());
        self.active = Some(active);
        Some(kind)
    }

    /// Tear down the current scene, if any.
    pub fn close(&mut self, stage: &mut Stage) {
        if let Some(mut active) = self.active.take() {
            let scene = active.as_scene_mut();
            scene.destroy(stage);
            log::info!("closed scene {}", scene.name());
        }
    }

    /// Remember the viewport and forward it to the current scene.
    pub fn resize(&mut self, stage: &mut Stage, viewport: Viewport) {
        if viewport.is_degenerate() {
            log::warn!("ignoring degenerate viewport {}x{}", viewport.width, viewport.height);
            return;
        }
        self.viewport = Some(viewport);
        if let Some(active) = self.active.as_mut() {
            let scene = active.as_scene_mut();
            let payload = ResizePayload::new(viewport, scene.design());
            scene.resize(stage, payload);
        }
    }

    pub fn update(&mut self, stage: &mut Stage, input: &InputQueue) {
        if let Some(active) = self.active.as_mut() {
            active.as_scene_mut().update(stage, input);
        }
    }

    /// Dialogue used by the next dialogue scene, and by the current one if open.
    pub fn set_dialogue_payload(&mut self, stage: &mut Stage, payload: DialoguePayload) {
        if let Some(ActiveScene::Dialogue(scene)) = self.active.as_mut() {
            scene.set_payload(stage, payload.clone());
        }
        self.dialogue_payload = payload;
    }

    pub fn current_kind(&self) -> Option<SceneKind> {
        self.active.as_ref().map(ActiveScene::kind)
    }

    pub fn active(&self) -> Option<&ActiveScene> {
        self.active.as_ref()
    }

    pub fn dialogue(&self) -> Option<&DialogueScene> {
        match self.active.as_ref() {
            Some(ActiveScene::Dialogue(scene)) => Some(scene),
            _ => None,
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }
}
