use serde_json::{json, Value};
use tempo_engine::scenes::dialogue::{DialoguePayload, Segment};
use tempo_engine::{
    build_render_buffer, FpsMeter, InputEvent, InputQueue, RenderBuffer, SceneDirector,
    SceneEvent, SceneKind, ShowcaseConfig, ShowcaseError, ShowcaseManifest, Stage,
    TextureRegistry, Viewport,
};

/// Owns the stage and the scene director and runs one frame per `tick`.
///
/// The generated wasm exports keep a single runner in a `thread_local!` and
/// forward to it, because wasm-bindgen cannot export a struct with borrowed state.
pub struct ShowcaseRunner {
    stage: Stage,
    director: SceneDirector,
    input: InputQueue,
    render_buffer: RenderBuffer,
    fps: FpsMeter,
    manifest: ShowcaseManifest,
}

impl ShowcaseRunner {
    pub fn new() -> Self {
        Self {
            stage: Stage::new(),
            director: SceneDirector::new(ShowcaseConfig::default(), TextureRegistry::new()),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            fps: FpsMeter::new(FpsMeter::DEFAULT_WINDOW_MS),
            manifest: ShowcaseManifest::default(),
        }
    }

    /// Replace the scene tunables. Applies from the next opened scene.
    pub fn load_config(&mut self, json: &str) -> Result<(), ShowcaseError> {
        let config = ShowcaseConfig::from_json(json).map_err(|e| {
            log::warn!("config rejected: {}", e);
            e
        })?;
        self.director.set_config(config);
        Ok(())
    }

    /// Load the menu and texture list. Every menu route must have a scene.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), ShowcaseError> {
        let manifest = ShowcaseManifest::from_json(json)?;
        SceneDirector::validate_routes(&manifest)?;
        self.director.set_textures(TextureRegistry::from_manifest(&manifest));
        log::info!(
            "manifest loaded: {} games, {} textures",
            manifest.games.len(),
            manifest.textures.len()
        );
        self.manifest = manifest;
        Ok(())
    }

    pub fn load_dialogue(&mut self, json: &str) -> Result<(), ShowcaseError> {
        let payload = DialoguePayload::from_json(json)?;
        log::info!("dialogue loaded: {} lines", payload.dialogue.len());
        self.director.set_dialogue_payload(&mut self.stage, payload);
        Ok(())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.director.resize(&mut self.stage, Viewport::new(width, height));
    }

    /// Open the scene for `route`. Returns false and shows the menu for unknown routes.
    pub fn open(&mut self, route: &str) -> bool {
        self.director.open(&mut self.stage, route).is_some()
    }

    pub fn close(&mut self) {
        self.director.close(&mut self.stage);
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: advance time, update the scene, rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        // Drop the events the host read last frame; keep ones emitted since
        self.stage.clear_frame_data();

        self.stage.advance(dt);
        self.director.update(&mut self.stage, &self.input);

        // Drain input after update
        self.input.clear();

        build_render_buffer(&self.stage.nodes, &mut self.render_buffer);
        self.stage.mark_events_delivered();
        self.fps.record(dt);
    }

    // ---- Pointer accessors for host reads out of wasm memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn additive_split(&self) -> u32 {
        self.render_buffer.additive_split
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.stage.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.stage.events.len() as u32
    }

    pub fn event_floats(&self) -> u32 {
        SceneEvent::FLOATS as u32
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    /// Route of the open scene, or "" while the menu shows.
    pub fn current_route(&self) -> &'static str {
        self.director.current_kind().map_or("", SceneKind::route)
    }

    /// Menu entries as JSON, for the host's menu.
    pub fn games_json(&self) -> String {
        serde_json::to_string(&self.manifest.games).unwrap_or_else(|_| "[]".to_string())
    }

    /// The line on screen as JSON, or "null".
    ///
    /// `{ speaker, name, text, segments: [{ text } | { emoji, url }] }`
    pub fn current_line_json(&self) -> String {
        let Some(scene) = self.director.dialogue() else {
            return "null".to_string();
        };
        let Some(line) = scene.current_line() else {
            return "null".to_string();
        };
        let segments: Vec<Value> = line
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => json!({ "text": text }),
                Segment::Emoji { name } => json!({
                    "emoji": name,
                    "url": scene.flow().emoji_url(name),
                }),
            })
            .collect();
        json!({
            "speaker": line.speaker,
            "name": line.line.name,
            "text": line.line.text,
            "index": line.progress.index,
            "total": line.progress.total,
            "segments": segments,
        })
        .to_string()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn director(&self) -> &SceneDirector {
        &self.director
    }
}

impl Default for ShowcaseRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "games": [
            { "title": "Ace of Shadows", "url": "/ace-of-shadows" },
            { "title": "Magic Words", "url": "/magic-words" },
            { "title": "Phoenix Flame", "url": "/phoenix-flame" }
        ],
        "textures": [
            { "name": "flame", "path": "flame.png" },
            { "name": "bubble", "path": "bubble.png" },
            { "name": "card", "path": "card.png" }
        ],
        "cards": ["card"]
    }"#;

    #[test]
    fn flame_frame_fills_additive_buffer() {
        let mut runner = ShowcaseRunner::new();
        runner.load_manifest(MANIFEST).unwrap();
        runner.resize(1280.0, 720.0);
        assert!(runner.open("/phoenix-flame"));
        runner.tick(16.0);

        assert_eq!(runner.instance_count(), 10);
        assert_eq!(runner.additive_split(), 0);
        assert_eq!(runner.current_route(), "/phoenix-flame");
    }

    #[test]
    fn manifest_with_unknown_route_is_rejected() {
        let mut runner = ShowcaseRunner::new();
        let err = runner
            .load_manifest(r#"{ "games": [{ "title": "X", "url": "/x" }] }"#)
            .unwrap_err();
        assert!(matches!(err, ShowcaseError::MissingScene(_)));
    }

    #[test]
    fn dialogue_line_is_exposed_as_json() {
        let mut runner = ShowcaseRunner::new();
        runner.load_manifest(MANIFEST).unwrap();
        runner
            .load_dialogue(
                r#"{
                    "emojies": [{ "name": "smile", "url": "s.png" }],
                    "dialogue": [{ "name": "Penny", "text": "hey {smile}" }]
                }"#,
            )
            .unwrap();
        runner.resize(1280.0, 720.0);
        runner.open("/magic-words");
        assert_eq!(runner.current_line_json(), "null");

        runner.push_input(InputEvent::dialogue_next());
        runner.tick(16.0);
        assert_eq!(runner.events_len(), 1);

        let line: Value = serde_json::from_str(&runner.current_line_json()).unwrap();
        assert_eq!(line["speaker"], "Penny");
        assert_eq!(line["segments"][1]["url"], "s.png");
    }

    #[test]
    fn autoplay_off_from_reload_reaches_next_frame() {
        let dialogue = r#"{ "dialogue": [{ "name": "Penny", "text": "hi" }] }"#;
        let mut runner = ShowcaseRunner::new();
        runner.load_manifest(MANIFEST).unwrap();
        runner.load_dialogue(dialogue).unwrap();
        runner.resize(1280.0, 720.0);
        runner.open("/magic-words");

        runner.push_input(InputEvent::autoplay_toggle());
        runner.tick(16.0);
        assert!(runner.director().dialogue().unwrap().autoplay().is_playing());

        runner.load_dialogue(dialogue).unwrap();
        runner.tick(16.0);
        let events = &runner.stage().events;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, SceneEvent::AUTOPLAY_CHANGED);
        assert_eq!(events[0].a, 0.0);

        runner.tick(16.0);
        assert_eq!(runner.events_len(), 0);
    }

    #[test]
    fn bad_config_keeps_previous() {
        let mut runner = ShowcaseRunner::new();
        let err = runner
            .load_config(r#"{ "card_dealer": { "launcher": { "duration_ms": 0 } } }"#)
            .unwrap_err();
        assert!(matches!(err, ShowcaseError::Config(_)));
        assert_eq!(runner.director().config().card_dealer.launcher.duration_ms, 2000.0);
    }

    #[test]
    fn unknown_route_shows_menu() {
        let mut runner = ShowcaseRunner::new();
        assert!(!runner.open("/nowhere"));
        assert_eq!(runner.current_route(), "");
        runner.tick(16.0);
        assert_eq!(runner.instance_count(), 0);
    }
}
