pub mod runner;

pub use runner::ShowcaseRunner;

/// Generate all `#[wasm_bindgen]` exports for the showcase.
///
/// Generates:
/// - `thread_local!` storage for the ShowcaseRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, resize, routing, input, loaders, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use tempo_engine::InputEvent;
///
/// tempo_web::export_showcase!("showcase");
/// ```
///
/// # Arguments
///
/// - `$name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_showcase {
    ($name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ShowcaseRunner>> = RefCell::new(None);
        }

        /// Runs `f` against the runner. Before `showcase_init` this is a no-op
        /// returning the default value.
        fn with_runner<R: Default>(f: impl FnOnce(&mut $crate::ShowcaseRunner) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::warn!("{}: not initialized, call showcase_init() first", $name);
                    R::default()
                }
            })
        }

        /// Runs a fallible loader, surfacing errors to JS as strings.
        fn try_with_runner(
            f: impl FnOnce(&mut $crate::ShowcaseRunner) -> Result<(), tempo_engine::ShowcaseError>,
        ) -> Result<(), JsValue> {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner).map_err(|e| JsValue::from_str(&e.to_string())),
                None => Err(JsValue::from_str(concat!($name, ": not initialized"))),
            })
        }

        #[wasm_bindgen]
        pub fn showcase_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some($crate::ShowcaseRunner::new());
            });
            log::info!("{}: initialized", $name);
        }

        #[wasm_bindgen]
        pub fn showcase_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn showcase_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        // ---- Routing ----

        #[wasm_bindgen]
        pub fn showcase_open(route: &str) -> bool {
            with_runner(|r| r.open(route))
        }

        #[wasm_bindgen]
        pub fn showcase_close() {
            with_runner(|r| r.close());
        }

        #[wasm_bindgen]
        pub fn showcase_current_route() -> String {
            with_runner(|r| r.current_route().to_string())
        }

        // ---- Loaders ----

        #[wasm_bindgen]
        pub fn showcase_load_config(json: &str) -> Result<(), JsValue> {
            try_with_runner(|r| r.load_config(json))
        }

        #[wasm_bindgen]
        pub fn showcase_load_manifest(json: &str) -> Result<(), JsValue> {
            try_with_runner(|r| r.load_manifest(json))
        }

        #[wasm_bindgen]
        pub fn showcase_load_dialogue(json: &str) -> Result<(), JsValue> {
            try_with_runner(|r| r.load_dialogue(json))
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn showcase_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn showcase_dialogue_next() {
            with_runner(|r| r.push_input(InputEvent::dialogue_next()));
        }

        #[wasm_bindgen]
        pub fn showcase_autoplay_toggle() {
            with_runner(|r| r.push_input(InputEvent::autoplay_toggle()));
        }

        #[wasm_bindgen]
        pub fn showcase_playback_complete(cycle_id: u32) {
            with_runner(|r| r.push_input(InputEvent::playback_complete(cycle_id)));
        }

        #[wasm_bindgen]
        pub fn showcase_audio_available(available: bool) {
            with_runner(|r| r.push_input(InputEvent::audio_available(available)));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            RUNNER.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map_or(std::ptr::null(), |r| r.instances_ptr())
            })
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_additive_split() -> u32 {
            with_runner(|r| r.additive_split())
        }

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            RUNNER.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map_or(std::ptr::null(), |r| r.events_ptr())
            })
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        #[wasm_bindgen]
        pub fn get_event_floats() -> u32 {
            with_runner(|r| r.event_floats())
        }

        #[wasm_bindgen]
        pub fn get_fps() -> f32 {
            with_runner(|r| r.fps())
        }

        #[wasm_bindgen]
        pub fn get_games_json() -> String {
            with_runner(|r| r.games_json())
        }

        #[wasm_bindgen]
        pub fn get_current_line_json() -> String {
            with_runner(|r| r.current_line_json())
        }
    };
}
