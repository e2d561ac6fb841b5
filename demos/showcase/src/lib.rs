use wasm_bindgen::prelude::*;
use tempo_engine::InputEvent;

tempo_web::export_showcase!("showcase");

/// Manifest bundled with the demo, for hosts that do not serve their own.
#[wasm_bindgen]
pub fn showcase_bundled_manifest() -> String {
    BUNDLED_MANIFEST.to_string()
}

const BUNDLED_MANIFEST: &str = include_str!("../data/manifest.json");

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_engine::{SceneDirector, ShowcaseManifest};

    #[test]
    fn bundled_manifest_routes_all_have_scenes() {
        let manifest = ShowcaseManifest::from_json(BUNDLED_MANIFEST).unwrap();
        assert_eq!(manifest.games.len(), 3);
        assert!(SceneDirector::validate_routes(&manifest).is_ok());
    }
}
