use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;

/// Showcase manifest: the menu's game list plus the textures the host loads.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowcaseManifest {
    /// Menu entries, one per scene route.
    #[serde(default)]
    pub games: Vec<GameCard>,
    /// Textures in host load order. A texture's index is its `TextureId`.
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    /// Texture names used as card faces, cycled over the deck.
    #[serde(default)]
    pub cards: Vec<String>,
}

/// Menu card for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCard {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Route path, e.g. "/ace-of-shadows".
    pub url: String,
    #[serde(default)]
    pub theme: GameTheme,
    #[serde(default)]
    pub glyph: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameTheme {
    #[default]
    Garden,
    Sweet,
    Tripeaks,
}

/// Describes a single texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Lookup name (e.g., "card_ace").
    pub name: String,
    /// Relative path to the image file (e.g., "cards/ace.png").
    pub path: String,
    /// Pixel size of the image. 0 when unknown.
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl ShowcaseManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ShowcaseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Routes of every game card, in menu order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(|g| g.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_games_and_textures() {
        let json = r#"{
            "games": [
                {
                    "title": "Ace of Shadows",
                    "description": "144 cards",
                    "url": "/ace-of-shadows",
                    "theme": "tripeaks",
                    "glyph": "A"
                },
                { "title": "Phoenix Flame", "url": "/phoenix-flame" }
            ],
            "textures": [
                { "name": "card_ace", "path": "cards/ace.png" },
                { "name": "flame", "path": "fx/flame.png" }
            ],
            "cards": ["card_ace"]
        }"#;
        let manifest = ShowcaseManifest::from_json(json).unwrap();
        assert_eq!(manifest.games.len(), 2);
        assert_eq!(manifest.games[0].theme, GameTheme::Tripeaks);
        assert_eq!(manifest.games[1].theme, GameTheme::Garden);
        assert_eq!(manifest.games[1].description, "");
        assert_eq!(manifest.textures[1].path, "fx/flame.png");
        let routes: Vec<_> = manifest.routes().collect();
        assert_eq!(routes, vec!["/ace-of-shadows", "/phoenix-flame"]);
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = ShowcaseManifest::from_json("{}").unwrap();
        assert!(manifest.games.is_empty());
        assert!(manifest.cards.is_empty());
    }

    #[test]
    fn bad_json_is_an_error() {
        let err = ShowcaseManifest::from_json("{ games: ").unwrap_err();
        assert!(matches!(err, ShowcaseError::Json(_)));
    }
}
