use std::collections::HashMap;

use glam::Vec2;

use crate::assets::manifest::ShowcaseManifest;
use crate::components::sprite::TextureId;

/// Registry of named textures, built from a ShowcaseManifest.
/// Provides name-based texture lookup for scene code.
pub struct TextureRegistry {
    textures: HashMap<String, TextureId>,
    sizes: HashMap<TextureId, Vec2>,
    card_faces: Vec<TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            sizes: HashMap::new(),
            card_faces: Vec::new(),
        }
    }

    /// Build a registry from a parsed manifest. Card names with no matching
    /// texture are skipped.
    pub fn from_manifest(manifest: &ShowcaseManifest) -> Self {
        let mut textures = HashMap::with_capacity(manifest.textures.len());
        let mut sizes = HashMap::new();
        for (index, desc) in manifest.textures.iter().enumerate() {
            let id = TextureId(index as u32);
            textures.insert(desc.name.clone(), id);
            if desc.width > 0.0 && desc.height > 0.0 {
                sizes.insert(id, Vec2::new(desc.width, desc.height));
            }
        }
        let mut card_faces = Vec::with_capacity(manifest.cards.len());
        for name in &manifest.cards {
            match textures.get(name) {
                Some(&id) => card_faces.push(id),
                None => log::warn!("card face {name:?} is not a manifest texture"),
            }
        }
        Self {
            textures,
            sizes,
            card_faces,
        }
    }

    /// Look up a texture by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }

    /// Pixel size declared in the manifest, if any.
    pub fn size(&self, id: TextureId) -> Option<Vec2> {
        self.sizes.get(&id).copied()
    }

    /// Resolved card faces in manifest order.
    pub fn card_faces(&self) -> &[TextureId] {
        &self.card_faces
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
