use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;

/// A named remote image (avatar or emoji).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAsset {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub name: String,
    pub text: String,
}

/// Dialogue data as served to the host. Missing lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialoguePayload {
    #[serde(default)]
    pub avatars: Vec<NamedAsset>,
    /// The upstream feed spells this "emojies".
    #[serde(default, alias = "emojies")]
    pub emojis: Vec<NamedAsset>,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
}

impl DialoguePayload {
    pub fn from_json(json: &str) -> Result<Self, ShowcaseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn avatar(&self, name: &str) -> Option<&NamedAsset> {
        self.avatars.iter().find(|a| a.name == name)
    }

    pub fn emoji(&self, name: &str) -> Option<&NamedAsset> {
        self.emojis.iter().find(|e| e.name == name)
    }
}
