use serde::{Deserialize, Serialize};

/// Textures a scene wants loaded, in the order they are requested.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
}

/// Describes a single texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Name game code looks the texture up by (e.g., "star").
    pub name: String,
    /// Relative path to the image file (e.g., "textures/circle.png").
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
