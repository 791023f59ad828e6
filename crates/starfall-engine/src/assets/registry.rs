use serde::{Deserialize, Serialize};

use crate::assets::manifest::AssetManifest;

/// Handle to a texture slot in a `TextureRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Load state of a texture. Loads are fire-and-forget: the host reports the
/// outcome later through `InputEvent::TextureLoaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
struct TextureSlot {
    name: String,
    path: String,
    state: TextureState,
}

/// Registry of named textures and their load state.
/// Only `Ready` textures are ever referenced by render output.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    slots: Vec<TextureSlot>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request every manifest texture. Returns how many entries were listed.
    pub fn register_manifest(&mut self, manifest: &AssetManifest) -> usize {
        for tex in &manifest.textures {
            self.request(&tex.name, &tex.path);
        }
        manifest.textures.len()
    }

    /// Register a texture to load. Requesting a known name returns its
    /// existing id.
    pub fn request(&mut self, name: &str, path: &str) -> TextureId {
        if let Some(id) = self.id_of(name) {
            return id;
        }
        let id = TextureId(self.slots.len() as u32);
        self.slots.push(TextureSlot {
            name: name.to_string(),
            path: path.to_string(),
            state: TextureState::Pending,
        });
        id
    }

    /// Record a load outcome. Unknown ids are ignored.
    pub fn mark_loaded(&mut self, id: TextureId, ok: bool) {
        match self.slots.get_mut(id.0 as usize) {
            Some(slot) => {
                slot.state = if ok { TextureState::Ready } else { TextureState::Failed };
                if ok {
                    log::debug!("texture '{}' ready", slot.name);
                } else {
                    log::warn!("texture '{}' ({}) failed to load; rendering untextured", slot.name, slot.path);
                }
            }
            None => log::trace!("load result for unknown texture {:?} ignored", id),
        }
    }

    pub fn state(&self, id: TextureId) -> Option<TextureState> {
        self.slots.get(id.0 as usize).map(|s| s.state)
    }

    pub fn id_of(&self, name: &str) -> Option<TextureId> {
        self.slots.iter().position(|s| s.name == name).map(|i| TextureId(i as u32))
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.slots.get(id.0 as usize).map(|s| s.path.as_str())
    }

    /// `texture` if it is loaded, otherwise `None` (render untextured).
    pub fn resolve(&self, texture: Option<TextureId>) -> Option<TextureId> {
        texture.filter(|&id| self.state(id) == Some(TextureState::Ready))
    }

    /// Pending textures with their paths, for the host to start loading.
    pub fn pending(&self) -> impl Iterator<Item = (TextureId, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state == TextureState::Pending)
            .map(|(i, s)| (TextureId(i as u32), s.path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{ "textures": [{ "name": "star", "path": "circle.png" }] }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let mut reg = TextureRegistry::new();
        assert_eq!(reg.register_manifest(&manifest), 1);

        let star = reg.id_of("star").expect("star should exist");
        assert_eq!(reg.state(star), Some(TextureState::Pending));
        assert_eq!(reg.path(star), Some("circle.png"));
        assert_eq!(reg.pending().count(), 1);
    }

    #[test]
    fn only_ready_textures_resolve() {
        let mut reg = TextureRegistry::new();
        let ok = reg.request("star", "circle.png");
        let bad = reg.request("dust", "dust.png");
        assert_eq!(reg.resolve(Some(ok)), None);

        reg.mark_loaded(ok, true);
        reg.mark_loaded(bad, false);
        assert_eq!(reg.resolve(Some(ok)), Some(ok));
        assert_eq!(reg.resolve(Some(bad)), None);
        assert_eq!(reg.resolve(None), None);
        assert_eq!(reg.pending().count(), 0);
    }

    #[test]
    fn duplicate_request_reuses_slot() {
        let mut reg = TextureRegistry::new();
        let a = reg.request("star", "circle.png");
        let b = reg.request("star", "other.png");
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut reg = TextureRegistry::new();
        reg.mark_loaded(TextureId(4), true);
        assert!(reg.state(TextureId(4)).is_none());
        assert!(reg.id_of("nonexistent").is_none());
    }
}
