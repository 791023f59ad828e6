use serde::{Deserialize, Serialize};

/// Linear RGB color, each channel 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Whether a material carries a mutable opacity.
///
/// Only `Fadeable` materials take part in fade-out lifecycles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Opacity {
    #[default]
    Opaque,
    Fadeable { opacity: f32 },
}

impl Opacity {
    /// Alpha to render with.
    pub fn alpha(&self) -> f32 {
        match *self {
            Opacity::Opaque => 1.0,
            Opacity::Fadeable { opacity } => opacity,
        }
    }

    /// Reduce opacity by `amount`. Returns the new opacity, or `None` for
    /// opaque materials (which never fade).
    pub fn fade(&mut self, amount: f32) -> Option<f32> {
        match self {
            Opacity::Opaque => None,
            Opacity::Fadeable { opacity } => {
                *opacity -= amount;
                Some(*opacity)
            }
        }
    }
}

/// Surface description handed to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    #[serde(default)]
    pub opacity: Opacity,
    /// Glow multiplier (0.0 = lit normally).
    #[serde(default)]
    pub emissive: f32,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// A translucent material whose opacity may later be faded.
    pub fn translucent(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity: Opacity::Fadeable { opacity },
            emissive: 0.0,
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_unpacks_channels() {
        let c = Color::from_hex(0xff6600);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 0.4).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn opaque_never_fades() {
        let mut o = Opacity::Opaque;
        assert_eq!(o.fade(0.5), None);
        assert_eq!(o.alpha(), 1.0);
    }

    #[test]
    fn fadeable_loses_opacity() {
        let mut o = Opacity::Fadeable { opacity: 1.0 };
        let left = o.fade(0.25).unwrap();
        assert!((left - 0.75).abs() < 1e-6);
        assert!((o.alpha() - 0.75).abs() < 1e-6);
    }
}
