//! Texture resolution for board faces.
//!
//! Texture identifiers are opaque strings supplied by the caller. The
//! registry resolves them in three stages: an explicitly registered config
//! wins, otherwise the id is treated as an image path on disk, otherwise a
//! solid placeholder stands in. Resolution never fails outward - a board
//! whose art is missing still simulates and renders, just blank.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = TextureRegistry::new();
//! registry.add("hero-deck", TextureConfig::solid(200, 60, 40, 255));
//!
//! // Registered id: the config above.
//! let hero = registry.resolve("hero-deck");
//! // Unknown id that is a readable PNG path: loaded from disk.
//! let disk = registry.resolve("assets/decks/classic.png");
//! // Anything else: placeholder, with a warning in the log.
//! let missing = registry.resolve("not-a-real-id");
//! ```

use std::path::Path;

use crate::error::TextureError;

/// RGBA pixel data for one board face.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
}

impl TextureConfig {
    /// Create a texture from raw RGBA data.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Load a texture from a PNG or JPEG file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// A solid color texture (1x1 pixel).
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
        }
    }

    /// Vertical gradient from `top` to `bottom`, `height` pixels tall.
    ///
    /// Handy for procedural deck faces in demos and tests.
    pub fn gradient(height: u32, top: [u8; 4], bottom: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((height * 4) as usize);
        for y in 0..height {
            let t = y as f32 / (height - 1).max(1) as f32;
            for c in 0..4 {
                let a = top[c] as f32;
                let b = bottom[c] as f32;
                data.push((a + (b - a) * t).round() as u8);
            }
        }
        Self {
            data,
            width: 1,
            height,
        }
    }

    /// The stand-in used when an identifier cannot be resolved: a dim,
    /// semi-opaque gray so an untextured board is visible but unobtrusive.
    pub fn placeholder() -> Self {
        Self::solid(90, 90, 90, 220)
    }
}

/// Maps texture identifiers to pixel data.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    textures: Vec<(String, TextureConfig)>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register pixel data for an identifier. Later registrations win.
    pub fn add(&mut self, id: impl Into<String>, config: TextureConfig) {
        self.textures.push((id.into(), config));
    }

    /// Look up an explicitly registered config.
    pub fn get(&self, id: &str) -> Option<&TextureConfig> {
        self.textures
            .iter()
            .rev()
            .find(|(name, _)| name == id)
            .map(|(_, config)| config)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve an identifier to pixel data, never failing.
    ///
    /// Registered config, then file load with the id as path, then
    /// placeholder. Load failures are logged at warn level and otherwise
    /// swallowed.
    pub fn resolve(&self, id: &str) -> TextureConfig {
        if let Some(config) = self.get(id) {
            return config.clone();
        }
        match TextureConfig::from_file(id) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("texture '{}' failed to load, using placeholder: {}", id, e);
                TextureConfig::placeholder()
            }
        }
    }
}
