use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Glyph used for species that have no entry of their own
pub const DEFAULT_GLYPH: &str = "🌱";

/// Species name to display glyph, with a fallback for unknown species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesGlyphTable {
    #[serde(default)]
    glyphs: HashMap<String, String>,
    #[serde(default = "default_fallback")]
    fallback: String,
}

fn default_fallback() -> String {
    DEFAULT_GLYPH.to_string()
}

impl Default for SpeciesGlyphTable {
    fn default() -> Self {
        Self::new(DEFAULT_GLYPH)
    }
}

impl SpeciesGlyphTable {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self { glyphs: HashMap::new(), fallback: fallback.into() }
    }

    /// Add a glyph for a species
    pub fn with_glyph(mut self, species: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.insert(species, glyph);
        self
    }

    pub fn insert(&mut self, species: impl Into<String>, glyph: impl Into<String>) {
        self.glyphs.insert(species.into(), glyph.into());
    }

    /// Glyph for a species, or the fallback when the species is unknown
    pub fn lookup(&self, species: &str) -> &str {
        self.get(species).unwrap_or(self.fallback.as_str())
    }

    /// Glyph for a species, without falling back
    pub fn get(&self, species: &str) -> Option<&str> {
        self.glyphs.get(species).map(String::as_str)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
