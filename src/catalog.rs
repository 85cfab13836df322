//! Style counts per avatar part.
//!
//! A [`StyleCatalog`] records the highest style index available for each part.
//! A part with a maximum index of `n` has `n + 1` variants, numbered `0..=n`.
//!
//! # JSON Format
//!
//! ```json
//! { "hair": 58, "eyes": 13 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::part::AvatarPart;

/// Maximum style index per part, iterated in layering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct StyleCatalog {
    counts: BTreeMap<AvatarPart, u32>,
}

impl Default for StyleCatalog {
    /// The stock notion-avatar asset pack.
    fn default() -> Self {
        Self::new()
            .with_part(AvatarPart::Face, 15)
            .with_part(AvatarPart::Nose, 13)
            .with_part(AvatarPart::Mouth, 19)
            .with_part(AvatarPart::Eyes, 13)
            .with_part(AvatarPart::Eyebrows, 15)
            .with_part(AvatarPart::Glasses, 14)
            .with_part(AvatarPart::Hair, 58)
            .with_part(AvatarPart::Accessories, 13)
            .with_part(AvatarPart::Details, 12)
            .with_part(AvatarPart::Beard, 16)
    }
}

impl StyleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Sets the maximum style index for a part.
    pub fn with_part(mut self, part: AvatarPart, max_index: u32) -> Self {
        self.counts.insert(part, max_index);
        self
    }

    /// Returns the maximum style index for a part, if the catalog covers it.
    pub fn max_index(&self, part: AvatarPart) -> Option<u32> {
        self.counts.get(&part).copied()
    }

    /// Returns the number of variants for a part (`max_index + 1`).
    pub fn variants(&self, part: AvatarPart) -> Option<u64> {
        self.max_index(part).map(|max| u64::from(max) + 1)
    }

    /// Returns true if the catalog covers this part.
    pub fn contains(&self, part: AvatarPart) -> bool {
        self.counts.contains_key(&part)
    }

    /// Iterates over `(part, max_index)` in layering order.
    pub fn iter(&self) -> impl Iterator<Item = (AvatarPart, u32)> + '_ {
        self.counts.iter().map(|(part, max)| (*part, *max))
    }

    /// Iterates over covered parts in layering order.
    pub fn parts(&self) -> impl Iterator<Item = AvatarPart> + '_ {
        self.counts.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Parses a catalog from JSON. An empty catalog is rejected.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let catalog: Self = serde_json::from_str(json)?;
        if catalog.is_empty() {
            return Err(SettingsError::EmptyCatalog);
        }
        Ok(catalog)
    }

    /// Reads a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serializes the catalog to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_every_part() {
        let catalog = StyleCatalog::default();
        assert_eq!(catalog.len(), AvatarPart::ALL.len());
        assert_eq!(catalog.max_index(AvatarPart::Hair), Some(58));
        assert_eq!(catalog.variants(AvatarPart::Beard), Some(17));
    }

    #[test]
    fn variants_of_largest_index() {
        let catalog = StyleCatalog::from_json(r#"{"hair":4294967295}"#).unwrap();
        assert_eq!(catalog.variants(AvatarPart::Hair), Some(1 << 32));
    }

    #[test]
    fn partial_catalog_from_json() {
        let catalog = StyleCatalog::from_json(r#"{"hair":3,"eyes":2}"#).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.contains(AvatarPart::Face));
        // Iteration follows layering order, not JSON order.
        let parts: Vec<_> = catalog.parts().collect();
        assert_eq!(parts, vec![AvatarPart::Eyes, AvatarPart::Hair]);
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            StyleCatalog::from_json("{}"),
            Err(SettingsError::EmptyCatalog)
        ));
        assert!(matches!(
            StyleCatalog::from_json(r#"{"tail":1}"#),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"face":4}"#).unwrap();

        let catalog = StyleCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.max_index(AvatarPart::Face), Some(4));

        let missing = StyleCatalog::from_path(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(SettingsError::Io { .. })));
    }
}
