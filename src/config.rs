//! The avatar configuration: one selected style index per part.
//!
//! # Example
//!
//! ```
//! use notion_avatar::{AvatarConfig, AvatarPart, StyleCatalog};
//!
//! let catalog = StyleCatalog::new()
//!     .with_part(AvatarPart::Hair, 3)
//!     .with_part(AvatarPart::Eyes, 2);
//!
//! let mut config = AvatarConfig::new()
//!     .with(AvatarPart::Hair, 3)
//!     .with(AvatarPart::Eyes, 0);
//!
//! // Advancing past the last style wraps to zero.
//! assert_eq!(config.advance(AvatarPart::Hair, &catalog), Some(0));
//!
//! let json = config.to_json().unwrap();
//! assert_eq!(json, r#"{"eyes":0,"hair":0}"#);
//! ```

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::StyleCatalog;
use crate::error::ConfigError;
use crate::part::AvatarPart;

/// Mapping from part to selected style index, iterated in layering order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct AvatarConfig {
    styles: BTreeMap<AvatarPart, u32>,
}

impl AvatarConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style for a part.
    pub fn with(mut self, part: AvatarPart, index: u32) -> Self {
        self.styles.insert(part, index);
        self
    }

    /// Picks a uniformly random style for every part in the catalog.
    pub fn random_with<R: Rng>(catalog: &StyleCatalog, rng: &mut R) -> Self {
        let styles = catalog
            .iter()
            .map(|(part, max)| (part, rng.random_range(0..=max)))
            .collect();
        Self { styles }
    }

    /// Picks a random configuration using the thread-local RNG.
    pub fn random(catalog: &StyleCatalog) -> Self {
        Self::random_with(catalog, &mut rand::rng())
    }

    /// Returns the selected style for a part.
    pub fn get(&self, part: AvatarPart) -> Option<u32> {
        self.styles.get(&part).copied()
    }

    /// Sets the style for a part without range checking.
    pub fn set(&mut self, part: AvatarPart, index: u32) {
        self.styles.insert(part, index);
    }

    /// Advances a part to its next style, wrapping to zero after the catalog's
    /// maximum index. Returns the new index.
    ///
    /// Returns `None` (and changes nothing) if either the configuration or the
    /// catalog lacks the part.
    pub fn advance(&mut self, part: AvatarPart, catalog: &StyleCatalog) -> Option<u32> {
        let max = catalog.max_index(part)?;
        let index = self.styles.get_mut(&part)?;
        *index = if *index >= max { 0 } else { *index + 1 };
        Some(*index)
    }

    /// Iterates over `(part, index)` in layering order.
    pub fn iter(&self) -> impl Iterator<Item = (AvatarPart, u32)> + '_ {
        self.styles.iter().map(|(part, index)| (*part, *index))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Checks that the configuration covers exactly the catalog's parts, with
    /// every index in range.
    pub fn validate(&self, catalog: &StyleCatalog) -> Result<(), ConfigError> {
        if let Some(part) = self.styles.keys().find(|part| !catalog.contains(**part)) {
            return Err(ConfigError::NotInCatalog(*part));
        }
        for (part, max) in catalog.iter() {
            let index = self.get(part).ok_or(ConfigError::MissingPart(part))?;
            if index > max {
                return Err(ConfigError::OutOfRange { part, index, max });
            }
        }
        Ok(())
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<(AvatarPart, u32)> for AvatarConfig {
    fn from_iter<I: IntoIterator<Item = (AvatarPart, u32)>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_catalog() -> StyleCatalog {
        StyleCatalog::new()
            .with_part(AvatarPart::Hair, 3)
            .with_part(AvatarPart::Eyes, 2)
    }

    #[test]
    fn cycle_hair_twice() {
        let catalog = small_catalog();
        let mut config = AvatarConfig::new()
            .with(AvatarPart::Hair, 0)
            .with(AvatarPart::Eyes, 0);

        config.advance(AvatarPart::Hair, &catalog);
        config.advance(AvatarPart::Hair, &catalog);

        assert_eq!(config.get(AvatarPart::Hair), Some(2));
        assert_eq!(config.get(AvatarPart::Eyes), Some(0));
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let catalog = StyleCatalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        let original = AvatarConfig::random_with(&catalog, &mut rng);

        for (part, max) in catalog.iter() {
            let mut config = original.clone();
            for _ in 0..=max {
                config.advance(part, &catalog);
            }
            assert_eq!(config, original, "{part} did not wrap back");
        }
    }

    #[test]
    fn random_stays_in_range() {
        let catalog = StyleCatalog::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let config = AvatarConfig::random_with(&catalog, &mut rng);
            assert_eq!(config.len(), catalog.len());
            config.validate(&catalog).unwrap();
        }
    }

    #[test]
    fn advance_unknown_part_is_noop() {
        let catalog = small_catalog();
        let mut config = AvatarConfig::new().with(AvatarPart::Hair, 1);

        assert_eq!(config.advance(AvatarPart::Face, &catalog), None);
        assert_eq!(config.advance(AvatarPart::Eyes, &catalog), None);
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn advance_at_largest_index_wraps() {
        let catalog = StyleCatalog::from_json(r#"{"hair":4294967295}"#).unwrap();
        let mut config = AvatarConfig::new().with(AvatarPart::Hair, u32::MAX - 1);
        config.validate(&catalog).unwrap();

        assert_eq!(config.advance(AvatarPart::Hair, &catalog), Some(u32::MAX));
        assert_eq!(config.advance(AvatarPart::Hair, &catalog), Some(0));
    }

    #[test]
    fn advance_past_max_wraps_to_zero() {
        let catalog = small_catalog();
        let mut config = AvatarConfig::new().with(AvatarPart::Hair, u32::MAX);

        assert_eq!(config.advance(AvatarPart::Hair, &catalog), Some(0));
    }

    #[test]
    fn validate_reports_problems() {
        let catalog = small_catalog();

        let out_of_range = AvatarConfig::new()
            .with(AvatarPart::Hair, 4)
            .with(AvatarPart::Eyes, 0);
        assert!(matches!(
            out_of_range.validate(&catalog),
            Err(ConfigError::OutOfRange {
                part: AvatarPart::Hair,
                index: 4,
                max: 3
            })
        ));

        let missing = AvatarConfig::new().with(AvatarPart::Hair, 0);
        assert!(matches!(
            missing.validate(&catalog),
            Err(ConfigError::MissingPart(AvatarPart::Eyes))
        ));

        let unknown = AvatarConfig::new()
            .with(AvatarPart::Hair, 0)
            .with(AvatarPart::Eyes, 0)
            .with(AvatarPart::Beard, 0);
        assert!(matches!(
            unknown.validate(&catalog),
            Err(ConfigError::NotInCatalog(AvatarPart::Beard))
        ));
    }

    #[test]
    fn json_roundtrip_keeps_layer_order() {
        let config = AvatarConfig::from_json(r#"{"hair":5,"face":1}"#).unwrap();
        let parts: Vec<_> = config.iter().map(|(part, _)| part).collect();
        assert_eq!(parts, vec![AvatarPart::Face, AvatarPart::Hair]);
        assert_eq!(config.to_json().unwrap(), r#"{"face":1,"hair":5}"#);
    }
}
