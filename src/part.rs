//! Avatar part categories.
//!
//! Each [`AvatarPart`] is one customizable slot of the avatar. The declaration
//! order is the layering order: parts declared later are drawn on top.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A customizable facial/body feature slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AvatarPart {
    Face,
    Nose,
    Mouth,
    Eyes,
    Eyebrows,
    Glasses,
    Hair,
    Accessories,
    Details,
    Beard,
}

impl AvatarPart {
    /// All parts, in layering order.
    pub const ALL: [AvatarPart; 10] = [
        AvatarPart::Face,
        AvatarPart::Nose,
        AvatarPart::Mouth,
        AvatarPart::Eyes,
        AvatarPart::Eyebrows,
        AvatarPart::Glasses,
        AvatarPart::Hair,
        AvatarPart::Accessories,
        AvatarPart::Details,
        AvatarPart::Beard,
    ];

    /// The lowercase identifier used in asset paths, group ids and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Nose => "nose",
            Self::Mouth => "mouth",
            Self::Eyes => "eyes",
            Self::Eyebrows => "eyebrows",
            Self::Glasses => "glasses",
            Self::Hair => "hair",
            Self::Accessories => "accessories",
            Self::Details => "details",
            Self::Beard => "beard",
        }
    }

    /// Returns the `id` of the `<g>` element this part occupies in a composite.
    pub fn group_id(&self) -> String {
        format!("notion-avatar-{}", self.as_str())
    }
}

impl fmt::Display for AvatarPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown part name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown avatar part `{0}`")]
pub struct UnknownPart(pub String);

impl FromStr for AvatarPart {
    type Err = UnknownPart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|part| part.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPart(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Hair".parse::<AvatarPart>(), Ok(AvatarPart::Hair));
        assert_eq!("beard".parse::<AvatarPart>(), Ok(AvatarPart::Beard));
        assert!("tail".parse::<AvatarPart>().is_err());
    }

    #[test]
    fn all_is_sorted_in_layer_order() {
        let mut sorted = AvatarPart::ALL;
        sorted.sort();
        assert_eq!(sorted, AvatarPart::ALL);
        assert_eq!(AvatarPart::ALL[0], AvatarPart::Face);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&AvatarPart::Eyebrows).unwrap();
        assert_eq!(json, "\"eyebrows\"");
        assert_eq!(AvatarPart::Glasses.group_id(), "notion-avatar-glasses");
    }
}
