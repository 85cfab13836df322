//! Editor settings, loadable from JSON.
//!
//! # JSON Format
//!
//! Every field is optional and falls back to its default:
//!
//! ```json
//! {
//!   "viewBox": 1080,
//!   "previewSize": 288,
//!   "devicePixelRatio": 2.0,
//!   "modalAgents": ["instagram", "micromessenger"]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compose::{Composer, DEFAULT_VIEW_BOX};
use crate::delivery::DEFAULT_MODAL_AGENTS;
use crate::error::SettingsError;
use crate::export::{DEFAULT_PREVIEW_SIZE, Exporter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct EditorOptions {
    /// Edge length of the composite SVG view box.
    pub view_box: u32,

    /// On-screen edge length of the preview, in CSS pixels.
    pub preview_size: u32,

    /// Multiplier applied to `preview_size` when rasterizing PNG exports.
    pub device_pixel_ratio: f32,

    /// User-agent substrings that receive modal delivery instead of a download.
    pub modal_agents: Vec<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            view_box: DEFAULT_VIEW_BOX,
            preview_size: DEFAULT_PREVIEW_SIZE,
            device_pixel_ratio: 1.0,
            modal_agents: DEFAULT_MODAL_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view_box(mut self, view_box: u32) -> Self {
        self.view_box = view_box;
        self
    }

    pub fn with_preview_size(mut self, preview_size: u32) -> Self {
        self.preview_size = preview_size;
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn with_modal_agents<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modal_agents = agents.into_iter().map(Into::into).collect();
        self
    }

    pub fn composer(&self) -> Composer {
        Composer::new(self.view_box)
    }

    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.preview_size, self.device_pixel_ratio)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let options = EditorOptions::from_json(r#"{"devicePixelRatio":2.0}"#).unwrap();
        assert_eq!(options.device_pixel_ratio, 2.0);
        assert_eq!(options.view_box, 1080);
        assert_eq!(options.preview_size, 288);
        assert!(options.modal_agents.iter().any(|a| a == "instagram"));
        assert_eq!(options.exporter().raster_size(), 576);
    }

    #[test]
    fn builder_overrides() {
        let options = EditorOptions::new()
            .with_view_box(512)
            .with_modal_agents(["kakaotalk"]);
        assert_eq!(options.composer().view_box(), 512);
        assert_eq!(options.modal_agents, vec!["kakaotalk".to_string()]);
    }
}
