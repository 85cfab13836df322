//! Sources of per-part SVG fragments.
//!
//! The editor never reads files directly; it asks an [`AssetSource`] for the
//! fragment of a given part and style. [`DirAssets`] reads the conventional
//! on-disk layout, [`MemoryAssets`] serves fragments held in memory.
//!
//! # On-disk Layout
//!
//! ```text
//! <root>/
//!   preview/<part>/<index>.svg       full-size fragment, composed into the preview
//!   part/<part>/<part>-<index>.svg   thumbnail shown on the selection control
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AssetError;
use crate::part::AvatarPart;

/// Resolves a part and style index to raw SVG fragment markup.
pub trait AssetSource {
    /// Loads the preview fragment for `part` at style `index`.
    fn fragment(
        &self,
        part: AvatarPart,
        index: u32,
    ) -> impl Future<Output = Result<String, AssetError>> + Send;
}

/// Returns the asset-root-relative path of a preview fragment.
pub fn fragment_path(part: AvatarPart, index: u32) -> String {
    format!("preview/{part}/{index}.svg")
}

/// Returns the asset-root-relative path of a selection thumbnail.
pub fn thumbnail_path(part: AvatarPart, index: u32) -> String {
    format!("part/{part}/{part}-{index}.svg")
}

// ============================================================================
// DirAssets
// ============================================================================

/// Reads fragments from an asset directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssets {
    async fn fragment(&self, part: AvatarPart, index: u32) -> Result<String, AssetError> {
        let path = self.root.join(fragment_path(part, index));
        match tokio::fs::read_to_string(&path).await {
            Ok(svg) => Ok(svg),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetError::NotFound { part, index }),
            Err(source) => Err(AssetError::Io { path, source }),
        }
    }
}

// ============================================================================
// MemoryAssets
// ============================================================================

/// Serves fragments from memory. Useful for embedding and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    fragments: HashMap<(AvatarPart, u32), String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fragment, replacing any previous one for the same slot.
    pub fn with_fragment(mut self, part: AvatarPart, index: u32, svg: impl Into<String>) -> Self {
        self.insert(part, index, svg);
        self
    }

    pub fn insert(&mut self, part: AvatarPart, index: u32, svg: impl Into<String>) {
        self.fragments.insert((part, index), svg.into());
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    async fn fragment(&self, part: AvatarPart, index: u32) -> Result<String, AssetError> {
        self.fragments
            .get(&(part, index))
            .cloned()
            .ok_or(AssetError::NotFound { part, index })
    }
}
