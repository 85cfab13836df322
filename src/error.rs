//! Error types, one enum per concern.

use std::path::PathBuf;

use crate::part::AvatarPart;

/// Failure to load a single part fragment or thumbnail.
///
/// Composition never surfaces these; a failed fragment becomes an empty layer.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("no {part} fragment for style {index}")]
    NotFound { part: AvatarPart, index: u32 },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to load a [`StyleCatalog`](crate::StyleCatalog) or
/// [`EditorOptions`](crate::EditorOptions).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("catalog defines no parts")]
    EmptyCatalog,

    #[error("invalid settings JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to read settings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An [`AvatarConfig`](crate::AvatarConfig) that does not fit its catalog.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("style {index} for `{part}` is out of range (max {max})")]
    OutOfRange { part: AvatarPart, index: u32, max: u32 },

    #[error("configuration has no style for `{0}`")]
    MissingPart(AvatarPart),

    #[error("catalog has no styles for `{0}`")]
    NotInCatalog(AvatarPart),

    #[error("invalid configuration JSON")]
    Json(#[from] serde_json::Error),
}

/// Failure while capturing the preview as an export artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The preview has not been composed, or holds no `<svg>` root.
    #[error("preview has no vector root")]
    MissingVectorRoot,

    #[error("failed to parse preview SVG")]
    Parse(#[from] resvg::usvg::Error),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to encode PNG")]
    Encode(#[from] image::ImageError),
}

/// Failure while handing an artifact to a [`DeliverySink`](crate::DeliverySink).
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("artifact is not a base64 data URI")]
    InvalidDataUri,

    #[error("artifact payload is not valid base64")]
    Decode(#[from] base64::DecodeError),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of [`AvatarEditor::download`](crate::AvatarEditor::download).
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
