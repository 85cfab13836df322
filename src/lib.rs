//! notion-avatar: layered SVG avatar composition
//!
//! This crate builds avatars out of per-part SVG fragments (face, hair, eyes,
//! ...), lets a user cycle through style variants per part, and exports the
//! result as a PNG or SVG data URI.
//!
//! # Example
//!
//! ```
//! use notion_avatar::{
//!     AvatarConfig, AvatarEditor, AvatarPart, ImageFormat, MemoryAssets,
//!     RecordingAnalytics, StyleCatalog,
//! };
//!
//! let catalog = StyleCatalog::new()
//!     .with_part(AvatarPart::Face, 1)
//!     .with_part(AvatarPart::Hair, 1);
//!
//! let mut assets = MemoryAssets::new();
//! for index in 0..=1 {
//!     assets.insert(AvatarPart::Face, index, r#"<svg viewBox="0 0 1080 1080"><circle cx="540" cy="540" r="400"/></svg>"#);
//!     assets.insert(AvatarPart::Hair, index, r#"<svg viewBox="0 0 1080 1080"><rect width="1080" height="200"/></svg>"#);
//! }
//!
//! let config = AvatarConfig::new()
//!     .with(AvatarPart::Face, 0)
//!     .with(AvatarPart::Hair, 1);
//! let mut editor = AvatarEditor::new(assets, catalog)
//!     .with_analytics(RecordingAnalytics::default())
//!     .with_config(config)
//!     .unwrap();
//!
//! // Clicking the hair control wraps it back to style 0.
//! assert_eq!(editor.cycle(AvatarPart::Hair), Some(0));
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let preview = editor.refresh().await;
//! assert!(preview.markup.contains(r#"<g id="notion-avatar-hair">"#));
//! # });
//! ```
//!
//! # Exporting
//!
//! [`AvatarEditor::download`] captures the committed preview and hands it to a
//! [`DeliverySink`]. In-app browsers listed in
//! [`EditorOptions::modal_agents`] get a modal; everyone else gets a download
//! named `notion-avatar-<unix-millis>.<ext>`.

mod analytics;
mod asset;
mod catalog;
mod compose;
mod config;
mod delivery;
mod editor;
mod error;
mod export;
mod options;
mod part;

pub use analytics::{
    Analytics, AnalyticsEvent, DOWNLOAD_ACTION, RecordingAnalytics, TracingAnalytics,
};
pub use asset::{AssetSource, DirAssets, MemoryAssets, fragment_path, thumbnail_path};
pub use catalog::StyleCatalog;
pub use compose::{Composer, DEFAULT_VIEW_BOX, Preview, strip_svg_wrapper};
pub use config::AvatarConfig;
pub use delivery::{DEFAULT_MODAL_AGENTS, DeliveryMode, DeliverySink, FileSink, MODAL_PAGE};
pub use editor::{AvatarEditor, ExportState, PreviewRequest, SelectionControl};
pub use error::{
    AssetError, ConfigError, DeliveryError, DownloadError, ExportError, SettingsError,
};
pub use export::{
    DEFAULT_PREVIEW_SIZE, ExportArtifact, Exporter, ImageFormat, UnknownFormat, file_name_at,
};
pub use options::EditorOptions;
pub use part::{AvatarPart, UnknownPart};
