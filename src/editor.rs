//! The avatar editor: configuration state, preview and export flow.

use std::sync::Arc;

use rand::Rng;

use crate::analytics::{Analytics, AnalyticsEvent, DOWNLOAD_ACTION, TracingAnalytics};
use crate::asset::{AssetSource, thumbnail_path};
use crate::catalog::StyleCatalog;
use crate::compose::{Composer, Preview};
use crate::config::AvatarConfig;
use crate::delivery::{DeliveryMode, DeliverySink};
use crate::error::{ConfigError, DownloadError, ExportError};
use crate::export::ImageFormat;
use crate::options::EditorOptions;
use crate::part::AvatarPart;

// ============================================================================
// SelectionControl
// ============================================================================

/// The per-part control that cycles through styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionControl {
    pub part: AvatarPart,

    /// Currently selected style.
    pub index: u32,

    /// Asset-root-relative path of the current style's thumbnail.
    pub thumbnail: String,

    /// Translation key for the control's tooltip.
    pub tooltip: &'static str,
}

// ============================================================================
// ExportState
// ============================================================================

/// Progress of a download request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Capturing,
    DeliveringModal,
    DeliveringDownload,
}

// ============================================================================
// PreviewRequest
// ============================================================================

/// A pending composition, detached from the editor.
///
/// Obtained from [`AvatarEditor::preview_request`]. Running it does not borrow
/// the editor, so the configuration may change while it is in flight; the
/// result is then rejected by [`AvatarEditor::commit_preview`].
pub struct PreviewRequest<A> {
    assets: Arc<A>,
    composer: Composer,
    config: AvatarConfig,
    generation: u64,
}

impl<A: AssetSource> PreviewRequest<A> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Loads all fragments and composes the preview.
    pub async fn run(self) -> Preview {
        tracing::debug!(generation = self.generation, "composing preview");
        self.composer
            .compose(self.assets.as_ref(), &self.config, self.generation)
            .await
    }
}

// ============================================================================
// AvatarEditor
// ============================================================================

/// Interactive avatar editor.
///
/// Every configuration change (cycle, randomize, set) bumps a generation
/// counter. Previews are tagged with the generation they were composed from,
/// and only a preview of the current generation can be committed.
///
/// # Example
///
/// ```
/// use notion_avatar::{AvatarEditor, AvatarPart, MemoryAssets, StyleCatalog};
///
/// let catalog = StyleCatalog::new().with_part(AvatarPart::Face, 0);
/// let assets = MemoryAssets::new()
///     .with_fragment(AvatarPart::Face, 0, r#"<svg viewBox="0 0 1080 1080"><circle r="9"/></svg>"#);
/// let mut editor = AvatarEditor::new(assets, catalog);
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let preview = editor.refresh().await;
/// assert!(preview.markup.contains("notion-avatar-face"));
/// # });
/// ```
pub struct AvatarEditor<A, T = TracingAnalytics> {
    assets: Arc<A>,
    catalog: StyleCatalog,
    options: EditorOptions,
    config: AvatarConfig,
    generation: u64,
    preview: Option<Preview>,
    export_state: ExportState,
    analytics: T,
}

impl<A: AssetSource> AvatarEditor<A> {
    /// Creates an editor with a random configuration and default options.
    pub fn new(assets: A, catalog: StyleCatalog) -> Self {
        let config = AvatarConfig::random(&catalog);
        Self {
            assets: Arc::new(assets),
            catalog,
            options: EditorOptions::default(),
            config,
            generation: 0,
            preview: None,
            export_state: ExportState::Idle,
            analytics: TracingAnalytics,
        }
    }
}

impl<A: AssetSource, T: Analytics> AvatarEditor<A, T> {
    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the analytics sink.
    pub fn with_analytics<U: Analytics>(self, analytics: U) -> AvatarEditor<A, U> {
        AvatarEditor {
            assets: self.assets,
            catalog: self.catalog,
            options: self.options,
            config: self.config,
            generation: self.generation,
            preview: self.preview,
            export_state: self.export_state,
            analytics,
        }
    }

    /// Starts from the given configuration instead of a random one.
    pub fn with_config(mut self, config: AvatarConfig) -> Result<Self, ConfigError> {
        self.set_config(config)?;
        Ok(self)
    }

    pub fn config(&self) -> &AvatarConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn analytics(&self) -> &T {
        &self.analytics
    }

    /// The last committed preview, if any.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Number of configuration changes so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn export_state(&self) -> ExportState {
        self.export_state
    }

    /// Returns true if the committed preview reflects the current configuration.
    pub fn is_preview_current(&self) -> bool {
        self.preview
            .as_ref()
            .is_some_and(|p| p.generation == self.generation)
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    // ---- Configuration ----

    /// Advances a part to its next style, wrapping after the last one.
    ///
    /// Returns the new index, or `None` if the part is not in the catalog.
    pub fn cycle(&mut self, part: AvatarPart) -> Option<u32> {
        let index = self.config.advance(part, &self.catalog)?;
        self.bump_generation();
        tracing::debug!(%part, index, generation = self.generation, "cycled style");
        Some(index)
    }

    /// Replaces the configuration with a random one.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    /// Replaces the configuration with a random one drawn from `rng`.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        self.config = AvatarConfig::random_with(&self.catalog, rng);
        self.bump_generation();
    }

    /// Replaces the configuration after checking it against the catalog.
    pub fn set_config(&mut self, config: AvatarConfig) -> Result<(), ConfigError> {
        config.validate(&self.catalog)?;
        self.config = config;
        self.bump_generation();
        Ok(())
    }

    /// One selection control per part, in layering order.
    pub fn controls(&self) -> Vec<SelectionControl> {
        self.config
            .iter()
            .map(|(part, index)| SelectionControl {
                part,
                index,
                thumbnail: thumbnail_path(part, index),
                tooltip: part.as_str(),
            })
            .collect()
    }

    // ---- Preview ----

    /// Captures the current configuration for composition.
    pub fn preview_request(&self) -> PreviewRequest<A> {
        PreviewRequest {
            assets: Arc::clone(&self.assets),
            composer: self.options.composer(),
            config: self.config.clone(),
            generation: self.generation,
        }
    }

    /// Stores a composed preview unless a newer configuration has superseded it.
    ///
    /// Returns true if the preview was accepted.
    pub fn commit_preview(&mut self, preview: Preview) -> bool {
        if preview.generation != self.generation {
            tracing::debug!(
                stale = preview.generation,
                current = self.generation,
                "discarding stale preview"
            );
            return false;
        }
        tracing::debug!(generation = preview.generation, "preview committed");
        self.preview = Some(preview);
        true
    }

    /// Composes and commits a preview of the current configuration.
    pub async fn refresh(&mut self) -> &Preview {
        // Holding `&mut self` keeps the generation fixed, so no staleness check.
        let preview = self.preview_request().run().await;
        self.preview.insert(preview)
    }

    // ---- Export ----

    /// Exports the committed preview and delivers it.
    ///
    /// Records one analytics event per call. Returns the delivery path taken,
    /// or `None` if there was no preview to capture.
    pub fn download(
        &mut self,
        format: ImageFormat,
        user_agent: &str,
        sink: &mut dyn DeliverySink,
    ) -> Result<Option<DeliveryMode>, DownloadError> {
        let result = self.run_download(format, user_agent, sink);
        self.export_state = ExportState::Idle;
        result
    }

    fn run_download(
        &mut self,
        format: ImageFormat,
        user_agent: &str,
        sink: &mut dyn DeliverySink,
    ) -> Result<Option<DeliveryMode>, DownloadError> {
        self.export_state = ExportState::Capturing;
        self.analytics
            .event(AnalyticsEvent::new(DOWNLOAD_ACTION, self.config.clone()));

        let Some(preview) = self.preview.as_ref() else {
            tracing::debug!("no preview composed, nothing to export");
            return Ok(None);
        };
        let artifact = match self.options.exporter().export(preview, format) {
            Ok(artifact) => artifact,
            Err(ExportError::MissingVectorRoot) => {
                tracing::debug!("preview has no vector root, nothing to export");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mode = DeliveryMode::for_user_agent(user_agent, self.options.modal_agents.as_slice());
        tracing::info!(?mode, %format, file = %artifact.file_name, "delivering avatar");
        match mode {
            DeliveryMode::Modal => {
                self.export_state = ExportState::DeliveringModal;
                sink.show_modal(&artifact)?;
            }
            DeliveryMode::Download => {
                self.export_state = ExportState::DeliveringDownload;
                sink.trigger_download(&artifact)?;
            }
        }
        Ok(Some(mode))
    }
}
