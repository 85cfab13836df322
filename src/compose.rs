//! Composition of part fragments into a single preview SVG.
//!
//! Every fragment is a standalone SVG document drawn on the same canvas. The
//! composer strips each fragment's outer `<svg>` element, wraps the content in
//! a `<g id="notion-avatar-<part>">` group and stacks the groups in layering
//! order inside one root `<svg>`.

use futures_util::future::join_all;

use crate::asset::AssetSource;
use crate::config::AvatarConfig;
use crate::part::AvatarPart;

/// Default edge length of the composite view box.
pub const DEFAULT_VIEW_BOX: u32 = 1080;

// ============================================================================
// Preview
// ============================================================================

/// A composed avatar preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// The composite SVG document.
    pub markup: String,

    /// The configuration this preview was composed from.
    pub config: AvatarConfig,

    /// Editor generation at the time composition started.
    pub generation: u64,

    /// Parts whose fragment failed to load and were left empty.
    pub missing: Vec<AvatarPart>,
}

impl Preview {
    /// Returns true if the markup contains a root `<svg>` element.
    pub fn has_vector_root(&self) -> bool {
        self.markup.contains("<svg")
    }
}

// ============================================================================
// Composer
// ============================================================================

/// Builds composite previews from an [`AssetSource`].
#[derive(Debug, Clone, Copy)]
pub struct Composer {
    view_box: u32,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_BOX)
    }
}

impl Composer {
    pub fn new(view_box: u32) -> Self {
        Self { view_box }
    }

    pub fn view_box(&self) -> u32 {
        self.view_box
    }

    /// Loads every configured fragment concurrently and composes them.
    ///
    /// Fragments that fail to load become empty groups and are listed in
    /// [`Preview::missing`].
    pub async fn compose<A: AssetSource>(
        &self,
        assets: &A,
        config: &AvatarConfig,
        generation: u64,
    ) -> Preview {
        let loads = config.iter().map(|(part, index)| async move {
            let result = assets.fragment(part, index).await;
            (part, result)
        });

        // join_all preserves input order, so layers stay keyed by part.
        let mut missing = Vec::new();
        let layers: Vec<(AvatarPart, String)> = join_all(loads)
            .await
            .into_iter()
            .map(|(part, result)| match result {
                Ok(svg) => (part, strip_svg_wrapper(&svg).to_string()),
                Err(e) => {
                    tracing::warn!(%part, error = %e, "fragment unavailable, leaving layer empty");
                    missing.push(part);
                    (part, String::new())
                }
            })
            .collect();

        Preview {
            markup: self.assemble(&layers),
            config: config.clone(),
            generation,
            missing,
        }
    }

    /// Wraps already-stripped layer bodies into the composite document.
    pub fn assemble(&self, layers: &[(AvatarPart, String)]) -> String {
        let groups: Vec<String> = layers
            .iter()
            .map(|(part, body)| format!("<g id=\"{}\">{}</g>", part.group_id(), body))
            .collect();

        let document = format!(
            "<svg viewBox=\"0 0 {size} {size}\" fill=\"none\" xmlns=\"http://www.w3.org/2000/svg\">{}</svg>",
            groups.join(""),
            size = self.view_box,
        );
        document.replace(['\n', '\r', '\t'], "")
    }
}

// ============================================================================
// Fragment Helpers
// ============================================================================

/// Removes the outer `<svg ...>` and `</svg>` tags of a fragment, along with
/// anything before the opening tag (XML prolog, comments).
///
/// Input without an `<svg` tag is returned unchanged.
pub fn strip_svg_wrapper(svg: &str) -> &str {
    let Some(start) = svg.find("<svg") else {
        return svg;
    };
    let Some(tag_len) = opening_tag_len(&svg[start..]) else {
        return "";
    };
    let open_tag = &svg[start..start + tag_len];
    if open_tag.ends_with("/>") {
        return "";
    }

    let body = &svg[start + tag_len..];
    match body.rfind("</svg>") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Returns the byte length of the opening tag at the start of `s`, honoring
/// quoted attribute values. `None` if the tag is never closed.
fn opening_tag_len(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MemoryAssets;

    const FRAGMENT: &str = "<?xml version=\"1.0\"?>\n<svg width=\"1080\" height=\"1080\" viewBox=\"0 0 1080 1080\" data-note=\"a>b\">\n\t<path d=\"M1 1\"/>\n</svg>\n";

    #[test]
    fn strips_outer_wrapper() {
        assert_eq!(strip_svg_wrapper(FRAGMENT), "<path d=\"M1 1\"/>");
    }

    #[test]
    fn strip_handles_degenerate_input() {
        assert_eq!(strip_svg_wrapper("<svg/>"), "");
        assert_eq!(strip_svg_wrapper("<svg width=\"1\""), "");
        assert_eq!(strip_svg_wrapper("<circle r=\"1\"/>"), "<circle r=\"1\"/>");
        assert_eq!(strip_svg_wrapper("<svg><g/>"), "<g/>");
    }

    #[test]
    fn assemble_orders_groups_and_flattens() {
        let composer = Composer::default();
        let markup = composer.assemble(&[
            (AvatarPart::Face, "<path/>\n".to_string()),
            (AvatarPart::Hair, "\t<circle/>".to_string()),
        ]);

        assert!(markup.starts_with("<svg viewBox=\"0 0 1080 1080\""));
        assert!(!markup.contains('\n'));
        assert!(!markup.contains('\t'));
        let face = markup.find("notion-avatar-face").unwrap();
        let hair = markup.find("notion-avatar-hair").unwrap();
        assert!(face < hair);
    }

    #[tokio::test]
    async fn compose_leaves_missing_layers_empty() {
        let assets = MemoryAssets::new().with_fragment(AvatarPart::Face, 2, FRAGMENT);
        let config = AvatarConfig::new()
            .with(AvatarPart::Face, 2)
            .with(AvatarPart::Hair, 9);

        let preview = Composer::new(512).compose(&assets, &config, 4).await;

        assert_eq!(preview.generation, 4);
        assert_eq!(preview.missing, vec![AvatarPart::Hair]);
        assert!(preview.has_vector_root());
        assert!(preview.markup.contains("viewBox=\"0 0 512 512\""));
        assert!(
            preview
                .markup
                .contains("<g id=\"notion-avatar-face\"><path d=\"M1 1\"/></g>")
        );
        assert!(preview.markup.contains("<g id=\"notion-avatar-hair\"></g>"));
    }
}
