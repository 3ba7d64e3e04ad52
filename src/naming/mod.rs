//! Derived-value generation: the deterministic mapping from a spec record to
//! preview filenames and the review-format summary. Everything here is a pure
//! function of its input; the CLI recomputes on every change.

use crate::model::{MediaReview, VfxDeliveries, VfxPulls};

/// Padding token used when the record does not provide one.
pub const DEFAULT_FRAME_PADDING: &str = "####";

/// Pulls are EXR-first by convention, so an unknown or missing file format
/// resolves to this rather than failing.
pub const DEFAULT_EXTENSION: &str = "exr";

/// Fixed caption reported alongside the review summary; color space is
/// deliberately not part of the summary sentence itself.
pub const COLOR_WORKFLOW_CAPTION: &str =
    "Color Workflow: CDL applied before Show LUT baked in Rec709";

/// Placeholder shown when no review field is filled in.
pub const EMPTY_SUMMARY: &str = "Configure settings above to see summary.";

/// Whether a field contributes to a generated name: present and non-blank
/// after trimming. Every composer goes through this one predicate so naming
/// and summary logic can never disagree about blankness.
pub fn included(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Numeric fields count as provided whenever they are present; zero is a
/// value, not a blank.
pub fn included_number(value: Option<i64>) -> bool {
    value.is_some()
}

/// Known extension hints in priority order; the first one found anywhere in
/// the file-format label wins.
const EXTENSION_PATTERNS: &[(&str, &str)] = &[
    (".exr", "exr"),
    (".tiff", "tiff"),
    (".png", "png"),
    (".jpg", "jpg"),
    (".dpx", "dpx"),
    (".cin", "cin"),
];

/// Resolve a file-format label like "OpenEXR (.exr)" to a bare extension.
pub fn extension_for(label: Option<&str>) -> &'static str {
    let Some(label) = label else {
        return DEFAULT_EXTENSION;
    };
    EXTENSION_PATTERNS
        .iter()
        .find(|(pattern, _)| label.contains(*pattern))
        .map(|(_, ext)| *ext)
        .unwrap_or(DEFAULT_EXTENSION)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Artifact {
    VfxPulls,
    VfxDeliveries,
}

impl Artifact {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "vfxPulls" | "pulls" => Some(Artifact::VfxPulls),
            "vfxDeliveries" | "deliveries" => Some(Artifact::VfxDeliveries),
            _ => None,
        }
    }
}

/// Borrowed view over the naming fields the composer reads. Deliveries do not
/// carry padding or file format of their own, so callers build the merged
/// view explicitly; the composer never reaches across records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingView<'a> {
    pub show_id: Option<&'a str>,
    pub episode: Option<&'a str>,
    pub sequence: Option<&'a str>,
    pub scene: Option<&'a str>,
    pub shot_id: Option<&'a str>,
    pub plate: Option<&'a str>,
    pub identifier: Option<&'a str>,
    pub task: Option<&'a str>,
    pub vendor_code_name: Option<&'a str>,
    pub version: Option<&'a str>,
    pub frame_padding: Option<&'a str>,
    pub file_format: Option<&'a str>,
}

impl<'a> NamingView<'a> {
    pub fn from_pulls(pulls: &'a VfxPulls) -> Self {
        NamingView {
            show_id: pulls.show_id.as_deref(),
            episode: pulls.episode.as_deref(),
            sequence: pulls.sequence.as_deref(),
            scene: pulls.scene.as_deref(),
            shot_id: pulls.shot_id.as_deref(),
            plate: pulls.plate.as_deref(),
            identifier: pulls.identifier.as_deref(),
            version: pulls.version.as_deref(),
            frame_padding: pulls.frame_padding.as_deref(),
            file_format: pulls.file_format.as_deref(),
            ..NamingView::default()
        }
    }

    /// Delivery naming fields merged with the pulls padding/file format.
    pub fn merged(deliveries: &'a VfxDeliveries, pulls: &'a VfxPulls) -> Self {
        NamingView {
            show_id: deliveries.show_id.as_deref(),
            episode: deliveries.episode.as_deref(),
            sequence: deliveries.sequence.as_deref(),
            scene: deliveries.scene.as_deref(),
            shot_id: deliveries.shot_id.as_deref(),
            task: deliveries.task.as_deref(),
            vendor_code_name: deliveries.vendor_code_name.as_deref(),
            version: deliveries.version.as_deref(),
            frame_padding: pulls.frame_padding.as_deref(),
            file_format: pulls.file_format.as_deref(),
            ..NamingView::default()
        }
    }
}

/// Compose the `base.padding.extension` preview filename for an artifact.
///
/// Segments are appended in a fixed order, skipping anything the inclusion
/// policy rejects. When every segment is excluded the result degrades to
/// ".{padding}.{ext}"; downstream consumers rely on that exact form, so it is
/// not guarded against.
pub fn compose_filename(artifact: Artifact, view: &NamingView) -> String {
    fn push(segments: &mut Vec<String>, value: Option<&str>) {
        if included(value) {
            if let Some(v) = value {
                segments.push(v.to_string());
            }
        }
    }

    let mut segments: Vec<String> = Vec::new();
    push(&mut segments, view.show_id);
    push(&mut segments, view.episode);
    push(&mut segments, view.sequence);
    push(&mut segments, view.scene);
    push(&mut segments, view.shot_id);

    match artifact {
        Artifact::VfxPulls => {
            // Vendor convention writes plate and identifier as one token
            // ("PL01"), the only segment without an underscore between parts.
            if included(view.plate) && included(view.identifier) {
                if let (Some(plate), Some(identifier)) = (view.plate, view.identifier) {
                    segments.push(format!("{plate}{identifier}"));
                }
            }
        }
        Artifact::VfxDeliveries => {
            push(&mut segments, view.task);
            push(&mut segments, view.vendor_code_name);
        }
    }

    push(&mut segments, view.version);

    let base = segments.join("_");
    let padding = if included(view.frame_padding) {
        view.frame_padding.unwrap_or(DEFAULT_FRAME_PADDING)
    } else {
        DEFAULT_FRAME_PADDING
    };
    let extension = extension_for(view.file_format);

    format!("{base}.{padding}.{extension}")
}

/// Build the human-readable review format summary sentence.
pub fn compose_review_summary(review: &MediaReview) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(container) = review.container.as_deref() {
        if included(Some(container)) {
            parts.push(container.to_uppercase());
        }
    }
    if let Some(codec) = review.video_codec.as_deref() {
        if included(Some(codec)) {
            parts.push(codec.to_string());
        }
    }
    if let Some(resolution) = review.resolution.as_deref() {
        if included(Some(resolution)) {
            parts.push(resolution.to_string());
        }
    }
    if let Some(aspect) = review.aspect_ratio.as_deref() {
        if included(Some(aspect)) {
            parts.push(format!("aspect ratio {aspect}"));
        }
    }
    if let Some(letterboxing) = review.letterboxing.as_deref() {
        if included(Some(letterboxing)) {
            parts.push(format!("widescreen content of {letterboxing}"));
        }
    }
    if let Some(rate) = review.frame_rate.as_deref() {
        if included(Some(rate)) {
            parts.push(format!("at {rate} fps"));
        }
    }

    if parts.is_empty() {
        EMPTY_SUMMARY.to_string()
    } else {
        format!("{}.", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulls_naming() -> VfxPulls {
        VfxPulls {
            show_id: Some("AAA".to_string()),
            episode: Some("101".to_string()),
            shot_id: Some("0010".to_string()),
            plate: Some("PL".to_string()),
            identifier: Some("01".to_string()),
            version: Some("v001".to_string()),
            ..VfxPulls::default()
        }
    }

    #[test]
    fn test_included_policy() {
        assert!(included(Some("AAA")));
        assert!(included(Some("  x  ")));
        assert!(!included(Some("")));
        assert!(!included(Some("   ")));
        assert!(!included(None));
        assert!(included_number(Some(0)));
        assert!(!included_number(None));
    }

    #[test]
    fn test_extension_for_known_labels() {
        assert_eq!(extension_for(Some("OpenEXR (.exr)")), "exr");
        assert_eq!(extension_for(Some("TIFF (.tiff)")), "tiff");
        assert_eq!(extension_for(Some("DPX (.dpx)")), "dpx");
        assert_eq!(extension_for(Some("Cineon (.cin)")), "cin");
    }

    #[test]
    fn test_extension_for_falls_back_to_exr() {
        assert_eq!(extension_for(Some("")), "exr");
        assert_eq!(extension_for(Some("unknown format")), "exr");
        assert_eq!(extension_for(None), "exr");
    }

    #[test]
    fn test_pulls_filename_with_plate_identifier_concat() {
        let pulls = pulls_naming();
        let view = NamingView::from_pulls(&pulls);
        assert_eq!(
            compose_filename(Artifact::VfxPulls, &view),
            "AAA_101_0010_PL01_v001.####.exr"
        );
    }

    #[test]
    fn test_plate_without_identifier_is_dropped() {
        let mut pulls = pulls_naming();
        pulls.identifier = Some("  ".to_string());
        let view = NamingView::from_pulls(&pulls);
        assert_eq!(
            compose_filename(Artifact::VfxPulls, &view),
            "AAA_101_0010_v001.####.exr"
        );
    }

    #[test]
    fn test_optional_sequence_and_scene_included_in_order() {
        let mut pulls = pulls_naming();
        pulls.sequence = Some("010".to_string());
        pulls.scene = Some("020".to_string());
        pulls.frame_padding = Some("%04d".to_string());
        pulls.file_format = Some("TIFF (.tiff)".to_string());
        let view = NamingView::from_pulls(&pulls);
        assert_eq!(
            compose_filename(Artifact::VfxPulls, &view),
            "AAA_101_010_020_0010_PL01_v001.%04d.tiff"
        );
    }

    #[test]
    fn test_deliveries_filename_from_merged_view() {
        let deliveries = VfxDeliveries {
            show_id: Some("AAA".to_string()),
            episode: Some("101".to_string()),
            shot_id: Some("0010".to_string()),
            task: Some("comp".to_string()),
            vendor_code_name: Some("VEND".to_string()),
            version: Some("v001".to_string()),
            ..VfxDeliveries::default()
        };
        let pulls = VfxPulls {
            frame_padding: Some("####".to_string()),
            file_format: Some("OpenEXR (.exr)".to_string()),
            ..VfxPulls::default()
        };
        let view = NamingView::merged(&deliveries, &pulls);
        assert_eq!(
            compose_filename(Artifact::VfxDeliveries, &view),
            "AAA_101_0010_comp_VEND_v001.####.exr"
        );
    }

    #[test]
    fn test_all_segments_excluded_degrades_but_keeps_shape() {
        let view = NamingView::default();
        let filename = compose_filename(Artifact::VfxPulls, &view);
        assert_eq!(filename, ".####.exr");
        // base.padding.extension shape holds even with an empty base
        let parts: Vec<&str> = filename.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(!parts[1].is_empty());
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_compose_is_pure_and_idempotent() {
        let pulls = pulls_naming();
        let view = NamingView::from_pulls(&pulls);
        let first = compose_filename(Artifact::VfxPulls, &view);
        let second = compose_filename(Artifact::VfxPulls, &view);
        assert_eq!(first, second);
    }

    #[test]
    fn test_review_summary_full_sentence() {
        let review = MediaReview {
            container: Some("mov".to_string()),
            video_codec: Some("ProRes 422 HQ".to_string()),
            resolution: Some("1920x1080".to_string()),
            aspect_ratio: Some("2.39:1".to_string()),
            letterboxing: Some("1920x810".to_string()),
            frame_rate: Some("23.976".to_string()),
            color_space: Some("Rec709".to_string()),
            ..MediaReview::default()
        };
        assert_eq!(
            compose_review_summary(&review),
            "MOV, ProRes 422 HQ, 1920x1080, aspect ratio 2.39:1, \
             widescreen content of 1920x810, at 23.976 fps."
        );
    }

    #[test]
    fn test_review_summary_partial() {
        let review = MediaReview {
            container: Some("mov".to_string()),
            frame_rate: Some("23.976".to_string()),
            ..MediaReview::default()
        };
        assert_eq!(compose_review_summary(&review), "MOV, at 23.976 fps.");
    }

    #[test]
    fn test_review_summary_ignores_color_space() {
        let review = MediaReview {
            color_space: Some("Rec709, CDL and Show LUT Baked in".to_string()),
            ..MediaReview::default()
        };
        assert_eq!(compose_review_summary(&review), EMPTY_SUMMARY);
    }

    #[test]
    fn test_review_summary_placeholder_on_blank_record() {
        assert_eq!(compose_review_summary(&MediaReview::default()), EMPTY_SUMMARY);
    }
}
