pub mod camera;
pub mod options;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Processed logo image, produced by the logo-processing service.
/// Carried opaquely: the core never inspects the data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LetterheadInfo {
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub logo: Option<Logo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInfo {
    pub document_version: Option<String>,
    pub project_date: Option<String>,
    pub project_title: Option<String>,
    pub project_code_name: Option<String>,
    pub project_format: Option<String>,
    pub client: Option<String>,
    pub client_logo: Option<Logo>,
    pub director: Option<String>,
    pub dop: Option<String>,
    pub production_company: Option<String>,
    pub production_company_logo: Option<Logo>,
    pub post_production_supervisor: Option<String>,
    pub lab: Option<String>,
    pub lab_logo: Option<Logo>,
    pub colorist: Option<String>,
    pub vfx_supervisor: Option<String>,
    pub vfx_on_set_supervisor: Option<String>,
    pub vfx_vendor: Option<String>,
    pub vfx_vendor_logo: Option<Logo>,
    pub vendor_code_name: Option<String>,
    pub vfx_documents_link: Option<String>,
    pub project_frame_rate: Option<String>,
    pub color_science: Option<String>,
    /// Free-text override, meaningful when `color_science` is "Custom".
    pub custom_color_science: Option<String>,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraFormat {
    pub id: i64,
    pub camera_id: Option<String>,
    pub source_camera: Option<String>,
    pub codec: Option<String>,
    pub sensor_mode: Option<String>,
    pub lens_squeeze_factor: Option<String>,
    pub color_space: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VfxPulls {
    pub file_format: Option<String>,
    pub compression: Option<String>,
    pub resolution: Option<String>,
    pub color_space: Option<String>,
    pub bit_depth: Option<String>,
    /// Head/tail handles per side; the document reports 2x this value total.
    pub frame_handles: Option<i64>,
    pub frame_padding: Option<String>,
    pub vfx_luts_link: Option<String>,
    pub show_id: Option<String>,
    pub episode: Option<String>,
    pub sequence: Option<String>,
    pub scene: Option<String>,
    pub shot_id: Option<String>,
    pub plate: Option<String>,
    pub identifier: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaReview {
    pub container: Option<String>,
    pub video_codec: Option<String>,
    pub resolution: Option<String>,
    pub aspect_ratio: Option<String>,
    pub letterboxing: Option<String>,
    pub frame_rate: Option<String>,
    pub color_space: Option<String>,
    pub slate_overlays_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VfxDeliveries {
    pub show_id: Option<String>,
    pub episode: Option<String>,
    pub sequence: Option<String>,
    pub scene: Option<String>,
    pub shot_id: Option<String>,
    pub task: Option<String>,
    pub vendor_code_name: Option<String>,
    pub version: Option<String>,
}

/// The full specification document. Field names serialize to the camelCase
/// JSON shape the original web tool produced, so existing documents load
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecRecord {
    pub letterhead_info: LetterheadInfo,
    pub project_info: ProjectInfo,
    pub camera_formats: Vec<CameraFormat>,
    pub vfx_pulls: VfxPulls,
    pub media_review: MediaReview,
    pub vfx_deliveries: VfxDeliveries,
}

impl SpecRecord {
    /// A new record with production-default seed values: one Alexa 35 camera
    /// entry and the naming/review defaults every show starts from.
    pub fn seed() -> Self {
        SpecRecord {
            letterhead_info: LetterheadInfo::default(),
            project_info: ProjectInfo {
                document_version: Some("v1.0".to_string()),
                ..ProjectInfo::default()
            },
            camera_formats: vec![CameraFormat {
                id: 1,
                camera_id: Some("Camera A".to_string()),
                source_camera: Some("Arri Alexa 35".to_string()),
                codec: Some("Arri Raw (HDE)".to_string()),
                sensor_mode: Some("Open Gate (4608 x 3164)".to_string()),
                lens_squeeze_factor: Some("1:1".to_string()),
                color_space: Some("ARRI - LogC4/AWG4".to_string()),
            }],
            vfx_pulls: VfxPulls {
                frame_handles: Some(8),
                frame_padding: Some("####".to_string()),
                plate: Some("PL".to_string()),
                identifier: Some("01".to_string()),
                version: Some("v001".to_string()),
                ..VfxPulls::default()
            },
            media_review: MediaReview {
                container: Some("mov".to_string()),
                video_codec: Some("ProRes 422 HQ".to_string()),
                aspect_ratio: Some("2.20:1".to_string()),
                letterboxing: Some("1920x872".to_string()),
                color_space: Some("Rec709, CDL and Show LUT Baked in".to_string()),
                ..MediaReview::default()
            },
            vfx_deliveries: VfxDeliveries {
                task: Some("comp".to_string()),
                version: Some("v001".to_string()),
                ..VfxDeliveries::default()
            },
        }
    }

    /// Apply a JSON merge patch and return the patched record. The record is
    /// round-tripped through `serde_json::Value` so the patch can address any
    /// field by its camelCase name; deserialization is the construction
    /// boundary where unknown shapes are rejected.
    pub fn apply_patch(&self, patch: &serde_json::Value) -> Result<SpecRecord> {
        let mut value = serde_json::to_value(self).context("Failed to serialize record")?;
        merge_patch(&mut value, patch);
        serde_json::from_value(value).context("Patch produced a malformed record")
    }
}

/// Build a one-field merge patch from a dotted path, e.g.
/// `("vfxPulls.showId", "AAA")` -> `{"vfxPulls": {"showId": "AAA"}}`.
pub fn patch_from_path(path: &str, value: serde_json::Value) -> serde_json::Value {
    let mut patch = value;
    for key in path.rsplit('.') {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(key.to_string(), patch);
        patch = serde_json::Value::Object(wrapper);
    }
    patch
}

/// RFC 7386-style merge: objects merge recursively, null removes, anything
/// else replaces.
pub fn merge_patch(target: &mut serde_json::Value, patch: &serde_json::Value) {
    if let serde_json::Value::Object(entries) = patch {
        if !target.is_object() {
            *target = serde_json::Value::Object(serde_json::Map::new());
        }
        if let serde_json::Value::Object(map) = target {
            for (key, patch_value) in entries {
                if patch_value.is_null() {
                    map.remove(key);
                } else {
                    merge_patch(
                        map.entry(key.clone()).or_insert(serde_json::Value::Null),
                        patch_value,
                    );
                }
            }
        }
    } else {
        *target = patch.clone();
    }
}
