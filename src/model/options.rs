//! Closed option sets for every enum-typed field, and record validation
//! against them. The original tool only constrained these values through UI
//! dropdowns; here the sets are part of the model and any non-blank value
//! arriving from outside is checked at the construction boundary.

use thiserror::Error;

use super::SpecRecord;
use crate::naming::included;

pub const PROJECT_FORMAT: &[&str] = &[
    "Feature Film",
    "Episodic",
    "Commercial",
    "Music Video",
    "Documentary",
    "Short Film",
];

pub const FRAME_RATE: &[&str] = &[
    "23.976fps", "24fps", "25fps", "29.97fps", "30fps", "50fps", "59.94fps", "60fps",
];

pub const COLOR_SCIENCE: &[&str] = &[
    "ACES 1.3", "ACES 1.2", "ACES 1.1", "ACES 1.0", "Rec. 709", "DCI-P3", "Adobe RGB", "Custom",
];

pub const SOURCE_CAMERA: &[&str] = &[
    "Arri Alexa 35",
    "Arri Alexa Mini",
    "Arri Alexa Mini LF",
    "Arri Alexa LF",
    "RED V-Raptor",
    "RED Komodo",
    "Sony FX9",
    "Sony FX6",
    "Canon C300 Mark III",
    "Canon C500 Mark II",
    "Blackmagic URSA Mini Pro 12K",
];

pub const CODEC: &[&str] = &[
    "Arri Raw (HDE)",
    "ProRes 4444 XQ",
    "ProRes 4444",
    "ProRes 422 HQ",
    "ProRes 422",
    "ProRes 422 LT",
    "ProRes 422 Proxy",
    "RED Raw",
    "BRAW",
    "XAVC-I",
    "DNxHR 444",
    "DNxHR HQX",
    "DNxHR HQ",
];

pub const SENSOR_MODE: &[&str] = &[
    "Open Gate (4608 x 3164)",
    "UHD (3840 x 2160)",
    "2.39:1 (4448 x 1856)",
    "16:9 (3840 x 2160)",
    "4:3 (4096 x 3072)",
    "Full Frame (4096 x 3072)",
    "S35 (3424 x 2202)",
    "2K (2048 x 1080)",
];

pub const LENS_SQUEEZE_FACTOR: &[&str] =
    &["1:1", "1.25:1", "1.33:1", "1.5:1", "1.65:1", "1.8:1", "2:1"];

pub const CAMERA_COLOR_SPACE: &[&str] = &[
    "ARRI - LogC4/AWG4",
    "ARRI - LogC3/AWG3",
    "RED - Log3G10/REDWideGamutRGB",
    "Sony - S-Log3/S-Gamut3.Cine",
    "Canon - C-Log3/Cinema Gamut",
    "Blackmagic - Film/Wide Gamut",
    "Rec. 709",
    "sRGB",
];

pub const VFX_FILE_FORMAT: &[&str] = &[
    "OpenEXR (.exr)",
    "TIFF (.tiff)",
    "PNG (.png)",
    "JPEG (.jpg)",
    "DPX (.dpx)",
    "Cineon (.cin)",
];

pub const COMPRESSION: &[&str] = &[
    "ZIP", "ZIP1", "ZIP16", "PIZ", "RLE", "PXR24", "B44", "B44A", "DWAA", "DWAB", "None",
];

pub const VFX_COLOR_SPACE: &[&str] = &[
    "ACEScg",
    "ACEScct",
    "ACEScc",
    "ACES2065-1 (AP0)",
    "Rec. 709",
    "sRGB",
    "Adobe RGB",
    "P3-D65",
    "Rec. 2020",
];

pub const BIT_DEPTH: &[&str] = &[
    "16-bit half float",
    "32-bit float",
    "10-bit",
    "12-bit",
    "16-bit integer",
];

pub const FRAME_PADDING: &[&str] = &["####", "#####", "######", "%04d", "%05d", "%06d"];

pub const PLATE: &[&str] = &["PL", "CP", "EL", "RF", "GS", "CC", "LG"];

pub const TASKS: &[&str] = &["comp", "precomp", "anim", "mm", "matte", "dmatte", "mp"];

pub const CONTAINER: &[&str] = &["mov", "mp4", "avi", "mxf", "mkv"];

pub const VIDEO_CODEC: &[&str] = &[
    "ProRes 4444 XQ",
    "ProRes 4444",
    "ProRes 422 HQ",
    "ProRes 422",
    "ProRes 422 LT",
    "ProRes 422 Proxy",
    "DNxHR 444",
    "DNxHR HQX",
    "DNxHR HQ",
    "H.264",
    "H.265/HEVC",
];

/// Every named option set, for the `options` command.
pub fn all_sets() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("projectFormat", PROJECT_FORMAT),
        ("frameRate", FRAME_RATE),
        ("colorScience", COLOR_SCIENCE),
        ("sourceCamera", SOURCE_CAMERA),
        ("codec", CODEC),
        ("sensorMode", SENSOR_MODE),
        ("lensSqueezeFactor", LENS_SQUEEZE_FACTOR),
        ("cameraColorSpace", CAMERA_COLOR_SPACE),
        ("vfxFileFormat", VFX_FILE_FORMAT),
        ("compression", COMPRESSION),
        ("vfxColorSpace", VFX_COLOR_SPACE),
        ("bitDepth", BIT_DEPTH),
        ("framePadding", FRAME_PADDING),
        ("plate", PLATE),
        ("tasks", TASKS),
        ("container", CONTAINER),
        ("videoCodec", VIDEO_CODEC),
    ]
}

/// Look up an option set by its field name.
pub fn option_set(name: &str) -> Option<&'static [&'static str]> {
    all_sets()
        .iter()
        .find(|(set_name, _)| *set_name == name)
        .map(|(_, values)| *values)
}

/// A single enum-typed field holding a value outside its set.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: \"{value}\" is not a recognized value")]
pub struct Violation {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Error)]
#[error("{}", render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check every enum-typed field against its closed set. Blank/absent values
/// pass (the inclusion policy decides blankness); free-text fields such as
/// resolutions and the media-review description fields are not constrained.
pub fn validate(record: &SpecRecord) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    let mut check = |field: &str, value: &Option<String>, set: &[&str]| {
        let Some(v) = value.as_deref() else { return };
        if included(Some(v)) && !set.contains(&v.trim()) {
            violations.push(Violation {
                field: field.to_string(),
                value: v.to_string(),
            });
        }
    };

    let project = &record.project_info;
    check("projectInfo.projectFormat", &project.project_format, PROJECT_FORMAT);
    check("projectInfo.projectFrameRate", &project.project_frame_rate, FRAME_RATE);
    check("projectInfo.colorScience", &project.color_science, COLOR_SCIENCE);

    for camera in &record.camera_formats {
        let prefix = format!("cameraFormats[{}]", camera.id);
        check(&format!("{prefix}.sourceCamera"), &camera.source_camera, SOURCE_CAMERA);
        check(&format!("{prefix}.codec"), &camera.codec, CODEC);
        check(&format!("{prefix}.sensorMode"), &camera.sensor_mode, SENSOR_MODE);
        check(
            &format!("{prefix}.lensSqueezeFactor"),
            &camera.lens_squeeze_factor,
            LENS_SQUEEZE_FACTOR,
        );
        check(&format!("{prefix}.colorSpace"), &camera.color_space, CAMERA_COLOR_SPACE);
    }

    let pulls = &record.vfx_pulls;
    check("vfxPulls.fileFormat", &pulls.file_format, VFX_FILE_FORMAT);
    check("vfxPulls.compression", &pulls.compression, COMPRESSION);
    check("vfxPulls.colorSpace", &pulls.color_space, VFX_COLOR_SPACE);
    check("vfxPulls.bitDepth", &pulls.bit_depth, BIT_DEPTH);
    check("vfxPulls.framePadding", &pulls.frame_padding, FRAME_PADDING);
    check("vfxPulls.plate", &pulls.plate, PLATE);

    let review = &record.media_review;
    check("mediaReview.container", &review.container, CONTAINER);
    check("mediaReview.videoCodec", &review.video_codec, VIDEO_CODEC);

    check("vfxDeliveries.task", &record.vfx_deliveries.task, TASKS);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_record_validates() {
        assert!(validate(&SpecRecord::seed()).is_ok());
    }

    #[test]
    fn test_blank_enum_fields_pass() {
        let record = SpecRecord::default();
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let mut record = SpecRecord::seed();
        record.vfx_deliveries.task = Some("explode".to_string());
        let err = validate(&record).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "vfxDeliveries.task");
    }

    #[test]
    fn test_all_violations_collected() {
        let mut record = SpecRecord::default();
        record.vfx_pulls.plate = Some("XX".to_string());
        record.media_review.container = Some("webm".to_string());
        let err = validate(&record).unwrap_err();
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn test_free_text_fields_unconstrained() {
        let mut record = SpecRecord::default();
        record.vfx_pulls.resolution = Some("4096 x 1716 custom crop".to_string());
        record.media_review.frame_rate = Some("23.976".to_string());
        record.project_info.color_science = Some("Custom".to_string());
        record.project_info.custom_color_science = Some("show-specific OCIO".to_string());
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_option_set_lookup() {
        assert_eq!(option_set("plate"), Some(PLATE));
        assert!(option_set("nonexistent").is_none());
    }
}
