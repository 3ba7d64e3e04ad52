//! Document export: renders the full record to the plain-text specification
//! body and writes it as a .pdf/.docx target file. Real page layout belongs
//! to a dedicated rendering service; like the original backend, the exported
//! files carry the text body.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::SpecRecord;
use crate::naming::{self, Artifact, NamingView};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Some(ExportFormat::Pdf),
            "docx" => Some(ExportFormat::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

fn or_na(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}

/// Render the specification document body.
pub fn render_document(record: &SpecRecord) -> String {
    let letterhead = &record.letterhead_info;
    let project = &record.project_info;
    let pulls = &record.vfx_pulls;
    let review = &record.media_review;

    let pulls_filename = naming::compose_filename(Artifact::VfxPulls, &NamingView::from_pulls(pulls));
    let deliveries_filename = naming::compose_filename(
        Artifact::VfxDeliveries,
        &NamingView::merged(&record.vfx_deliveries, pulls),
    );

    let mut doc = String::new();
    doc.push_str("VFX SPECIFICATION DOCUMENT\n");
    doc.push_str("===========================\n\n");
    doc.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));

    doc.push_str("COMPANY INFORMATION\n");
    doc.push_str("-------------------\n");
    doc.push_str(&format!("Company Name: {}\n", or_na(&letterhead.company_name)));
    doc.push_str(&format!("Company Email: {}\n", or_na(&letterhead.email)));
    doc.push_str(&format!("Company Address: {}\n", or_na(&letterhead.address)));
    doc.push_str(&format!("Company Website: {}\n\n", or_na(&letterhead.website)));

    doc.push_str("PROJECT INFORMATION\n");
    doc.push_str("-------------------\n");
    doc.push_str(&format!("Project Title: {}\n", or_na(&project.project_title)));
    doc.push_str(&format!("Project Code Name: {}\n", or_na(&project.project_code_name)));
    doc.push_str(&format!("Client: {}\n", or_na(&project.client)));
    doc.push_str(&format!("Director: {}\n", or_na(&project.director)));
    doc.push_str(&format!("DOP: {}\n", or_na(&project.dop)));
    doc.push_str(&format!("VFX Supervisor: {}\n", or_na(&project.vfx_supervisor)));
    doc.push_str(&format!("VFX Vendor: {}\n", or_na(&project.vfx_vendor)));
    doc.push_str(&format!("Frame Rate: {}\n", or_na(&project.project_frame_rate)));
    let color_science = match project.color_science.as_deref() {
        Some("Custom") => or_na(&project.custom_color_science),
        _ => or_na(&project.color_science),
    };
    doc.push_str(&format!("Color Science: {color_science}\n\n"));

    doc.push_str("CAMERA FORMATS\n");
    doc.push_str("--------------\n");
    if record.camera_formats.is_empty() {
        doc.push_str("N/A\n");
    }
    for camera in &record.camera_formats {
        doc.push_str(&format!(
            "{}: {} / {} / {} / squeeze {} / {}\n",
            or_na(&camera.camera_id),
            or_na(&camera.source_camera),
            or_na(&camera.codec),
            or_na(&camera.sensor_mode),
            or_na(&camera.lens_squeeze_factor),
            or_na(&camera.color_space),
        ));
    }
    doc.push('\n');

    doc.push_str("VFX PULLS SPECIFICATIONS\n");
    doc.push_str("------------------------\n");
    doc.push_str(&format!("File Format: {}\n", or_na(&pulls.file_format)));
    doc.push_str(&format!("Compression: {}\n", or_na(&pulls.compression)));
    doc.push_str(&format!("Resolution: {}\n", or_na(&pulls.resolution)));
    doc.push_str(&format!("Color Space: {}\n", or_na(&pulls.color_space)));
    doc.push_str(&format!("Bit Depth: {}\n", or_na(&pulls.bit_depth)));
    match pulls.frame_handles {
        // Handles are per side; the document reports the head+tail total.
        Some(handles) => doc.push_str(&format!(
            "Frame Handles: {handles} ({} total)\n\n",
            handles * 2
        )),
        None => doc.push_str("Frame Handles: N/A\n\n"),
    }

    doc.push_str("MEDIA REVIEW SPECIFICATIONS\n");
    doc.push_str("---------------------------\n");
    doc.push_str(&format!("Container: {}\n", or_na(&review.container)));
    doc.push_str(&format!("Video Codec: {}\n", or_na(&review.video_codec)));
    doc.push_str(&format!("Resolution: {}\n", or_na(&review.resolution)));
    doc.push_str(&format!("Aspect Ratio: {}\n", or_na(&review.aspect_ratio)));
    doc.push_str(&format!("Frame Rate: {}\n", or_na(&review.frame_rate)));
    doc.push_str(&format!("Color Space: {}\n", or_na(&review.color_space)));
    doc.push_str(&format!("Summary: {}\n", naming::compose_review_summary(review)));
    doc.push_str(&format!("{}\n\n", naming::COLOR_WORKFLOW_CAPTION));

    doc.push_str("FILENAME CONVENTIONS\n");
    doc.push_str("--------------------\n");
    doc.push_str(&format!("VFX Pulls: {pulls_filename}\n"));
    doc.push_str(&format!("VFX Deliveries: {deliveries_filename}\n"));

    doc
}

/// Default export filename: the project code name when present, otherwise a
/// generic stem.
pub fn default_filename(record: &SpecRecord, format: ExportFormat) -> String {
    let stem = record
        .project_info
        .project_code_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("VFX_Spec");
    format!("{stem}_spec.{}", format.extension())
}

/// Render the record and write it to `out` (or the default filename in
/// `out_dir`). Returns the path written.
pub fn export_to_file(
    record: &SpecRecord,
    format: ExportFormat,
    out: Option<&Path>,
    out_dir: Option<&Path>,
) -> Result<PathBuf> {
    let path = match out {
        Some(p) => p.to_path_buf(),
        None => {
            let dir = out_dir.map(Path::to_path_buf).unwrap_or_default();
            dir.join(default_filename(record, format))
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let body = render_document(record);
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;

    info!("Exported {} document: {}", format.extension(), path.display());
    Ok(path)
}
