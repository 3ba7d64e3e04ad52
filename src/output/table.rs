use unicode_width::UnicodeWidthStr;

use crate::db::models::{DbStats, Specification, Template};
use crate::model::SpecRecord;
use crate::naming;
use crate::progress::compute_progress;

/// Truncate a string to fit within max_width (respecting unicode width).
fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + cw + 3 > max_width {
            result.push_str("...");
            break;
        }
        result.push(ch);
        width += cw;
    }
    result
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn dash_or(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// List saved specifications.
pub fn print_spec_list(specs: &[Specification]) {
    if specs.is_empty() {
        println!("No specs saved yet. Create one with `vfxspec new`.");
        return;
    }

    println!(
        "  {:<10} {:<20} {:<28} {:>8}  {:<20}",
        "ID", "NAME", "TITLE", "PROGRESS", "UPDATED"
    );
    println!("  {}", "-".repeat(90));

    for spec in specs {
        let title = spec
            .data
            .project_info
            .project_title
            .as_deref()
            .unwrap_or("-");
        println!(
            "  {:<10} {:<20} {:<28} {:>7}%  {:<20}",
            short_id(&spec.id),
            truncate(&dash_or(spec.name.as_deref()), 20),
            truncate(title, 28),
            compute_progress(&spec.data),
            spec.updated_at,
        );
    }

    println!("\n  {} spec{}", specs.len(), if specs.len() == 1 { "" } else { "s" });
}

/// Full detail view for `show`.
pub fn print_spec_detail(spec: &Specification) {
    let record = &spec.data;
    println!("Spec: {} ({})", dash_or(spec.name.as_deref()), spec.id);
    println!("  Created: {}", spec.created_at);
    println!("  Updated: {}", spec.updated_at);
    println!("  Completion: {}%", compute_progress(record));

    println!("\nLetterhead");
    println!("  Company:  {}", dash_or(record.letterhead_info.company_name.as_deref()));
    println!("  Email:    {}", dash_or(record.letterhead_info.email.as_deref()));

    println!("\nProject");
    println!("  Title:     {}", dash_or(record.project_info.project_title.as_deref()));
    println!("  Code name: {}", dash_or(record.project_info.project_code_name.as_deref()));
    println!("  Client:    {}", dash_or(record.project_info.client.as_deref()));
    println!("  Director:  {}", dash_or(record.project_info.director.as_deref()));
    println!("  VFX supe:  {}", dash_or(record.project_info.vfx_supervisor.as_deref()));
    println!("  Vendor:    {}", dash_or(record.project_info.vfx_vendor.as_deref()));

    println!("\nCameras");
    for camera in &record.camera_formats {
        println!(
            "  [{}] {} - {} / {}",
            camera.id,
            dash_or(camera.camera_id.as_deref()),
            dash_or(camera.source_camera.as_deref()),
            dash_or(camera.codec.as_deref()),
        );
    }
    if record.camera_formats.is_empty() {
        println!("  (none)");
    }

    print_preview(record);
}

/// Derived values: filenames, review summary, completion.
pub fn print_preview(record: &SpecRecord) {
    let pulls_filename = naming::compose_filename(
        naming::Artifact::VfxPulls,
        &naming::NamingView::from_pulls(&record.vfx_pulls),
    );
    let deliveries_filename = naming::compose_filename(
        naming::Artifact::VfxDeliveries,
        &naming::NamingView::merged(&record.vfx_deliveries, &record.vfx_pulls),
    );

    println!("\nDerived");
    println!("  Pulls filename:      {pulls_filename}");
    println!("  Deliveries filename: {deliveries_filename}");
    println!("  Review summary:      {}", naming::compose_review_summary(&record.media_review));
    println!("  {}", naming::COLOR_WORKFLOW_CAPTION);
    println!("  Completion:          {}%", compute_progress(record));
}

/// List templates.
pub fn print_template_list(templates: &[Template]) {
    if templates.is_empty() {
        println!("No templates saved yet. Save one with `vfxspec template save`.");
        return;
    }

    println!("  {:<10} {:<32} {:<20}", "ID", "NAME", "CREATED");
    println!("  {}", "-".repeat(64));
    for t in templates {
        println!(
            "  {:<10} {:<32} {:<20}",
            short_id(&t.id),
            truncate(&t.name, 32),
            t.created_at
        );
    }
}

/// One option set, or all of them.
pub fn print_options(sets: &[(&str, &[&str])]) {
    for (name, values) in sets {
        println!("{name}:");
        for value in *values {
            println!("  {value}");
        }
        println!();
    }
}

pub fn print_stats(stats: &DbStats) {
    println!("  Specs:     {}", stats.specs);
    println!("  Templates: {}", stats.templates);
    println!("  Size:      {}", format_bytes(stats.db_size_bytes));
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate("short", 20), "short");
        let long = "a".repeat(40);
        let cut = truncate(&long, 10);
        assert!(cut.ends_with("..."));
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 10);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1_048_576), "3.0 MB");
    }
}
