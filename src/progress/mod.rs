//! Form-completion tracking: a fixed list of required dotted field paths
//! evaluated against the whole record. The list is part of the contract, not
//! runtime configuration.

use crate::model::SpecRecord;
use crate::naming::included;

/// Required fields, in the order they appear on the form.
pub const REQUIRED_FIELDS: &[&str] = &[
    "letterheadInfo.companyName",
    "letterheadInfo.email",
    "projectInfo.documentVersion",
    "projectInfo.projectTitle",
    "projectInfo.projectCodeName",
    "projectInfo.client",
    "projectInfo.director",
    "projectInfo.dop",
    "projectInfo.productionCompany",
    "projectInfo.vfxSupervisor",
    "projectInfo.vfxVendor",
    "vfxPulls.showId",
    "vfxPulls.shotId",
];

/// Resolve a dotted path against the record. Returns `None` for an unknown
/// path or an absent field; the tracker counts both as "not filled" rather
/// than failing.
pub fn resolve_path<'a>(record: &'a SpecRecord, path: &str) -> Option<&'a str> {
    let (section, field) = path.split_once('.')?;
    match section {
        "letterheadInfo" => {
            let info = &record.letterhead_info;
            match field {
                "companyName" => info.company_name.as_deref(),
                "email" => info.email.as_deref(),
                "address" => info.address.as_deref(),
                "website" => info.website.as_deref(),
                _ => None,
            }
        }
        "projectInfo" => {
            let info = &record.project_info;
            match field {
                "documentVersion" => info.document_version.as_deref(),
                "projectDate" => info.project_date.as_deref(),
                "projectTitle" => info.project_title.as_deref(),
                "projectCodeName" => info.project_code_name.as_deref(),
                "projectFormat" => info.project_format.as_deref(),
                "client" => info.client.as_deref(),
                "director" => info.director.as_deref(),
                "dop" => info.dop.as_deref(),
                "productionCompany" => info.production_company.as_deref(),
                "postProductionSupervisor" => info.post_production_supervisor.as_deref(),
                "lab" => info.lab.as_deref(),
                "colorist" => info.colorist.as_deref(),
                "vfxSupervisor" => info.vfx_supervisor.as_deref(),
                "vfxOnSetSupervisor" => info.vfx_on_set_supervisor.as_deref(),
                "vfxVendor" => info.vfx_vendor.as_deref(),
                "vendorCodeName" => info.vendor_code_name.as_deref(),
                "vfxDocumentsLink" => info.vfx_documents_link.as_deref(),
                "projectFrameRate" => info.project_frame_rate.as_deref(),
                "colorScience" => info.color_science.as_deref(),
                "customColorScience" => info.custom_color_science.as_deref(),
                "additionalNotes" => info.additional_notes.as_deref(),
                _ => None,
            }
        }
        "vfxPulls" => {
            let pulls = &record.vfx_pulls;
            match field {
                "fileFormat" => pulls.file_format.as_deref(),
                "compression" => pulls.compression.as_deref(),
                "resolution" => pulls.resolution.as_deref(),
                "colorSpace" => pulls.color_space.as_deref(),
                "bitDepth" => pulls.bit_depth.as_deref(),
                "framePadding" => pulls.frame_padding.as_deref(),
                "vfxLutsLink" => pulls.vfx_luts_link.as_deref(),
                "showId" => pulls.show_id.as_deref(),
                "episode" => pulls.episode.as_deref(),
                "sequence" => pulls.sequence.as_deref(),
                "scene" => pulls.scene.as_deref(),
                "shotId" => pulls.shot_id.as_deref(),
                "plate" => pulls.plate.as_deref(),
                "identifier" => pulls.identifier.as_deref(),
                "version" => pulls.version.as_deref(),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Overall completion percentage: round-half-up share of required fields that
/// pass the inclusion policy.
pub fn compute_progress(record: &SpecRecord) -> u8 {
    let filled = REQUIRED_FIELDS
        .iter()
        .filter(|path| included(resolve_path(record, path)))
        .count();
    let percent = (filled as f64 * 100.0 / REQUIRED_FIELDS.len() as f64).round();
    percent as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_record() -> SpecRecord {
        let mut record = SpecRecord::default();
        record.letterhead_info.company_name = Some("Lab Zero".to_string());
        record.letterhead_info.email = Some("vfx@labzero.example".to_string());
        record.project_info.document_version = Some("v1.0".to_string());
        record.project_info.project_title = Some("Horizon".to_string());
        record.project_info.project_code_name = Some("HZN".to_string());
        record.project_info.client = Some("Studio".to_string());
        record.project_info.director = Some("R. Director".to_string());
        record.project_info.dop = Some("D. Photographer".to_string());
        record.project_info.production_company = Some("ProdCo".to_string());
        record.project_info.vfx_supervisor = Some("V. Supe".to_string());
        record.project_info.vfx_vendor = Some("VendorCo".to_string());
        record.vfx_pulls.show_id = Some("HZN".to_string());
        record.vfx_pulls.shot_id = Some("0010".to_string());
        record
    }

    #[test]
    fn test_empty_record_is_zero() {
        assert_eq!(compute_progress(&SpecRecord::default()), 0);
    }

    #[test]
    fn test_all_required_fields_is_hundred() {
        assert_eq!(compute_progress(&filled_record()), 100);
    }

    #[test]
    fn test_progress_rounds_single_field() {
        let mut record = SpecRecord::default();
        record.vfx_pulls.show_id = Some("HZN".to_string());
        // 1 of 13 -> 7.69 -> 8
        assert_eq!(compute_progress(&record), 8);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let full = filled_record();
        let mut record = SpecRecord::default();
        let mut previous = compute_progress(&record);

        record.letterhead_info.company_name = full.letterhead_info.company_name.clone();
        let next = compute_progress(&record);
        assert!(next >= previous);
        previous = next;

        record.letterhead_info.email = full.letterhead_info.email.clone();
        record.project_info = full.project_info.clone();
        let next = compute_progress(&record);
        assert!(next >= previous);
        previous = next;

        record.vfx_pulls.show_id = full.vfx_pulls.show_id.clone();
        record.vfx_pulls.shot_id = full.vfx_pulls.shot_id.clone();
        assert!(compute_progress(&record) >= previous);
    }

    #[test]
    fn test_whitespace_field_not_counted() {
        let mut record = SpecRecord::default();
        record.vfx_pulls.show_id = Some("   ".to_string());
        assert_eq!(compute_progress(&record), 0);
    }

    #[test]
    fn test_unknown_path_is_absent() {
        let record = filled_record();
        assert!(resolve_path(&record, "vfxPulls.frameHandles").is_none());
        assert!(resolve_path(&record, "noSuchSection.field").is_none());
        assert!(resolve_path(&record, "flatpath").is_none());
    }

    #[test]
    fn test_resolve_known_path() {
        let record = filled_record();
        assert_eq!(resolve_path(&record, "projectInfo.client"), Some("Studio"));
        assert_eq!(resolve_path(&record, "letterheadInfo.email"), Some("vfx@labzero.example"));
    }
}
