//! End-to-end authoring flow against an in-memory store: seed a spec, fill
//! it field by field the way the CLI does, and check the derived values and
//! persistence behavior at each step.

use vfxspec::db::{Database, SpecStore, TemplateStore};
use vfxspec::export;
use vfxspec::model::{self, camera, options, SpecRecord};
use vfxspec::naming::{compose_filename, compose_review_summary, Artifact, NamingView};
use vfxspec::progress::compute_progress;

fn set_field(record: &SpecRecord, path: &str, value: &str) -> SpecRecord {
    let patch = model::patch_from_path(path, serde_json::json!(value));
    let patched = record.apply_patch(&patch).expect("patch applies");
    options::validate(&patched).expect("patched record validates");
    patched
}

#[test]
fn test_author_a_spec_from_seed_to_export() {
    let db = Database::open_in_memory().unwrap();

    let mut record = SpecRecord::seed();
    record = set_field(&record, "letterheadInfo.companyName", "Lab Zero");
    record = set_field(&record, "letterheadInfo.email", "vfx@labzero.example");
    record = set_field(&record, "projectInfo.projectTitle", "Horizon");
    record = set_field(&record, "projectInfo.projectCodeName", "HZN");
    record = set_field(&record, "projectInfo.client", "Studio");
    record = set_field(&record, "projectInfo.director", "R. Director");
    record = set_field(&record, "projectInfo.dop", "D. Photographer");
    record = set_field(&record, "projectInfo.productionCompany", "ProdCo");
    record = set_field(&record, "projectInfo.vfxSupervisor", "V. Supe");
    record = set_field(&record, "projectInfo.vfxVendor", "VendorCo");
    record = set_field(&record, "vfxPulls.showId", "HZN");
    record = set_field(&record, "vfxPulls.episode", "101");
    record = set_field(&record, "vfxPulls.shotId", "0010");
    record = set_field(&record, "vfxPulls.fileFormat", "OpenEXR (.exr)");
    record = set_field(&record, "vfxDeliveries.showId", "HZN");
    record = set_field(&record, "vfxDeliveries.episode", "101");
    record = set_field(&record, "vfxDeliveries.shotId", "0010");
    record = set_field(&record, "vfxDeliveries.vendorCodeName", "VEND");

    // seed + all required fields -> complete
    assert_eq!(compute_progress(&record), 100);

    let pulls = compose_filename(Artifact::VfxPulls, &NamingView::from_pulls(&record.vfx_pulls));
    assert_eq!(pulls, "HZN_101_0010_PL01_v001.####.exr");

    let deliveries = compose_filename(
        Artifact::VfxDeliveries,
        &NamingView::merged(&record.vfx_deliveries, &record.vfx_pulls),
    );
    assert_eq!(deliveries, "HZN_101_0010_comp_VEND_v001.####.exr");

    let summary = compose_review_summary(&record.media_review);
    assert!(summary.starts_with("MOV, ProRes 422 HQ"));
    assert!(summary.ends_with('.'));

    // persist, reload, and confirm nothing drifted
    let spec = db.create_spec(Some("horizon pilot"), &record).unwrap();
    let reloaded = db.get_spec(&spec.id).unwrap().unwrap();
    assert_eq!(reloaded.data, record);
    assert_eq!(compute_progress(&reloaded.data), 100);

    let doc = export::render_document(&reloaded.data);
    assert!(doc.contains("VFX Pulls: HZN_101_0010_PL01_v001.####.exr"));
    assert!(doc.contains("Project Title: Horizon"));
}

#[test]
fn test_template_round_trip_feeds_new_spec() {
    let db = Database::open_in_memory().unwrap();

    let mut record = SpecRecord::seed();
    record = set_field(&record, "vfxPulls.showId", "HZN");
    let template = db.save_template("show defaults", &record).unwrap();

    // `new --from-template` path: load, validate, create
    let loaded = db.load_template(&template.id).unwrap().unwrap();
    options::validate(&loaded.data).unwrap();
    let spec = db.create_spec(None, &loaded.data).unwrap();
    assert_eq!(spec.data.vfx_pulls.show_id.as_deref(), Some("HZN"));

    // editing the new spec does not touch the template
    let edited = set_field(&spec.data, "vfxPulls.showId", "OTHER");
    db.update_spec(&spec.id, &edited).unwrap();
    let template_again = db.load_template(&template.id).unwrap().unwrap();
    assert_eq!(template_again.data.vfx_pulls.show_id.as_deref(), Some("HZN"));
}

#[test]
fn test_camera_edits_persist_through_store() {
    let db = Database::open_in_memory().unwrap();
    let spec = db.create_spec(None, &SpecRecord::seed()).unwrap();

    let mut record = spec.data;
    record.camera_formats = camera::add_camera(&record.camera_formats);
    record.camera_formats = camera::update_camera(
        &record.camera_formats,
        2,
        camera::CameraField::SourceCamera,
        "RED V-Raptor",
    );
    options::validate(&record).unwrap();
    let updated = db.update_spec(&spec.id, &record).unwrap();

    assert_eq!(updated.data.camera_formats.len(), 2);
    assert_eq!(updated.data.camera_formats[1].id, 2);
    assert_eq!(
        updated.data.camera_formats[1].camera_id.as_deref(),
        Some("Camera B")
    );
    assert_eq!(
        updated.data.camera_formats[1].source_camera.as_deref(),
        Some("RED V-Raptor")
    );
}

#[test]
fn test_invalid_enum_value_is_rejected_before_persisting() {
    let record = SpecRecord::seed();
    let patch = model::patch_from_path("vfxPulls.plate", serde_json::json!("ZZ"));
    let patched = record.apply_patch(&patch).unwrap();
    let err = options::validate(&patched).unwrap_err();
    assert!(err.to_string().contains("vfxPulls.plate"));
}
