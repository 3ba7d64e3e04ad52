use super::CameraFormat;

/// Camera-format fields addressable by `camera set`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraField {
    CameraId,
    SourceCamera,
    Codec,
    SensorMode,
    LensSqueezeFactor,
    ColorSpace,
}

impl CameraField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cameraId" | "camera-id" => Some(CameraField::CameraId),
            "sourceCamera" | "source-camera" => Some(CameraField::SourceCamera),
            "codec" => Some(CameraField::Codec),
            "sensorMode" | "sensor-mode" => Some(CameraField::SensorMode),
            "lensSqueezeFactor" | "lens-squeeze-factor" => Some(CameraField::LensSqueezeFactor),
            "colorSpace" | "color-space" => Some(CameraField::ColorSpace),
            _ => None,
        }
    }
}

/// Append a new entry. Ids are derived from the current max only, so an id
/// freed by an earlier remove can be reused within a session. The label
/// letter comes from the sequence position, not the id.
pub fn add_camera(cameras: &[CameraFormat]) -> Vec<CameraFormat> {
    let next_id = cameras.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let letter = char::from_u32(65 + cameras.len() as u32).unwrap_or('?');

    let mut updated = cameras.to_vec();
    updated.push(CameraFormat {
        id: next_id,
        camera_id: Some(format!("Camera {letter}")),
        ..CameraFormat::default()
    });
    updated
}

/// Drop the entry with the given id; no-op when absent. Keeping at least one
/// camera is a presentation rule, not enforced here.
pub fn remove_camera(cameras: &[CameraFormat], id: i64) -> Vec<CameraFormat> {
    cameras.iter().filter(|c| c.id != id).cloned().collect()
}

/// Replace one field on the matching entry; every other entry and field is
/// carried over untouched.
pub fn update_camera(
    cameras: &[CameraFormat],
    id: i64,
    field: CameraField,
    value: &str,
) -> Vec<CameraFormat> {
    cameras
        .iter()
        .map(|c| {
            if c.id != id {
                return c.clone();
            }
            let mut updated = c.clone();
            let slot = match field {
                CameraField::CameraId => &mut updated.camera_id,
                CameraField::SourceCamera => &mut updated.source_camera,
                CameraField::Codec => &mut updated.codec,
                CameraField::SensorMode => &mut updated.sensor_mode,
                CameraField::LensSqueezeFactor => &mut updated.lens_squeeze_factor,
                CameraField::ColorSpace => &mut updated.color_space,
            };
            *slot = Some(value.to_string());
            updated
        })
        .collect()
}
