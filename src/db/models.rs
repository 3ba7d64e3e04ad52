use serde::{Deserialize, Serialize};

use crate::model::SpecRecord;

/// A persisted specification document. The id is assigned at create time and
/// treated as opaque everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
    pub id: String,
    pub name: Option<String>,
    pub data: SpecRecord,
    pub created_at: String,
    pub updated_at: String,
}

/// A named, reusable snapshot of a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub data: SpecRecord,
    pub created_at: String,
}

/// Stats returned by `vfxspec info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbStats {
    pub specs: i64,
    pub templates: i64,
    pub db_size_bytes: u64,
}
