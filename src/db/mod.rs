pub mod migrations;
pub mod models;
pub mod schema;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::model::SpecRecord;
use models::{DbStats, Specification, Template};

/// Persistence port for specification documents. The core never interprets
/// ids; `update` has create-or-update semantics keyed by the assigned id.
pub trait SpecStore {
    fn create_spec(&self, name: Option<&str>, record: &SpecRecord) -> Result<Specification>;
    fn update_spec(&self, id: &str, record: &SpecRecord) -> Result<Specification>;
    fn get_spec(&self, id: &str) -> Result<Option<Specification>>;
    fn get_all_specs(&self) -> Result<Vec<Specification>>;
    fn delete_spec(&self, id: &str) -> Result<bool>;
}

/// Persistence port for templates. Originally browser-local storage; any
/// backend with these four operations will do.
pub trait TemplateStore {
    fn save_template(&self, name: &str, record: &SpecRecord) -> Result<Template>;
    fn get_templates(&self) -> Result<Vec<Template>>;
    fn load_template(&self, id: &str) -> Result<Option<Template>>;
    fn delete_template(&self, id: &str) -> Result<bool>;
}

pub struct Database {
    pub conn: Connection,
    pub path: PathBuf,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        Self::init(conn, path.to_path_buf())
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, path: PathBuf) -> Result<Self> {
        // Performance pragmas
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;

        schema::create_schema(&conn)?;
        migrations::run_migrations(&conn)?;

        info!("Opened database: {}", path.display());

        Ok(Database { conn, path })
    }

    /// Default database path: ~/.vfxspec/vfxspec.db
    pub fn default_db_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".vfxspec").join("vfxspec.db"))
    }

    /// Database statistics for `info`.
    pub fn stats(&self) -> Result<DbStats> {
        let specs: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM specs", [], |r| r.get(0))?;
        let templates: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM templates", [], |r| r.get(0))?;

        let db_size_bytes = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        Ok(DbStats {
            specs,
            templates,
            db_size_bytes,
        })
    }

    fn spec_from_parts(
        id: String,
        name: Option<String>,
        data: String,
        created_at: String,
        updated_at: String,
    ) -> Result<Specification> {
        let record: SpecRecord = serde_json::from_str(&data)
            .with_context(|| format!("Stored spec {id} holds malformed JSON"))?;
        Ok(Specification {
            id,
            name,
            data: record,
            created_at,
            updated_at,
        })
    }
}

impl SpecStore for Database {
    fn create_spec(&self, name: Option<&str>, record: &SpecRecord) -> Result<Specification> {
        let id = Uuid::new_v4().to_string();
        let data = serde_json::to_string(record)?;

        self.conn.execute(
            "INSERT INTO specs (id, name, data) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, name, data],
        )?;

        info!("Created spec: {id}");
        self.get_spec(&id)?
            .context("Spec vanished immediately after insert")
    }

    fn update_spec(&self, id: &str, record: &SpecRecord) -> Result<Specification> {
        let data = serde_json::to_string(record)?;

        let updated = self.conn.execute(
            "UPDATE specs
             SET data = ?2, updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
             WHERE id = ?1",
            rusqlite::params![id, data],
        )?;

        if updated == 0 {
            // Create-or-update keyed by the caller-assigned id.
            self.conn.execute(
                "INSERT INTO specs (id, data) VALUES (?1, ?2)",
                rusqlite::params![id, data],
            )?;
        }

        self.get_spec(id)?
            .with_context(|| format!("Spec vanished during update: {id}"))
    }

    fn get_spec(&self, id: &str) -> Result<Option<Specification>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, data, created_at, updated_at FROM specs WHERE id = ?1",
        )?;

        let row = stmt
            .query_row([id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .optional()?;

        row.map(|(id, name, data, created_at, updated_at)| {
            Self::spec_from_parts(id, name, data, created_at, updated_at)
        })
        .transpose()
    }

    fn get_all_specs(&self) -> Result<Vec<Specification>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, data, created_at, updated_at
             FROM specs ORDER BY updated_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut specs = Vec::new();
        for row in rows {
            let (id, name, data, created_at, updated_at) = row?;
            specs.push(Self::spec_from_parts(id, name, data, created_at, updated_at)?);
        }
        Ok(specs)
    }

    fn delete_spec(&self, id: &str) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM specs WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }
}

impl TemplateStore for Database {
    fn save_template(&self, name: &str, record: &SpecRecord) -> Result<Template> {
        let id = Uuid::new_v4().to_string();
        let data = serde_json::to_string(record)?;

        self.conn.execute(
            "INSERT INTO templates (id, name, data) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, name, data],
        )?;

        info!("Saved template \"{name}\" ({id})");
        self.load_template(&id)?
            .context("Template vanished immediately after insert")
    }

    fn get_templates(&self) -> Result<Vec<Template>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, data, created_at FROM templates ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut templates = Vec::new();
        for row in rows {
            let (id, name, data, created_at) = row?;
            let record: SpecRecord = serde_json::from_str(&data)
                .with_context(|| format!("Stored template {id} holds malformed JSON"))?;
            templates.push(Template {
                id,
                name,
                data: record,
                created_at,
            });
        }
        Ok(templates)
    }

    fn load_template(&self, id: &str) -> Result<Option<Template>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, data, created_at FROM templates WHERE id = ?1")?;

        let row = stmt
            .query_row([id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .optional()?;

        row.map(|(id, name, data, created_at)| {
            let record: SpecRecord = serde_json::from_str(&data)
                .with_context(|| format!("Stored template {id} holds malformed JSON"))?;
            Ok(Template {
                id,
                name,
                data: record,
                created_at,
            })
        })
        .transpose()
    }

    fn delete_template(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM templates WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get_spec() {
        let db = Database::open_in_memory().unwrap();
        let record = SpecRecord::seed();
        let spec = db.create_spec(Some("pilot"), &record).unwrap();

        let fetched = db.get_spec(&spec.id).unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("pilot"));
        assert_eq!(fetched.data, record);
        assert!(!fetched.created_at.is_empty());
    }

    #[test]
    fn test_update_spec_replaces_data() {
        let db = Database::open_in_memory().unwrap();
        let spec = db.create_spec(None, &SpecRecord::seed()).unwrap();

        let mut record = spec.data.clone();
        record.vfx_pulls.show_id = Some("HZN".to_string());
        let updated = db.update_spec(&spec.id, &record).unwrap();

        assert_eq!(updated.data.vfx_pulls.show_id.as_deref(), Some("HZN"));
        assert_eq!(updated.created_at, spec.created_at);
    }

    #[test]
    fn test_update_spec_creates_when_missing() {
        let db = Database::open_in_memory().unwrap();
        let record = SpecRecord::seed();
        let spec = db.update_spec("caller-assigned-id", &record).unwrap();
        assert_eq!(spec.id, "caller-assigned-id");
        assert_eq!(spec.data, record);
    }

    #[test]
    fn test_get_all_and_delete_spec() {
        let db = Database::open_in_memory().unwrap();
        let a = db.create_spec(Some("a"), &SpecRecord::seed()).unwrap();
        db.create_spec(Some("b"), &SpecRecord::seed()).unwrap();

        assert_eq!(db.get_all_specs().unwrap().len(), 2);
        assert!(db.delete_spec(&a.id).unwrap());
        assert!(!db.delete_spec(&a.id).unwrap());
        assert_eq!(db.get_all_specs().unwrap().len(), 1);
    }

    #[test]
    fn test_template_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let record = SpecRecord::seed();
        let template = db.save_template("episodic defaults", &record).unwrap();

        let loaded = db.load_template(&template.id).unwrap().unwrap();
        assert_eq!(loaded.name, "episodic defaults");
        assert_eq!(loaded.data, record);

        assert_eq!(db.get_templates().unwrap().len(), 1);
        assert!(db.delete_template(&template.id).unwrap());
        assert!(db.load_template(&template.id).unwrap().is_none());
    }

    #[test]
    fn test_missing_spec_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_spec("nope").unwrap().is_none());
    }

    #[test]
    fn test_stats_counts() {
        let db = Database::open_in_memory().unwrap();
        db.create_spec(None, &SpecRecord::seed()).unwrap();
        db.save_template("t", &SpecRecord::seed()).unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.specs, 1);
        assert_eq!(stats.templates, 1);
    }
}
