use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vfxspec::config;
use vfxspec::db::{Database, SpecStore, TemplateStore};
use vfxspec::export::{self, ExportFormat};
use vfxspec::model::{self, camera, options, SpecRecord};
use vfxspec::naming::{self, Artifact, NamingView};
use vfxspec::output::{self, table};
use vfxspec::progress::compute_progress;

#[derive(Parser)]
#[command(
    name = "vfxspec",
    version,
    about = "VFX spec authoring: structured image-format exchange specs with filename previews"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to database file (default: ~/.vfxspec/vfxspec.db)
    #[arg(long, global = true, env = "VFXSPEC_DB")]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new spec with production seed defaults
    New {
        /// Human-readable spec name
        #[arg(long)]
        name: Option<String>,

        /// Start from a saved template instead of the seed defaults
        #[arg(long)]
        from_template: Option<String>,
    },

    /// List saved specs
    List,

    /// Show a spec in full
    Show {
        /// Spec ID
        id: String,
    },

    /// Set a field by dotted path (e.g. vfxPulls.showId AAA)
    Set {
        /// Spec ID
        id: String,

        /// Dotted field path, camelCase (e.g. projectInfo.projectTitle)
        path: String,

        /// New value; an empty string blanks the field
        value: String,
    },

    /// Show derived values: filenames, review summary, completion
    Preview {
        /// Spec ID
        id: String,
    },

    /// Manage the camera-format list of a spec
    Camera {
        #[command(subcommand)]
        action: CameraAction,
    },

    /// Manage reusable templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Export a spec document
    Export {
        /// Spec ID
        id: String,

        /// Target format: pdf or docx
        #[arg(long, default_value = "pdf")]
        format: String,

        /// Output file (default: <codeName>_spec.<ext> in the export dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List legal values for enum-typed fields
    Options {
        /// Field name (e.g. plate, sourceCamera); omit for all
        field: Option<String>,
    },

    /// Delete a spec
    Delete {
        /// Spec ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Manage ~/.vfxspec/config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show database info
    Info,
}

#[derive(Subcommand)]
enum CameraAction {
    /// Append a camera entry with the next id and letter label
    Add {
        /// Spec ID
        id: String,
    },

    /// Remove a camera entry by its id
    Remove {
        /// Spec ID
        id: String,

        /// Camera entry id (see `show`)
        camera_id: i64,
    },

    /// Set a field on a camera entry
    Set {
        /// Spec ID
        id: String,

        /// Camera entry id
        camera_id: i64,

        /// Field: cameraId, sourceCamera, codec, sensorMode,
        /// lensSqueezeFactor, colorSpace
        field: String,

        /// New value
        value: String,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// Snapshot a spec as a named template
    Save {
        /// Spec ID to snapshot
        id: String,

        /// Template name
        name: String,
    },

    /// List templates
    List,

    /// Delete a template
    Delete {
        /// Template ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config file if missing
    Init,

    /// Show the effective config
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;

    let db_path = cli
        .db
        .unwrap_or_else(|| Database::default_db_path().expect("Could not determine default DB path"));

    let db = Database::open(&db_path)?;
    let config = config::VfxSpecConfig::load()?;

    match cli.command {
        Commands::New { name, from_template } => {
            let record = match from_template {
                Some(template_id) => {
                    let template = db
                        .load_template(&template_id)?
                        .with_context(|| format!("Template not found: {template_id}"))?;
                    options::validate(&template.data)?;
                    template.data
                }
                None => {
                    let mut record = SpecRecord::seed();
                    config.apply_seed_defaults(&mut record);
                    record
                }
            };

            let spec = db.create_spec(name.as_deref(), &record)?;
            if json_output {
                output::print_json(&spec)?;
            } else {
                println!("Created spec: {}", spec.id);
                table::print_preview(&spec.data);
            }
        }

        Commands::List => {
            let specs = db.get_all_specs()?;
            if json_output {
                output::print_json(&specs)?;
            } else {
                table::print_spec_list(&specs);
            }
        }

        Commands::Show { id } => {
            let spec = db
                .get_spec(&id)?
                .with_context(|| format!("Spec not found: {id}"))?;
            if json_output {
                output::print_json(&serde_json::json!({
                    "spec": spec,
                    "progress": compute_progress(&spec.data),
                }))?;
            } else {
                table::print_spec_detail(&spec);
            }
        }

        Commands::Set { id, path, value } => {
            let spec = db
                .get_spec(&id)?
                .with_context(|| format!("Spec not found: {id}"))?;

            // frameHandles is the one numeric field reachable by path; a
            // malformed number is a caller error, not a silent blank.
            let json_value = if path == "vfxPulls.frameHandles" {
                let handles: i64 = value
                    .parse()
                    .with_context(|| format!("Frame handles must be an integer, got: {value}"))?;
                serde_json::json!(handles)
            } else {
                serde_json::json!(value)
            };

            let patch = model::patch_from_path(&path, json_value);
            let record = spec.data.apply_patch(&patch)?;
            options::validate(&record)?;

            let updated = db.update_spec(&id, &record)?;
            if json_output {
                output::print_json(&serde_json::json!({
                    "spec": updated,
                    "progress": compute_progress(&updated.data),
                }))?;
            } else {
                println!("Set {path} = \"{value}\"");
                table::print_preview(&updated.data);
            }
        }

        Commands::Preview { id } => {
            let spec = db
                .get_spec(&id)?
                .with_context(|| format!("Spec not found: {id}"))?;
            let record = &spec.data;

            if json_output {
                let pulls = naming::compose_filename(
                    Artifact::VfxPulls,
                    &NamingView::from_pulls(&record.vfx_pulls),
                );
                let deliveries = naming::compose_filename(
                    Artifact::VfxDeliveries,
                    &NamingView::merged(&record.vfx_deliveries, &record.vfx_pulls),
                );
                output::print_json(&serde_json::json!({
                    "vfxPullsFilename": pulls,
                    "vfxDeliveriesFilename": deliveries,
                    "reviewSummary": naming::compose_review_summary(&record.media_review),
                    "colorWorkflow": naming::COLOR_WORKFLOW_CAPTION,
                    "progress": compute_progress(record),
                }))?;
            } else {
                table::print_preview(record);
            }
        }

        Commands::Camera { action } => match action {
            CameraAction::Add { id } => {
                let spec = db
                    .get_spec(&id)?
                    .with_context(|| format!("Spec not found: {id}"))?;
                let mut record = spec.data;
                record.camera_formats = camera::add_camera(&record.camera_formats);
                let updated = db.update_spec(&id, &record)?;

                if json_output {
                    output::print_json(&updated.data.camera_formats)?;
                } else {
                    let added = updated.data.camera_formats.last();
                    match added {
                        Some(c) => println!(
                            "Added camera [{}] {}",
                            c.id,
                            c.camera_id.as_deref().unwrap_or("-")
                        ),
                        None => println!("Added camera"),
                    }
                }
            }

            CameraAction::Remove { id, camera_id } => {
                let spec = db
                    .get_spec(&id)?
                    .with_context(|| format!("Spec not found: {id}"))?;
                let mut record = spec.data;
                let before = record.camera_formats.len();
                record.camera_formats = camera::remove_camera(&record.camera_formats, camera_id);
                let removed = record.camera_formats.len() < before;
                let updated = db.update_spec(&id, &record)?;

                if json_output {
                    output::print_json(&updated.data.camera_formats)?;
                } else if removed {
                    println!("Removed camera [{camera_id}]");
                } else {
                    println!("No camera with id {camera_id}; nothing removed.");
                }
            }

            CameraAction::Set {
                id,
                camera_id,
                field,
                value,
            } => {
                let camera_field = camera::CameraField::from_str(&field).with_context(|| {
                    format!(
                        "Unknown camera field: {field}. Use: cameraId, sourceCamera, codec, \
                         sensorMode, lensSqueezeFactor, colorSpace"
                    )
                })?;

                let spec = db
                    .get_spec(&id)?
                    .with_context(|| format!("Spec not found: {id}"))?;
                let mut record = spec.data;
                record.camera_formats =
                    camera::update_camera(&record.camera_formats, camera_id, camera_field, &value);
                options::validate(&record)?;
                let updated = db.update_spec(&id, &record)?;

                if json_output {
                    output::print_json(&updated.data.camera_formats)?;
                } else {
                    println!("Set camera [{camera_id}] {field} = \"{value}\"");
                }
            }
        },

        Commands::Template { action } => match action {
            TemplateAction::Save { id, name } => {
                let spec = db
                    .get_spec(&id)?
                    .with_context(|| format!("Spec not found: {id}"))?;
                let template = db.save_template(&name, &spec.data)?;
                if json_output {
                    output::print_json(&template)?;
                } else {
                    println!("Saved template \"{}\" ({})", template.name, template.id);
                }
            }

            TemplateAction::List => {
                let templates = db.get_templates()?;
                if json_output {
                    output::print_json(&templates)?;
                } else {
                    table::print_template_list(&templates);
                }
            }

            TemplateAction::Delete { id } => {
                if db.delete_template(&id)? {
                    println!("Deleted template: {id}");
                } else {
                    bail!("Template not found: {id}");
                }
            }
        },

        Commands::Export { id, format, out } => {
            let export_format = ExportFormat::from_str(&format)
                .with_context(|| format!("Unknown export format: {format}. Use: pdf, docx"))?;

            let spec = db
                .get_spec(&id)?
                .with_context(|| format!("Spec not found: {id}"))?;

            let path = export::export_to_file(
                &spec.data,
                export_format,
                out.as_deref(),
                config.export_output_dir().map(|p| p.as_path()),
            )?;

            if json_output {
                output::print_json(&serde_json::json!({
                    "format": export_format.extension(),
                    "path": path.display().to_string(),
                }))?;
            } else {
                println!("Exported: {}", path.display());
            }
        }

        Commands::Options { field } => match field {
            Some(name) => {
                let values = options::option_set(&name)
                    .with_context(|| format!("No option set named: {name}"))?;
                if json_output {
                    let mut obj = serde_json::Map::new();
                    obj.insert(name.clone(), serde_json::json!(values));
                    output::print_json(&obj)?;
                } else {
                    table::print_options(&[(name.as_str(), values)]);
                }
            }
            None => {
                if json_output {
                    let map: serde_json::Map<String, serde_json::Value> = options::all_sets()
                        .iter()
                        .map(|(name, values)| (name.to_string(), serde_json::json!(values)))
                        .collect();
                    output::print_json(&map)?;
                } else {
                    table::print_options(options::all_sets());
                }
            }
        },

        Commands::Delete { id, force } => {
            let spec = db
                .get_spec(&id)?
                .with_context(|| format!("Spec not found: {id}"))?;

            if !force {
                let label = spec.name.as_deref().unwrap_or("unnamed");
                eprint!("Delete \"{label}\" ({id})? [y/N] ");
                let mut answer = String::new();
                std::io::stdin().read_line(&mut answer)?;
                if !answer.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            db.delete_spec(&id)?;
            println!("Deleted: {id}");
        }

        Commands::Config { action } => match action {
            ConfigAction::Init => {
                if config::init_config()? {
                    println!("Wrote {}", config::config_path()?.display());
                } else {
                    println!("Config already exists: {}", config::config_path()?.display());
                }
            }
            ConfigAction::Show => {
                println!("{}", config.display());
            }
        },

        Commands::Info => {
            let stats = db.stats()?;
            let schema_ver: String = db
                .conn
                .query_row(
                    "SELECT value FROM vfxspec_meta WHERE key = 'schema_version'",
                    [],
                    |r| r.get(0),
                )
                .unwrap_or_else(|_| "unknown".to_string());

            if json_output {
                output::print_json(&serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "schema_version": schema_ver,
                    "db_path": db.path.display().to_string(),
                    "db_size_bytes": stats.db_size_bytes,
                    "specs": stats.specs,
                    "templates": stats.templates,
                }))?;
            } else {
                println!("vfxspec v{}", env!("CARGO_PKG_VERSION"));
                println!("  Schema:   v{schema_ver}");
                println!("  Database: {}", db.path.display());
                table::print_stats(&stats);
            }
        }
    }

    Ok(())
}
