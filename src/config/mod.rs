use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::SpecRecord;

/// Seed-value overrides applied by `vfxspec new`. A facility that always
/// letterheads the same company fills these in once.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct SeedDefaults {
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub vendor_code_name: Option<String>,
}

/// Export settings from config.toml.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct ExportConfig {
    pub output_dir: Option<PathBuf>,
}

/// Top-level vfxspec config file structure.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct VfxSpecConfig {
    pub defaults: Option<SeedDefaults>,
    pub export: Option<ExportConfig>,
}

impl VfxSpecConfig {
    /// Load config from ~/.vfxspec/config.toml. Returns default if the file
    /// doesn't exist.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(VfxSpecConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: VfxSpecConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;
        Ok(config)
    }

    /// Overlay the configured seed defaults onto a freshly seeded record.
    pub fn apply_seed_defaults(&self, record: &mut SpecRecord) {
        let Some(defaults) = &self.defaults else {
            return;
        };
        if let Some(name) = &defaults.company_name {
            record.letterhead_info.company_name = Some(name.clone());
        }
        if let Some(email) = &defaults.company_email {
            record.letterhead_info.email = Some(email.clone());
        }
        if let Some(vendor) = &defaults.vendor_code_name {
            record.project_info.vendor_code_name = Some(vendor.clone());
            record.vfx_deliveries.vendor_code_name = Some(vendor.clone());
        }
    }

    pub fn export_output_dir(&self) -> Option<&PathBuf> {
        self.export.as_ref().and_then(|e| e.output_dir.as_ref())
    }

    /// Display the effective config for `config show`.
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        if let Some(ref defaults) = self.defaults {
            lines.push("[defaults]".to_string());
            if let Some(ref name) = defaults.company_name {
                lines.push(format!("  company_name = \"{name}\""));
            }
            if let Some(ref email) = defaults.company_email {
                lines.push(format!("  company_email = \"{email}\""));
            }
            if let Some(ref vendor) = defaults.vendor_code_name {
                lines.push(format!("  vendor_code_name = \"{vendor}\""));
            }
        }
        if let Some(ref export) = self.export {
            lines.push("[export]".to_string());
            if let Some(ref dir) = export.output_dir {
                lines.push(format!("  output_dir = \"{}\"", dir.display()));
            }
        }
        if lines.is_empty() {
            lines.push("(defaults; no config file settings)".to_string());
        }
        lines.join("\n")
    }
}

/// Path to the config file: ~/.vfxspec/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".vfxspec").join("config.toml"))
}

/// Default config template content.
pub fn default_config_template() -> &'static str {
    r#"# ~/.vfxspec/config.toml

[defaults]
# Seed values applied to every new spec
# company_name = "Your Company"
# company_email = "vfx@example.com"
# vendor_code_name = "VEND"

[export]
# Where exported documents land (default: current directory)
# output_dir = "/path/to/exports"
"#
}

/// Create the default config file if it doesn't already exist.
pub fn init_config() -> Result<bool> {
    let path = config_path()?;
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, default_config_template())?;
    Ok(true)
}
