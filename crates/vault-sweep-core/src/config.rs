use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::collections::HashSet;

/// Which role the configured extension set plays during orphan resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionMode {
    /// Extension plays no role.
    All,
    /// Only files whose extension is in the set are considered.
    Include,
    /// Files whose extension is in the set are skipped.
    Exclude,
}

/// Destination for a delete batch. Exactly one destination is attempted
/// per file; there is no fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletePolicy {
    /// Rename into the vault's `.trash/` directory (reversible).
    SoftTrash,
    /// Hand off to the operating system's trash.
    SystemTrash,
    /// Remove from disk. Unrecoverable.
    Permanent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Vault root directory.
    pub root_path: String,
    pub extension_mode: ExtensionMode,
    /// Comma-separated, case-insensitive extension list for the filter.
    pub extensions: String,
    /// Comma-separated folder paths excluded from orphan candidacy.
    pub excluded_folders: String,
    /// When true an excluded folder also excludes everything beneath it;
    /// when false only files whose direct parent matches are excluded.
    pub exclude_subfolders: bool,
    pub delete_policy: DeletePolicy,
    /// Glob patterns skipped entirely during vault enumeration.
    pub ignore_patterns: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root_path: ".".to_string(),
            extension_mode: ExtensionMode::All,
            extensions: "png,jpg,jpeg,gif,bmp,svg,webp,pdf,mp4,mp3".to_string(),
            excluded_folders: String::new(),
            exclude_subfolders: false,
            delete_policy: DeletePolicy::SoftTrash,
            ignore_patterns: Vec::new(),
        }
    }
}

impl SweepConfig {
    /// Parsed extension filter set: trimmed, lower-cased, empty entries discarded.
    pub fn extension_set(&self) -> HashSet<String> {
        self.extensions
            .split(',')
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    /// Parsed excluded-folder list: trimmed, empty entries discarded.
    pub fn excluded_folder_list(&self) -> Vec<String> {
        self.excluded_folders
            .split(',')
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

pub fn load_configuration() -> Result<SweepConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<SweepConfig>()
}
