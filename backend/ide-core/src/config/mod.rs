//! Persistent settings for the IDE integration.
//!
//! Stored as a versioned JSON file. Every field carries a serde default so
//! configs written by older versions keep deserializing.

use crate::error::config::ConfigError;

use common::{ErrorLocation, ExternalEditorId};

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "ide_config.json";
const CONFIG_VERSION: u32 = 1;

/// Scheme the engine uses for project-relative resource paths.
pub const RES_SCHEME: &str = "res://";

/// Where the generated project lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPaths {
    /// Absolute project root; `res://` paths resolve against it.
    #[serde(default = "default_project_root")]
    pub root: PathBuf,

    /// Solution file, absolute or relative to the root.
    #[serde(default = "default_solution_path")]
    pub solution_path: PathBuf,

    /// Directory for generated metadata such as the messaging meta file.
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: PathBuf,

    /// Directory holding bundled helper executables (the Visual Studio
    /// opener lives here).
    #[serde(default = "default_editor_tools_dir")]
    pub editor_tools_dir: PathBuf,
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self {
            root: default_project_root(),
            solution_path: default_solution_path(),
            metadata_dir: default_metadata_dir(),
            editor_tools_dir: default_editor_tools_dir(),
        }
    }
}

/// The user's external-editor choice and custom-editor command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorPreferences {
    #[serde(default)]
    pub external_editor: ExternalEditorId,

    /// Executable used by [`ExternalEditorId::CustomEditor`].
    #[serde(default)]
    pub custom_exec_path: String,

    /// Argument template for the custom editor; supports `{file}`,
    /// `{project}`, `{line}` and `{col}` placeholders.
    #[serde(default)]
    pub custom_exec_args: String,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            external_editor: ExternalEditorId::default(),
            custom_exec_path: String::new(),
            custom_exec_args: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub project: ProjectPaths,

    #[serde(default)]
    pub editor: EditorPreferences,
}

impl Default for IdeConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            project: ProjectPaths::default(),
            editor: EditorPreferences::default(),
        }
    }
}

impl IdeConfig {
    /// Load a config file, falling back to defaults when it is missing.
    ///
    /// A malformed file is reported, not silently replaced: the caller
    /// decides whether to overwrite it.
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        let config: IdeConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
                message: format!("Invalid config file {}: {e}", path.display()),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if config.version != CONFIG_VERSION {
            warn!(
                "Config version {} differs from current {CONFIG_VERSION}; \
                 unknown fields were ignored",
                config.version
            );
        }

        Ok(config)
    }

    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: format!("Failed to serialize config: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(CONFIG_FILE_NAME), json)?;
        Ok(())
    }

    /// Platform config directory for standalone use of the subsystem.
    /// Embedded hosts normally pass their own settings directory instead.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ide-bridge")
    }

    /// Resolve an engine resource path (`res://scripts/a.cs`) to an
    /// absolute filesystem path. Non-resource paths pass through.
    pub fn globalize_path(&self, path: &str) -> PathBuf {
        match path.strip_prefix(RES_SCHEME) {
            Some("") => self.project.root.clone(),
            Some(rest) => self.project.root.join(rest),
            None => PathBuf::from(path),
        }
    }

    /// Absolute path to the solution file.
    pub fn solution_path_abs(&self) -> PathBuf {
        let sln = &self.project.solution_path;
        if sln.is_absolute() {
            sln.clone()
        } else {
            let joined = self.project.root.join(sln);
            std::path::absolute(&joined).unwrap_or(joined)
        }
    }

    /// Absolute path to the metadata directory.
    pub fn metadata_dir_abs(&self) -> PathBuf {
        let dir = &self.project.metadata_dir;
        if dir.is_absolute() {
            dir.clone()
        } else {
            self.project.root.join(dir)
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_solution_path() -> PathBuf {
    PathBuf::from("project.sln")
}

fn default_metadata_dir() -> PathBuf {
    PathBuf::from(".metadata")
}

fn default_editor_tools_dir() -> PathBuf {
    PathBuf::from("tools")
}
