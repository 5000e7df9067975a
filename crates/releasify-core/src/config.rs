use crate::error::{ReleasifyError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "releasify.yaml";

const DEFAULT_WORKING_DIRECTORY: &str = ".";
const DEFAULT_REMOVE_SELF: bool = false;
const DEFAULT_MANUAL_RESOLVE: bool = true;

// ---------------------------------------------------------------------------
// ConfigWarning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    pub key: &'static str,
    pub message: String,
}

// ---------------------------------------------------------------------------
// ActionDecl
// ---------------------------------------------------------------------------

/// One entry of the `actions` list.
///
/// Every key is optional at parse time. Missing keys are reported per entry
/// when the run reaches it, so one bad entry never prevents the others from
/// running.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionDecl {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub dst: Option<String>,
}

impl ActionDecl {
    /// The source path, honouring alias priority: `src` before `path`.
    pub fn source(&self) -> Option<&str> {
        self.src.as_deref().or(self.path.as_deref())
    }
}

impl fmt::Display for ActionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("action", &self.action),
            ("src", &self.src),
            ("path", &self.path),
            ("dst", &self.dst),
        ];
        let parts: Vec<String> = fields
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}: {v}")))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

// ---------------------------------------------------------------------------
// RunSettings
// ---------------------------------------------------------------------------

/// Process-wide switches for one run, fixed once the config is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Delete the running program once every action has been processed.
    pub remove_self: bool,
    /// Pause failed actions for a retry/skip decision instead of skipping.
    pub manual_resolve: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            remove_self: DEFAULT_REMOVE_SELF,
            manual_resolve: DEFAULT_MANUAL_RESOLVE,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
    #[serde(default)]
    pub remove_self: Option<bool>,
    #[serde(default)]
    pub manual_resolve: Option<bool>,
    #[serde(default)]
    pub actions: Vec<ActionDecl>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReleasifyError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(data)?;
        Ok(cfg)
    }

    pub fn working_directory(&self) -> &Path {
        self.working_directory
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_WORKING_DIRECTORY))
    }

    pub fn settings(&self) -> RunSettings {
        RunSettings {
            remove_self: self.remove_self.unwrap_or(DEFAULT_REMOVE_SELF),
            manual_resolve: self.manual_resolve.unwrap_or(DEFAULT_MANUAL_RESOLVE),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Report every top-level setting that fell back to its default.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let defaulted = [
            (
                "working-directory",
                self.working_directory.is_none(),
                DEFAULT_WORKING_DIRECTORY.to_string(),
            ),
            (
                "remove-self",
                self.remove_self.is_none(),
                DEFAULT_REMOVE_SELF.to_string(),
            ),
            (
                "manual-resolve",
                self.manual_resolve.is_none(),
                DEFAULT_MANUAL_RESOLVE.to_string(),
            ),
        ];

        defaulted
            .into_iter()
            .filter(|(_, missing, _)| *missing)
            .map(|(key, _, default)| ConfigWarning {
                key,
                message: format!("{key} was not specified, defaulting to {default}"),
            })
            .collect()
    }
}
