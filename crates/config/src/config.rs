use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Artifact location used when neither the config file nor the CLI name one.
pub const DEFAULT_ARTIFACT_PATH: &str = "profitability_model.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Relative paths resolve against the process working directory.
    pub artifact: PathBuf,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from(DEFAULT_ARTIFACT_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLocation::Defaults => f.write_str("<built-in defaults>"),
            ConfigLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct ConfigDescriptor {
    pub location: ConfigLocation,
}

impl AppConfig {
    /// Without a path the built-in defaults are used; a path that does not
    /// exist yet is initialised with them.
    pub fn load_or_init(path: Option<&Path>) -> Result<(Self, ConfigDescriptor)> {
        match path {
            Some(path) => load_file_config(path),
            None => Ok((
                Self::default(),
                ConfigDescriptor {
                    location: ConfigLocation::Defaults,
                },
            )),
        }
    }

    pub fn load_with_overrides(overrides: &ConfigOverrides) -> Result<(Self, ConfigDescriptor)> {
        let (mut config, descriptor) = Self::load_or_init(overrides.config_path.as_deref())?;
        config.apply_overrides(overrides);
        Ok((config, descriptor))
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = overrides.artifact.as_ref() {
            self.model.artifact = path.clone();
        }
        if let Some(host) = overrides.server.host.as_ref() {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.server.port {
            self.server.port = port;
        }
        if let Some(debug) = overrides.server.debug {
            self.server.debug = debug;
        }
    }
}

fn load_file_config(path: &Path) -> Result<(AppConfig, ConfigDescriptor)> {
    let path_buf = path.to_path_buf();
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let cfg = AppConfig::default();
        save_config(&path_buf, &cfg)?;
        return Ok((
            cfg,
            ConfigDescriptor {
                location: ConfigLocation::File(path_buf),
            },
        ));
    }

    let contents = fs::read_to_string(&path_buf)
        .with_context(|| format!("failed to read configuration from {}", path_buf.display()))?;
    let cfg: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse configuration at {}", path_buf.display()))?;
    Ok((
        cfg,
        ConfigDescriptor {
            location: ConfigLocation::File(path_buf),
        },
    ))
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write configuration to {}", path.display()))
}

#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub artifact: Option<PathBuf>,
    pub server: ServerOverride,
}

#[derive(Debug, Default, Clone)]
pub struct ServerOverride {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: Option<bool>,
}
