use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::render::PrintMode;

pub const DEFAULT_CONFIG_FILE: &str = "shellrc.toml";

/// Database a live session starts in when nothing else names one.
pub const FALLBACK_DATABASE: &str = "test";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Connection string handed to the client executable.
    pub uri: String,
    /// Database client executable used to reach the server.
    pub client_binary: String,
    /// Per-call timeout. None waits as long as the client does.
    pub command_timeout_secs: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            client_binary: "mongosh".to_string(),
            command_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// Starting database, when set by the file, SHELLRC_DATABASE or --db.
    pub default_database: Option<String>,
    pub print_mode: PrintMode,
    pub use_colors: bool,
    pub history_file: PathBuf,
    /// Serve canned replies from this JSON file instead of a live server.
    pub snapshot: Option<PathBuf>,
}

impl ShellSettings {
    /// The configured starting database, or [`FALLBACK_DATABASE`].
    pub fn database(&self) -> &str {
        self.default_database.as_deref().unwrap_or(FALLBACK_DATABASE)
    }
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            default_database: None,
            print_mode: PrintMode::Pretty,
            use_colors: true,
            history_file: PathBuf::from(".shellrc_history"),
            snapshot: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub connection: ConnectionConfig,
    pub shell: ShellSettings,
}

impl ShellConfig {
    /// Load config from a TOML file, with environment variable overrides.
    /// A missing file means defaults. SHELLRC_CONFIG overrides the path.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if let Ok(env_path) = env::var("SHELLRC_CONFIG") {
            cfg_path = PathBuf::from(env_path);
        }

        let mut cfg = Self::load_file(&cfg_path)?;
        Self::apply_env_overrides(&mut cfg);
        Ok(cfg)
    }

    fn load_file(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(s) => {
                tracing::debug!("reading config from {}", path.display());
                Ok(toml::from_str(&s)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply SHELLRC_* environment variable overrides.
    fn apply_env_overrides(cfg: &mut Self) {
        if let Ok(v) = env::var("SHELLRC_URI") {
            cfg.connection.uri = v;
        }

        if let Ok(v) = env::var("SHELLRC_CLIENT") {
            cfg.connection.client_binary = v;
        }

        if let Ok(v) = env::var("SHELLRC_DATABASE") {
            cfg.shell.default_database = Some(v);
        }
    }
}
