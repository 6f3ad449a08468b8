use crate::errors::{AppError, AppResult};
use crate::remote::{ApiStyle, BodyEncoding, DeleteMode, HttpRemoteConfig};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,

    /// Identifier sent to the backend; cleared by `config --logout`.
    #[serde(default)]
    pub user: Option<String>,

    /// Base URL of the remote endpoint. No URL means local-only.
    #[serde(default)]
    pub backend_url: Option<String>,

    #[serde(default)]
    pub api_style: ApiStyle,
    #[serde(default)]
    pub body_encoding: BodyEncoding,
    #[serde(default)]
    pub delete_mode: DeleteMode,

    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,
    #[serde(default = "default_pause")]
    pub default_pause: u32,
}

fn default_sync_interval() -> u64 {
    300
}
fn default_timeout() -> u64 {
    15
}
fn default_csv_delimiter() -> char {
    ','
}
fn default_pause() -> u32 {
    crate::models::day_record::DEFAULT_PAUSE_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            user: None,
            backend_url: None,
            api_style: ApiStyle::default(),
            body_encoding: BodyEncoding::default(),
            delete_mode: DeleteMode::default(),
            sync_interval_secs: default_sync_interval(),
            request_timeout_secs: default_timeout(),
            csv_delimiter: default_csv_delimiter(),
            default_pause: default_pause(),
        }
    }
}

impl Config {
    /// `~/.timetrack`, or `%APPDATA%\timetrack` on Windows
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("timetrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".timetrack")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timetrack.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timetrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Client settings, or `None` when no backend URL is set.
    pub fn remote_config(&self) -> Option<HttpRemoteConfig> {
        let base_url = self
            .backend_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())?;

        Some(HttpRemoteConfig {
            base_url: base_url.to_string(),
            user: self.user.clone(),
            style: self.api_style,
            encoding: self.body_encoding,
            delete_mode: self.delete_mode,
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        })
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(5))
    }

    /// Forget user and backend.
    pub fn logout(&mut self) {
        self.user = None;
        self.backend_url = None;
    }

    /// Create the config directory, the config file (unless `is_test`)
    /// and an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<(Self, PathBuf)> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let mut config = Self::load().unwrap_or_default();
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config.save()?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok((config, db_path))
    }
}
