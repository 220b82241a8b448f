use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Standard daily threshold (8h) beyond which minutes count as overtime.
pub const STANDARD_DAILY_MINUTES: i64 = 480;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_standard_daily_minutes")]
    pub standard_daily_minutes: i64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Extra non-working days on top of weekends.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_standard_daily_minutes() -> i64 {
    STANDARD_DAILY_MINUTES
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_role() -> String {
    "employee".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            standard_daily_minutes: default_standard_daily_minutes(),
            log_level: default_log_level(),
            default_role: default_role(),
            holidays: Vec::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("'database' must not be empty".into()));
        }
        if self.standard_daily_minutes <= 0 || self.standard_daily_minutes > 24 * 60 {
            return Err(AppError::Config(format!(
                "'standard_daily_minutes' out of range: {}",
                self.standard_daily_minutes
            )));
        }
        Ok(())
    }

    /// Return the names of the known fields missing from a raw YAML document.
    pub fn missing_fields(content: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let mapping = value
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration root is not a mapping".into()))?;

        Ok(
            [
                "database",
                "standard_daily_minutes",
                "log_level",
                "default_role",
                "holidays",
            ]
                .into_iter()
                .filter(|k| !mapping.contains_key(*k))
                .collect(),
        )
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
