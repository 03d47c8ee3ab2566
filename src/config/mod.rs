use crate::errors::{AppError, AppResult};
use crate::models::ListFilter;
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys every configuration file is expected to carry.
pub const CONFIG_FIELDS: &[&str] = &[
    "database",
    "default_filter",
    "show_expiry_marks",
    "confirm_destructive",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// List filter used when `list` is run without `--filter`.
    #[serde(default = "default_filter")]
    pub default_filter: String,
    #[serde(default = "default_true")]
    pub show_expiry_marks: bool,
    /// Ask before `del` and `import`.
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_filter() -> String {
    "all".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_filter: default_filter(),
            show_expiry_marks: true,
            confirm_destructive: true,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shelfmap")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".shelfmap")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shelfmap.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shelfmap.sqlite")
    }

    pub fn list_filter(&self) -> ListFilter {
        ListFilter::from_name(&self.default_filter)
    }

    /// Load configuration from file, or return defaults if not found.
    /// An unreadable file is reported and replaced by defaults.
    pub fn load() -> Self {
        let path = Self::config_file();
        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warning(format!("{e} ({}), using defaults", path.display()));
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Fields of [`CONFIG_FIELDS`] absent from the YAML document at `path`.
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
        let Some(map) = yaml.as_mapping() else {
            return Ok(CONFIG_FIELDS.to_vec());
        };

        Ok(CONFIG_FIELDS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String((*k).to_string())))
            .collect())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes()).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("shelfmap.sqlite")
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
