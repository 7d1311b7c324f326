use crate::error::{Result, ShelfError};
use crate::model::FinePolicy;
use crate::store::fs::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Configuration for shelf, stored in .shelf/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShelfConfig {
    /// Data file, relative to the scope's base directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: String,

    #[serde(default = "default_rate")]
    pub fine_rate_per_day: f64,

    /// `null` means fines are never capped
    #[serde(default = "default_max_fine")]
    pub max_fine: Option<f64>,

    /// Gate for the admin menu. Stored in plain text; this keeps students out of the
    /// wrong menu, it is not access control.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Add the three starter books when the library is empty
    #[serde(default = "default_seed")]
    pub seed_defaults: bool,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_rate() -> f64 {
    FinePolicy::default().rate_per_day
}

fn default_max_fine() -> Option<f64> {
    FinePolicy::default().max_fine
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_seed() -> bool {
    true
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            fine_rate_per_day: default_rate(),
            max_fine: default_max_fine(),
            admin_password: default_admin_password(),
            seed_defaults: default_seed(),
        }
    }
}

/// Keys accepted by `shelf config <key> <value>`.
pub const CONFIG_KEYS: &[&str] = &[
    "data-file",
    "fine-rate",
    "max-fine",
    "admin-password",
    "seed-defaults",
];

impl ShelfConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShelfError::Io)?;
        let config: ShelfConfig =
            serde_json::from_str(&content).map_err(ShelfError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShelfError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ShelfError::Serialization)?;
        fs::write(config_path, content).map_err(ShelfError::Io)?;
        Ok(())
    }

    pub fn fine_policy(&self) -> FinePolicy {
        FinePolicy {
            rate_per_day: self.fine_rate_per_day,
            max_fine: self.max_fine,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.fine_rate_per_day.is_finite() || self.fine_rate_per_day < 0.0 {
            return Err(ShelfError::Config(format!(
                "fine rate must be a non-negative number, got {}",
                self.fine_rate_per_day
            )));
        }
        if let Some(max) = self.max_fine {
            if !max.is_finite() || max < 0.0 {
                return Err(ShelfError::Config(format!(
                    "max fine must be a non-negative number, got {}",
                    max
                )));
            }
        }
        if self.data_file.trim().is_empty() {
            return Err(ShelfError::Config("data file cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "data-file" => self.data_file.clone(),
            "fine-rate" => format!("{:.2}", self.fine_rate_per_day),
            "max-fine" => match self.max_fine {
                Some(max) => format!("{:.2}", max),
                None => "none".to_string(),
            },
            "admin-password" => self.admin_password.clone(),
            "seed-defaults" => self.seed_defaults.to_string(),
            other => return Err(ShelfError::Config(format!("Unknown config key: {}", other))),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "data-file" => updated.data_file = value.to_string(),
            "fine-rate" => updated.fine_rate_per_day = parse_amount(key, value)?,
            "max-fine" => {
                updated.max_fine = match value {
                    "none" | "off" => None,
                    v => Some(parse_amount(key, v)?),
                }
            }
            "admin-password" => updated.admin_password = value.to_string(),
            "seed-defaults" => {
                updated.seed_defaults = value.parse().map_err(|_| {
                    ShelfError::Config(format!("seed-defaults must be true or false, got {}", value))
                })?
            }
            other => return Err(ShelfError::Config(format!("Unknown config key: {}", other))),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn parse_amount(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ShelfError::Config(format!("{} must be a number, got {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ShelfConfig::default();
        assert_eq!(config.data_file, "library_data.txt");
        assert_eq!(config.fine_policy(), FinePolicy::capped());
        assert!(config.seed_defaults);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = ShelfConfig::load(temp.path().join("nope")).unwrap();
        assert_eq!(config, ShelfConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();

        let mut config = ShelfConfig::default();
        config.set("fine-rate", "10").unwrap();
        config.set("max-fine", "none").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = ShelfConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.fine_policy(), FinePolicy::uncapped());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{ "data_file": "books.txt" }"#,
        )
        .unwrap();

        let loaded = ShelfConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.data_file, "books.txt");
        assert_eq!(loaded.admin_password, "admin");
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut config = ShelfConfig::default();
        assert!(config.set("fine-rate", "-1").is_err());
        assert_eq!(config.fine_rate_per_day, 0.5);
    }

    #[test]
    fn test_unknown_key() {
        let mut config = ShelfConfig::default();
        assert!(matches!(config.set("colour", "red"), Err(ShelfError::Config(_))));
        assert!(config.get("colour").is_err());
    }

    #[test]
    fn test_get_formats_values() {
        let config = ShelfConfig::default();
        assert_eq!(config.get("fine-rate").unwrap(), "0.50");
        assert_eq!(config.get("max-fine").unwrap(), "10.00");
        assert_eq!(config.get("seed-defaults").unwrap(), "true");
    }
}
