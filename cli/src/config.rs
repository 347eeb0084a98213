//! CLI Configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub default_azs: Option<u32>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, String> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            Ok(Self::default())
        }
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".vpcblocks").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str("default_azs = 3\ndefault_format = \"terraform\"").unwrap();
        assert_eq!(config.default_azs, Some(3));
        assert_eq!(config.default_format.as_deref(), Some("terraform"));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.default_azs.is_none());
        assert!(config.default_format.is_none());
    }
}
