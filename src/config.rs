//! Simulator configuration, loaded from a TOML file.

use serde::Deserialize;

fn default_data_words() -> usize {
    1000
}

fn default_max_cycles() -> u64 {
    100_000
}

/// Top-level configuration, mirroring the TOML file's two tables.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub memory: MemoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { general: GeneralConfig::default(), memory: MemoryConfig::default() }
    }
}

/// `[general]`: tracing and the run-length cap the driver honors.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub trace: bool,
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { trace: false, max_cycles: default_max_cycles() }
    }
}

/// `[memory]`: the data memory's size override.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    #[serde(default = "default_data_words")]
    pub data_words: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { data_words: default_data_words() }
    }
}

impl Config {
    /// Loads a config from a TOML file, falling back to defaults for any
    /// field (or whole table) the file omits.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&text).map_err(ConfigError::Parse)
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let cfg = Config::default();
        assert!(!cfg.general.trace);
        assert_eq!(cfg.general.max_cycles, 100_000);
        assert_eq!(cfg.memory.data_words, 1000);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("[general]\ntrace = true\n").unwrap();
        assert!(cfg.general.trace);
        assert_eq!(cfg.general.max_cycles, 100_000);
        assert_eq!(cfg.memory.data_words, 1000);
    }

    #[test]
    fn memory_table_overrides_data_words() {
        let cfg: Config = toml::from_str("[memory]\ndata_words = 4096\n").unwrap();
        assert_eq!(cfg.memory.data_words, 4096);
    }
}
