use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use synthkit_core::{BusinessTypeRegistry, DEFAULT_BUSINESS_TYPE, Stage};
use synthkit_generate::GenerateOptions;
use synthkit_generate::scenario::DEFAULT_ROLE;

use crate::CliError;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "synthkit.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthkitConfig {
    pub generation: GenerationSettings,
    pub store: StoreSettings,
    /// JSON registry replacing the built-in business types.
    pub registry_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// RFC 3339 instant generated timestamps are anchored to.
    pub reference_time: Option<String>,
    pub default_stage: Stage,
    pub default_business_type: String,
    pub role: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            reference_time: None,
            default_stage: Stage::Growth,
            default_business_type: DEFAULT_BUSINESS_TYPE.to_string(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub root: PathBuf,
    pub base_url: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("datasets"),
            base_url: None,
        }
    }
}

impl SynthkitConfig {
    /// Load `path`, or `synthkit.toml` when present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    pub fn generate_options(&self) -> Result<GenerateOptions, CliError> {
        let reference_time = match &self.generation.reference_time {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map_err(|err| {
                    CliError::InvalidConfig(format!("invalid reference_time '{raw}': {err}"))
                })?
                .with_timezone(&Utc),
            None => GenerateOptions::default_reference_time(),
        };
        Ok(GenerateOptions { reference_time })
    }

    pub fn registry(&self, override_path: Option<&Path>) -> Result<BusinessTypeRegistry, CliError> {
        match override_path.or(self.registry_path.as_deref()) {
            Some(path) => Ok(BusinessTypeRegistry::from_path(path)?),
            None => Ok(BusinessTypeRegistry::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = SynthkitConfig::from_toml_str("").expect("parse config");
        assert_eq!(config.generation.default_stage, Stage::Growth);
        assert_eq!(config.generation.default_business_type, DEFAULT_BUSINESS_TYPE);
        assert_eq!(config.store.root, PathBuf::from("datasets"));
        assert!(config.registry_path.is_none());
        assert_eq!(
            config.generate_options().expect("options").reference_time,
            GenerateOptions::default_reference_time()
        );
    }

    #[test]
    fn sections_override_defaults() {
        let config = SynthkitConfig::from_toml_str(
            r#"
registry_path = "registry.json"

[generation]
reference_time = "2025-01-15T12:00:00Z"
default_stage = "enterprise"
role = "analyst"

[store]
root = "/tmp/synthkit"
base_url = "https://data.example.com"
"#,
        )
        .expect("parse config");

        assert_eq!(config.generation.default_stage, Stage::Enterprise);
        assert_eq!(config.generation.role, "analyst");
        assert_eq!(config.registry_path, Some(PathBuf::from("registry.json")));
        assert_eq!(config.store.base_url.as_deref(), Some("https://data.example.com"));
        let options = config.generate_options().expect("options");
        assert_eq!(options.reference_time.to_rfc3339(), "2025-01-15T12:00:00+00:00");
    }

    #[test]
    fn bad_reference_time_is_rejected() {
        let config = SynthkitConfig::from_toml_str("[generation]\nreference_time = \"soon\"")
            .expect("parse config");
        assert!(matches!(
            config.generate_options(),
            Err(CliError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_stage_fails_to_parse() {
        assert!(SynthkitConfig::from_toml_str("[generation]\ndefault_stage = \"seed\"").is_err());
    }
}
