use crate::error::ConfigError;
use crate::rewriter::DEFAULT_NAMESPACE;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    /// First path segment that marks an internal cross-component import.
    pub namespace: String,
    pub policy: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            policy: FailurePolicy::default(),
        }
    }
}

/// What the driver does when one file cannot be rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failure. Files handled before it stay rewritten.
    #[default]
    FailFast,
    /// Rewrite every file that can be rewritten and report the rest.
    KeepGoing,
}

impl Config {
    /// Load a config from a JSON file. Missing keys take their defaults.
    ///
    /// ```json
    /// { "namespace": "@material", "policy": "keep-going" }
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("gss-imports.json");
        fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn defaults_match_the_material_layout() {
        let config = Config::default();
        assert_eq!(config.namespace, "@material");
        assert_eq!(config.policy, FailurePolicy::FailFast);
    }

    #[test]
    fn load_full_config() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, r#"{ "namespace": "@acme", "policy": "keep-going" }"#);

        let config = Config::load(&path).expect("load");
        assert_eq!(config.namespace, "@acme");
        assert_eq!(config.policy, FailurePolicy::KeepGoing);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, r#"{ "policy": "fail-fast" }"#);

        assert_eq!(Config::load(&path).expect("load"), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, r#"{ "namespaces": "@acme" }"#);

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("temp dir");
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
