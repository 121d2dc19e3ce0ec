// src/config.rs
pub mod filter;
pub mod parquet;
pub mod sieve;

pub use filter::FilterConfiguration;
pub use parquet::ParquetInputConfig;

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads filter settings from a YAML (or JSON) file.
///
/// Failing to read or parse the file is an error; the values inside are
/// interpreted leniently by [`FilterConfiguration::from_settings`].
pub fn load_filter_config<P: AsRef<Path>>(config_path: P) -> Result<FilterConfiguration> {
    let path_ref = config_path.as_ref();
    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read filter config file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    if config_content.trim().is_empty() {
        debug!(path = %path_ref.display(), "Empty filter config; using defaults");
        return Ok(FilterConfiguration::default());
    }

    let settings: serde_json::Value = serde_yaml::from_str(&config_content).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to parse filter config from '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    Ok(FilterConfiguration::from_settings(&settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Helper to create a temporary config file with given content
    fn create_temp_config_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "{}", content).expect("Failed to write to temp file");
        temp_file
    }

    #[test]
    fn test_load_valid_yaml_config() {
        let temp_file = create_temp_config_file(
            r#"
filters:
  english_only: false
  min_chars_threshold: 5
  dedup_threshold: 92
"#,
        );
        let config = load_filter_config(temp_file.path()).unwrap();
        assert!(!config.english_only);
        assert_eq!(config.min_chars_threshold, 5);
        assert_eq!(config.dedup_threshold, 92);
        assert!(config.sentiment_filter);
    }

    #[test]
    fn test_load_json_config() {
        let temp_file =
            create_temp_config_file(r#"{"dedup": false, "sentiment_threshold": -2.0}"#);
        let config = load_filter_config(temp_file.path()).unwrap();
        assert!(!config.dedup);
        assert_eq!(config.sentiment_threshold, -1.0);
    }

    #[test]
    fn test_load_empty_file_gives_defaults() {
        let temp_file = create_temp_config_file("");
        let config = load_filter_config(temp_file.path()).unwrap();
        assert_eq!(config, FilterConfiguration::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_filter_config("non_existent_filters.yaml");
        match result {
            Err(PipelineError::ConfigError(msg)) => {
                assert!(msg.contains("Failed to read filter config file"));
                assert!(msg.contains("non_existent_filters.yaml"));
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml_syntax() {
        let temp_file = create_temp_config_file("filters: [unclosed");
        match load_filter_config(temp_file.path()) {
            Err(PipelineError::ConfigError(msg)) => {
                assert!(msg.contains("Failed to parse filter config"))
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }
}
