#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;
    use comment_sieve::config::filter::{DEDUP_THRESHOLD_BOUNDS, MIN_CHARS_BOUNDS};
    use comment_sieve::config::sieve::Args;
    use comment_sieve::config::{load_filter_config, FilterConfiguration};
    use comment_sieve::error::PipelineError;

    // Helper to create a temporary config file with given content
    fn create_temp_config_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "{}", content).expect("Failed to write to temp file");
        temp_file
    }

    #[test]
    fn test_load_full_dashboard_settings() {
        let yaml_content = r#"
filters:
  min_chars: true
  min_alpha: "yes"
  min_words: 0
  blacklist_match: true
  emoji_only: true
  url_only: "off"
  timestamp_only: true
  repeat_char: 1
  english_only: false
  sentiment_filter: true
  dedup: true
  min_chars_threshold: "12"
  min_words_threshold: 4
  english_confidence: 0.75
  sentiment_threshold: -0.6
  dedup_threshold: 90
  channel: "ignored"
"#;
        let temp_file = create_temp_config_file(yaml_content);
        let config = load_filter_config(temp_file.path()).unwrap();
        assert_eq!(
            config,
            FilterConfiguration {
                min_words: false,
                url_only: false,
                english_only: false,
                min_chars_threshold: 12,
                min_words_threshold: 4,
                english_confidence: 0.75,
                sentiment_threshold: -0.6,
                dedup_threshold: 90,
                ..FilterConfiguration::default()
            }
        );
    }

    #[test]
    fn test_out_of_range_values_land_on_bounds() {
        let temp_file = create_temp_config_file("min_chars_threshold: -4\ndedup_threshold: 1000");
        let config = load_filter_config(temp_file.path()).unwrap();
        assert_eq!(config.min_chars_threshold, MIN_CHARS_BOUNDS.0);
        assert_eq!(config.dedup_threshold, DEDUP_THRESHOLD_BOUNDS.1);
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let original = FilterConfiguration {
            emoji_only: false,
            dedup_threshold: 70,
            ..FilterConfiguration::default()
        };
        let temp_file = create_temp_config_file(&serde_yaml::to_string(&original).unwrap());
        assert_eq!(load_filter_config(temp_file.path()).unwrap(), original);
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        match load_filter_config(dir.path()) {
            Err(PipelineError::ConfigError(msg)) => {
                assert!(msg.contains("Failed to read filter config file"))
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_args_defaults() {
        let args = Args::try_parse_from(["sieve", "--input-file", "comments.parquet"]).unwrap();
        assert_eq!(args.input_file, PathBuf::from("comments.parquet"));
        assert_eq!(args.output_file, PathBuf::from("retained.parquet"));
        assert_eq!(args.excluded_file, PathBuf::from("excluded.parquet"));
        assert_eq!(args.phrases, 0);
        assert!(!args.auto_blacklist);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_cli_auto_blacklist_requires_store() {
        let missing = Args::try_parse_from(["sieve", "-i", "in.parquet", "--auto-blacklist"]);
        assert!(missing.is_err());
        let ok = Args::try_parse_from([
            "sieve",
            "-i",
            "in.parquet",
            "--auto-blacklist",
            "--blacklist-store",
            "blacklist.json",
            "--phrases",
            "10",
        ])
        .unwrap();
        assert!(ok.auto_blacklist);
        assert_eq!(ok.phrases, 10);
    }
}
