use serde::Deserialize;

/// Column mapping for a Parquet file of comments.
#[derive(Deserialize, Debug, Clone)]
pub struct ParquetInputConfig {
    pub path: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default = "default_text_column")]
    pub text_column: String,
    // Optional columns; missing ones fall back to empty/zero values
    pub author_column: Option<String>,
    pub like_count_column: Option<String>,
    pub timestamp_column: Option<String>,
    pub batch_size: Option<usize>,
}

fn default_id_column() -> String {
    "id".to_string()
}

fn default_text_column() -> String {
    "text".to_string()
}

impl ParquetInputConfig {
    /// The column layout the comment fetcher writes.
    pub fn new(path: impl Into<String>) -> Self {
        ParquetInputConfig {
            path: path.into(),
            id_column: default_id_column(),
            text_column: default_text_column(),
            author_column: Some("author".to_string()),
            like_count_column: Some("like_count".to_string()),
            timestamp_column: Some("timestamp".to_string()),
            batch_size: Some(1024),
        }
    }
}
