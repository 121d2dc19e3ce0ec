// src/pipeline/readers/parquet_reader.rs

use crate::config::ParquetInputConfig;
use crate::data_model::Comment;
use crate::error::{PipelineError, Result};
use crate::pipeline::readers::BaseReader;

use arrow::array::{Array, Int64Array, RecordBatch, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatchReader;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use tracing::{debug, warn};

/// Resolved positions of the configured columns in the file schema.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    id: usize,
    text: usize,
    author: Option<usize>,
    like_count: Option<usize>,
    timestamp: Option<usize>,
}

/// Reads Comments from a Parquet file.
///
/// A null `text` reads as an empty comment and a null `like_count` as zero.
/// A null `id` is replaced by `<null id: row <n> of <path>>`. The angle
/// brackets and spaces keep it apart from platform comment ids.
#[derive(Debug, Clone)]
pub struct ParquetReader {
    config: ParquetInputConfig,
}

fn is_string_type(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View)
}

fn is_integer_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 | DataType::UInt8
            | DataType::UInt16 | DataType::UInt32
    )
}

fn required_column(schema: &Schema, name: &str, is_valid: fn(&DataType) -> bool) -> Result<usize> {
    let idx = schema.index_of(name).map_err(|_| {
        PipelineError::ConfigError(format!("Column '{}' not found in Parquet schema.", name))
    })?;
    let data_type = schema.field(idx).data_type();
    if !is_valid(data_type) {
        return Err(PipelineError::ConfigError(format!(
            "Column '{}' has unsupported type {:?}",
            name, data_type
        )));
    }
    Ok(idx)
}

fn optional_column(
    schema: &Schema,
    name: Option<&String>,
    is_valid: fn(&DataType) -> bool,
) -> Option<usize> {
    let name = name?;
    match schema.index_of(name) {
        Ok(idx) if is_valid(schema.field(idx).data_type()) => Some(idx),
        Ok(idx) => {
            warn!(
                column = %name,
                data_type = ?schema.field(idx).data_type(),
                "Optional column has an unsupported type; ignoring it"
            );
            None
        }
        Err(_) => {
            debug!(column = %name, "Optional column not present");
            None
        }
    }
}

fn string_column(batch: &RecordBatch, idx: usize) -> Result<StringArray> {
    let casted = cast(batch.column(idx), &DataType::Utf8)?;
    casted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| PipelineError::Unexpected(format!("Column {} is not a Utf8 array", idx)))
}

fn int_column(batch: &RecordBatch, idx: usize) -> Result<Int64Array> {
    let casted = cast(batch.column(idx), &DataType::Int64)?;
    casted
        .as_any()
        .downcast_ref::<Int64Array>()
        .cloned()
        .ok_or_else(|| PipelineError::Unexpected(format!("Column {} is not an Int64 array", idx)))
}

fn null_id(source: &str, row: usize) -> String {
    format!("<null id: row {} of {}>", row, source)
}

fn batch_to_comments(
    batch: &RecordBatch,
    layout: ColumnLayout,
    source: &str,
    first_row: usize,
) -> Result<Vec<Comment>> {
    let ids = string_column(batch, layout.id)?;
    let texts = string_column(batch, layout.text)?;
    let authors = layout.author.map(|idx| string_column(batch, idx)).transpose()?;
    let likes = layout.like_count.map(|idx| int_column(batch, idx)).transpose()?;
    let timestamps = layout.timestamp.map(|idx| int_column(batch, idx)).transpose()?;

    if ids.null_count() > 0 {
        warn!(
            path = source,
            rows = ids.null_count(),
            "Comments without an id; generated row ids are used instead"
        );
    }

    let comments = (0..batch.num_rows())
        .map(|i| {
            let id = if ids.is_null(i) {
                null_id(source, first_row + i)
            } else {
                ids.value(i).to_string()
            };
            let text = if texts.is_null(i) {
                String::new()
            } else {
                texts.value(i).to_string()
            };
            let author = match &authors {
                Some(arr) if !arr.is_null(i) => arr.value(i).to_string(),
                _ => String::new(),
            };
            let like_count = match &likes {
                Some(arr) if !arr.is_null(i) => arr.value(i),
                _ => 0,
            };
            let timestamp = match &timestamps {
                Some(arr) if !arr.is_null(i) => Some(arr.value(i)),
                _ => None,
            };
            Comment {
                id,
                text,
                author,
                like_count,
                timestamp,
            }
        })
        .collect();
    Ok(comments)
}

impl ParquetReader {
    pub fn new(config: ParquetInputConfig) -> Self {
        ParquetReader { config }
    }

    /// Opens the file and returns an iterator over its comments, batch by batch.
    pub fn into_comments(self) -> Result<impl Iterator<Item = Result<Comment>>> {
        let file = File::open(&self.config.path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let builder = if let Some(batch_size) = self.config.batch_size {
            builder.with_batch_size(batch_size)
        } else {
            builder
        };
        let record_batch_reader = builder.build()?;
        let schema = record_batch_reader.schema();

        let layout = ColumnLayout {
            id: required_column(&schema, &self.config.id_column, is_string_type)?,
            text: required_column(&schema, &self.config.text_column, is_string_type)?,
            author: optional_column(&schema, self.config.author_column.as_ref(), is_string_type),
            like_count: optional_column(
                &schema,
                self.config.like_count_column.as_ref(),
                is_integer_type,
            ),
            timestamp: optional_column(
                &schema,
                self.config.timestamp_column.as_ref(),
                is_integer_type,
            ),
        };
        debug!(path = %self.config.path, ?layout, "Reading comments");

        let source = self.config.path;
        let mut rows_seen = 0usize;
        let iterator = record_batch_reader.flat_map(move |batch_result| match batch_result {
            Ok(batch) => {
                let first_row = rows_seen;
                rows_seen += batch.num_rows();
                match batch_to_comments(&batch, layout, &source, first_row) {
                    Ok(comments) => comments.into_iter().map(Ok).collect::<Vec<_>>(),
                    Err(e) => vec![Err(e)],
                }
            }
            Err(e) => vec![Err(PipelineError::Unexpected(format!(
                "Failed to read Parquet batch from '{}': {}",
                source, e
            )))],
        });

        Ok(iterator)
    }

    /// Reads the whole file, stopping at the first bad batch.
    pub fn read_all(self) -> Result<Vec<Comment>> {
        self.into_comments()?.collect()
    }
}

impl BaseReader for ParquetReader {
    fn read_comments(&self) -> Result<Box<dyn Iterator<Item = Result<Comment>>>> {
        Ok(Box::new(self.clone().into_comments()?))
    }
}
