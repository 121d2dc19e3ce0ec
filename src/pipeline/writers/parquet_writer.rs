use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Builder, RecordBatch, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::data_model::{Comment, RemovalReason, RemovedComment};
use crate::error::Result;
use crate::pipeline::writers::BaseWriter;

fn create_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("author", DataType::Utf8, false),
        Field::new("like_count", DataType::Int64, false),
        Field::new("timestamp", DataType::Int64, true),
        Field::new("reason", DataType::Utf8, true),
    ]))
}

/// Writes comments to a Parquet file. Retained comments get a null `reason`.
pub struct ParquetWriter {
    schema: SchemaRef,
    writer: Option<ArrowWriter<File>>,
}

impl ParquetWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let schema = create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder().build();
        let writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        Ok(ParquetWriter {
            schema,
            writer: Some(writer),
        })
    }

    fn write_rows<'a, I>(&mut self, rows: I) -> Result<()>
    where
        I: ExactSizeIterator<Item = (&'a Comment, Option<RemovalReason>)>,
    {
        if rows.len() == 0 {
            return Ok(());
        }

        let mut id_builder = StringBuilder::new();
        let mut text_builder = StringBuilder::new();
        let mut author_builder = StringBuilder::new();
        let mut like_builder = Int64Builder::new();
        let mut timestamp_builder = Int64Builder::new();
        let mut reason_builder = StringBuilder::new();

        for (comment, reason) in rows {
            id_builder.append_value(&comment.id);
            text_builder.append_value(&comment.text);
            author_builder.append_value(&comment.author);
            like_builder.append_value(comment.like_count);
            timestamp_builder.append_option(comment.timestamp);
            reason_builder.append_option(reason.map(|r| r.label()));
        }

        let batch = RecordBatch::try_new(
            self.schema.clone(),
            vec![
                Arc::new(id_builder.finish()) as ArrayRef,
                Arc::new(text_builder.finish()) as ArrayRef,
                Arc::new(author_builder.finish()) as ArrayRef,
                Arc::new(like_builder.finish()) as ArrayRef,
                Arc::new(timestamp_builder.finish()) as ArrayRef,
                Arc::new(reason_builder.finish()) as ArrayRef,
            ],
        )?;

        if let Some(writer) = self.writer.as_mut() {
            writer.write(&batch)?;
        }
        Ok(())
    }
}

impl BaseWriter for ParquetWriter {
    fn write_batch(&mut self, comments: &[Comment]) -> Result<()> {
        self.write_rows(comments.iter().map(|c| (c, None)))
    }

    fn write_removed(&mut self, removed: &[RemovedComment]) -> Result<()> {
        self.write_rows(removed.iter().map(|r| (&r.comment, Some(r.reason))))
    }

    fn close(mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(())
    }
}
