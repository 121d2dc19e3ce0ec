pub mod base_writer;
pub mod parquet_writer;

pub use base_writer::BaseWriter;
pub use parquet_writer::ParquetWriter;
