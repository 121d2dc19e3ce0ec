// src/pipeline/readers/mod.rs

pub mod base_reader;
pub mod parquet_reader;

pub use base_reader::BaseReader;
pub use parquet_reader::ParquetReader;
