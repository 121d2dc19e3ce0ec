// Declare the modules that form the library's public API
pub mod analysis;
pub mod config;
pub mod data_model;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod store;
pub mod utils;

pub use config::FilterConfiguration;
pub use data_model::{Comment, FilterOutcome, RemovalReason, RemovedComment};
pub use error::{PipelineError, Result};
pub use pipeline::models::Capabilities;
pub use pipeline::{filter, CommentFilterPipeline};
