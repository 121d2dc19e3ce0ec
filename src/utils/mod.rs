// Utils

pub mod common;
pub mod prometheus_metrics;
pub mod text;
pub mod union_find;

pub use text::{normalize, ENGLISH_STOP_WORDS};
pub use union_find::DisjointSet;
