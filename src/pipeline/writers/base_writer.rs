use crate::data_model::{Comment, RemovedComment};
use crate::error::Result;

/// Trait for writing batches of comments to an output sink (e.g. file).
pub trait BaseWriter {
    /// Write retained comments.
    fn write_batch(&mut self, comments: &[Comment]) -> Result<()>;

    /// Write removed comments together with their removal reasons.
    fn write_removed(&mut self, removed: &[RemovedComment]) -> Result<()>;

    /// Finalize and close the output writer.
    fn close(self) -> Result<()>;
}
