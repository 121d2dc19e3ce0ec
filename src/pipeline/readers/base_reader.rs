use crate::data_model::Comment;
use crate::error::Result;

/// A source of comment records for one video.
pub trait BaseReader {
    fn read_comments(&self) -> Result<Box<dyn Iterator<Item = Result<Comment>>>>;
}
