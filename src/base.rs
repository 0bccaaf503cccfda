pub type TermIndex = usize;
pub type ScoreValue = f32;
pub type DocId = u64;

/// Byte position within a term's main posting stream
pub type StreamOffset = u64;

pub type BoxResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Document ID 0 denotes "no document"
pub const INVALID_DOC_ID: DocId = 0;

/// Marks object that have a length
pub trait Len {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
