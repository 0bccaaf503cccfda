//! Top-K score index for an impact-scored inverted index.
//!
//! While the indexing pipeline appends postings for a term, a bounded
//! selector retains the 20 highest-scoring ones together with their byte
//! offsets in the posting stream. The retained entries are serialized as a
//! small packed blob that a query can decode in priority order, short-cutting
//! a full posting-list scan when only the best results matter.

pub mod base;
pub mod catalog;
pub mod errors;

pub mod score {
    pub mod entry;
    pub mod reader;
    pub mod selector;
    pub mod writer;
}

pub mod utils {
    pub mod buffer;
}
