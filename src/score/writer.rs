//! Writer side of the score index: feeds the bounded selector during the
//! indexing pass and serializes the survivors on finalize.

use std::io::Write;

use log::debug;

use crate::base::{DocId, Len, ScoreValue, StreamOffset};
use crate::score::entry::{ScoreEntry, ScoreIndexHeader};
use crate::score::selector::TopEntries;
use crate::utils::buffer::CountingWriter;

/// Builds one term's score index.
///
/// Created at the start of the term's indexing pass, fed entries for its
/// lifetime, finalized exactly once. Using the writer after finalize is a
/// protocol violation and fails fast.
pub struct ScoreIndexWriter<W: Write> {
    sink: CountingWriter<W>,
    selector: TopEntries,
    finalized: bool,
}

impl<W: Write> ScoreIndexWriter<W> {
    /// Binds a fresh selector to an output sink; no bytes are written yet
    pub fn new(sink: CountingWriter<W>) -> Self {
        Self {
            sink,
            selector: TopEntries::new(),
            finalized: false,
        }
    }

    /// Offers one posting to the selector.
    ///
    /// Rejection by score is a silent selection decision, never an error;
    /// the result only reflects the sink state.
    pub fn add_entry(
        &mut self,
        score: ScoreValue,
        offset: StreamOffset,
        docid: DocId,
    ) -> Result<(), std::io::Error> {
        assert!(!self.finalized, "score index writer used after finalize");
        self.selector.admit(ScoreEntry {
            offset,
            score,
            docid,
        });
        Ok(())
    }

    /// Number of entries currently retained
    pub fn len(&self) -> usize {
        self.selector.len()
    }

    /// Sorts the retained entries, then writes header and entries to the
    /// sink. Returns the number of bytes written.
    pub fn finalize(&mut self) -> Result<usize, std::io::Error> {
        assert!(!self.finalized, "score index finalized twice");
        self.finalized = true;

        let entries = std::mem::take(&mut self.selector).into_sorted_vec();

        // After the descending sort the minimum sits in the last slot; the
        // field is advisory and readers do not depend on it
        let header = ScoreIndexHeader {
            num_entries: entries.len() as u16,
            lowest_index: entries.len().saturating_sub(1) as u16,
            lowest_score: entries.last().map_or(0., |e| e.score),
        };

        let start = self.sink.written();
        header.write(&mut self.sink)?;
        for entry in entries.iter() {
            entry.write(&mut self.sink)?;
        }

        let written = self.sink.written() - start;
        debug!(
            "finalized score index: {} entries, {} bytes",
            entries.len(),
            written
        );
        Ok(written)
    }

    /// Releases the underlying sink
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}
