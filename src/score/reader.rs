//! Reader side of the score index: a forward, single-pass cursor over a
//! finalized buffer.

use crate::errors::ScoreIndexError;
use crate::score::entry::{ScoreEntry, ScoreIndexHeader, MAX_SCORE_ENTRIES};

/// Decodes one finalized score index.
///
/// The buffer is owned by the caller; the reader holds a borrow and an
/// independent cursor, so any number of readers may scan the same buffer
/// concurrently. The sequence is finite, emitted in on-disk order (score
/// descending, document ID ascending among ties) and not restartable; scan
/// again by opening a fresh reader.
pub struct ScoreIndexReader<'a> {
    /// The entry region, bounds-checked at open
    entries: &'a [u8],
    header: ScoreIndexHeader,
    index: usize,
}

impl<'a> ScoreIndexReader<'a> {
    /// Validates the header at the start of `buffer` and positions the
    /// cursor on the first entry
    pub fn open(buffer: &'a [u8]) -> Result<Self, ScoreIndexError> {
        if buffer.len() < ScoreIndexHeader::WIRE_SIZE {
            return Err(ScoreIndexError::CorruptIndex {
                reason: format!("buffer of {} bytes is shorter than a header", buffer.len()),
            });
        }

        let mut slice = buffer;
        let header = ScoreIndexHeader::read(&mut slice)?;

        if header.num_entries as usize > MAX_SCORE_ENTRIES {
            return Err(ScoreIndexError::CorruptIndex {
                reason: format!(
                    "{} entries declared, cap is {}",
                    header.num_entries, MAX_SCORE_ENTRIES
                ),
            });
        }

        let needed = header.num_entries as usize * ScoreEntry::WIRE_SIZE;
        if slice.len() < needed {
            return Err(ScoreIndexError::CorruptIndex {
                reason: format!(
                    "{} entries declared but only {} bytes remain",
                    header.num_entries,
                    slice.len()
                ),
            });
        }

        Ok(Self {
            entries: &slice[..needed],
            header,
            index: 0,
        })
    }

    pub fn num_entries(&self) -> usize {
        self.header.num_entries as usize
    }

    /// Header as stored; `lowest_index`/`lowest_score` are advisory
    pub fn header(&self) -> &ScoreIndexHeader {
        &self.header
    }
}

impl Iterator for ScoreIndexReader<'_> {
    type Item = ScoreEntry;

    /// Decodes the entry under the cursor and advances by one entry width.
    /// Exhaustion is terminal and idempotent.
    fn next(&mut self) -> Option<ScoreEntry> {
        if self.index >= self.num_entries() {
            return None;
        }

        let start = self.index * ScoreEntry::WIRE_SIZE;
        let mut slice = &self.entries[start..start + ScoreEntry::WIRE_SIZE];
        let entry = ScoreEntry::read(&mut slice).expect("entry region was checked at open");

        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_entries() - self.index;
        (remaining, Some(remaining))
    }
}
