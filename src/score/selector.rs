//! Bounded selection of the highest-scoring postings of a stream.

use crate::base::{Len, ScoreValue};
use crate::score::entry::{ScoreEntry, MAX_SCORE_ENTRIES};

/// Retains the [`MAX_SCORE_ENTRIES`] highest-scoring entries of an unbounded
/// stream within a fixed memory budget.
///
/// The slots form an index-addressed array with a cached running minimum
/// `(lowest_index, lowest_score)`. Once full, entries scoring at or below the
/// minimum are rejected in O(1); an admission overwrites the minimum slot and
/// rescans the array. With 20 slots the rescan beats heap bookkeeping, and
/// the serialized header only needs a single minimum cache, not a heap order.
pub struct TopEntries {
    entries: Vec<ScoreEntry>,
    lowest_index: usize,
    lowest_score: ScoreValue,
}

impl TopEntries {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_SCORE_ENTRIES),
            lowest_index: 0,
            lowest_score: 0.,
        }
    }

    /// Offers one posting.
    ///
    /// Rejection is a selection decision, not an error: an exact tie with the
    /// current minimum is rejected (strict comparison), so the earliest-seen
    /// entry survives among equal scores.
    pub fn admit(&mut self, entry: ScoreEntry) {
        if self.entries.len() < MAX_SCORE_ENTRIES {
            self.entries.push(entry);
            // The cache becomes authoritative on the transition to full
            if self.entries.len() == MAX_SCORE_ENTRIES || entry.score < self.lowest_score {
                self.rescan_lowest();
            }
            return;
        }

        if entry.score <= self.lowest_score {
            return;
        }

        self.entries[self.lowest_index] = entry;
        self.rescan_lowest();
    }

    /// Recomputes the cached minimum over all occupied slots
    fn rescan_lowest(&mut self) {
        let mut lowest = 0;
        for ix in 1..self.entries.len() {
            if self.entries[ix].score < self.entries[lowest].score {
                lowest = ix;
            }
        }
        self.lowest_index = lowest;
        self.lowest_score = self.entries[lowest].score;
    }

    pub fn lowest_score(&self) -> ScoreValue {
        self.lowest_score
    }

    pub fn lowest_index(&self) -> usize {
        self.lowest_index
    }

    /// Occupied slots, in insertion/replacement order
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Consumes the selector, returning the retained entries sorted by
    /// score descending then document ID ascending
    pub fn into_sorted_vec(mut self) -> Vec<ScoreEntry> {
        self.entries.sort_unstable_by(ScoreEntry::cmp_ranked);
        self.entries
    }
}

impl Default for TopEntries {
    fn default() -> Self {
        Self::new()
    }
}

impl Len for TopEntries {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{DocId, StreamOffset};

    fn entry(score: ScoreValue, docid: DocId, offset: StreamOffset) -> ScoreEntry {
        ScoreEntry {
            offset,
            score,
            docid,
        }
    }

    /// Fills a selector with distinct scores `base..base + MAX`
    fn filled(base: ScoreValue) -> TopEntries {
        let mut top = TopEntries::new();
        for ix in 0..MAX_SCORE_ENTRIES {
            top.admit(entry(base + ix as ScoreValue, (ix + 1) as DocId, 0));
        }
        top
    }

    #[test]
    fn test_fill_keeps_all_slots() {
        let top = filled(1.);
        assert_eq!(top.len(), MAX_SCORE_ENTRIES);

        // No eviction below the cap: slots keep insertion order
        for (ix, e) in top.entries().iter().enumerate() {
            assert_eq!(e.docid, (ix + 1) as DocId);
        }
        assert_eq!(top.lowest_index(), 0);
        assert_eq!(top.lowest_score(), 1.);
    }

    #[test]
    fn test_replace_evicts_minimum_slot() {
        // Minimum sits mid-array
        let mut top = TopEntries::new();
        for ix in 0..MAX_SCORE_ENTRIES {
            let score = if ix == 7 { 0.5 } else { 10. + ix as ScoreValue };
            top.admit(entry(score, (ix + 1) as DocId, 0));
        }
        assert_eq!(top.lowest_index(), 7);
        assert_eq!(top.lowest_score(), 0.5);

        top.admit(entry(5., 100, 42));

        // Slot 7 was overwritten, every other slot untouched
        assert_eq!(top.len(), MAX_SCORE_ENTRIES);
        assert_eq!(top.entries()[7], entry(5., 100, 42));
        assert_eq!(top.lowest_index(), 7);
        assert_eq!(top.lowest_score(), 5.);
        for ix in (0..MAX_SCORE_ENTRIES).filter(|&ix| ix != 7) {
            assert_eq!(top.entries()[ix].docid, (ix + 1) as DocId);
        }
    }

    #[test]
    fn test_rejects_below_minimum() {
        let mut top = filled(1.);
        let before = top.entries().to_vec();

        top.admit(entry(0.5, 99, 0));

        assert_eq!(top.entries(), &before[..]);
    }

    #[test]
    fn test_exact_tie_rejected() {
        let mut top = filled(5.);
        assert_eq!(top.lowest_score(), 5.);
        let before = top.entries().to_vec();

        // Strict comparison: an exact tie keeps the earliest-seen entry
        top.admit(entry(5., 99, 0));

        assert_eq!(top.entries(), &before[..]);
        assert_eq!(top.lowest_score(), 5.);
    }

    #[test]
    fn test_sorted_output() {
        let mut top = TopEntries::new();
        top.admit(entry(1., 5, 100));
        top.admit(entry(3., 2, 50));
        top.admit(entry(2., 9, 75));
        top.admit(entry(2., 4, 60));

        let sorted = top.into_sorted_vec();
        let keys: Vec<(ScoreValue, DocId)> = sorted.iter().map(|e| (e.score, e.docid)).collect();
        assert_eq!(keys, vec![(3., 2), (2., 4), (2., 9), (1., 5)]);
    }
}
