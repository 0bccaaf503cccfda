use rand::RngCore;
use rand_distr::{Distribution, LogNormal};

use score_index::base::{DocId, ScoreValue, StreamOffset};
use score_index::score::entry::ScoreEntry;

/// Creates a synthetic posting stream with log-normal scores, increasing
/// document IDs (starting at 1) and increasing stream offsets
pub fn create_stream(count: usize, rng: &mut dyn RngCore) -> Vec<ScoreEntry> {
    let log_normal = LogNormal::new(0., 1.).unwrap();

    let mut entries = Vec::with_capacity(count);
    let mut offset: StreamOffset = 0;
    for ix in 0..count {
        entries.push(ScoreEntry {
            offset,
            score: log_normal.sample(rng) as ScoreValue,
            docid: (ix + 1) as DocId,
        });
        offset += 8 + rng.next_u64() % 56;
    }

    entries
}

/// Brute-force reference for what a correct selector retains: the `k`
/// highest-scoring entries with earliest-seen-wins on ties, in final
/// (score descending, document ID ascending) order
pub fn reference_top(entries: &[ScoreEntry], k: usize) -> Vec<ScoreEntry> {
    let mut sorted = entries.to_vec();
    // Stable sort: stream order survives among equal scores, so truncation
    // keeps the earliest-seen ones
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted.truncate(k);
    sorted.sort_by(ScoreEntry::cmp_ranked);
    sorted
}
