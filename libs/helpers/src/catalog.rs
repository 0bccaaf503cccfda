use rand::{rngs::StdRng, SeedableRng};
use temp_dir::TempDir;

use crate::stream::create_stream;
use score_index::catalog::CatalogBuilder;
use score_index::score::entry::ScoreEntry;

/// A built score catalog in a temporary directory, together with the full
/// per-term streams it was fed
pub struct TestCatalog {
    pub dir: TempDir,
    pub vocabulary_size: usize,
    pub all_entries: Vec<Vec<ScoreEntry>>,
}

impl TestCatalog {
    pub fn new(vocabulary_size: usize, postings_per_term: usize, seed: Option<u64>) -> Self {
        let dir = TempDir::new().expect("Could not create temporary directory");
        let mut builder = CatalogBuilder::new(dir.path());

        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let mut all_entries = Vec::with_capacity(vocabulary_size);
        for term_ix in 0..vocabulary_size {
            let stream = create_stream(postings_per_term, &mut rng);
            for entry in stream.iter() {
                builder.add(term_ix, entry.score, entry.offset, entry.docid);
            }
            all_entries.push(stream);
        }

        builder.build().expect("Error while building the catalog");
        Self {
            dir,
            vocabulary_size,
            all_entries,
        }
    }
}
