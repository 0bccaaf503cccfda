//! On-disk catalog of per-term score indexes.
//!
//! The indexing pipeline keeps one bounded selector per term; building the
//! catalog finalizes every term's score index into a single `scores.dat`
//! file and serializes the per-term positions to `catalog.cbor`. Queries
//! load the catalog back, memory-mapped or fully in memory, and open a
//! reader over any term's blob.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::base::{DocId, Len, ScoreValue, StreamOffset, TermIndex};
use crate::errors::ScoreIndexError;
use crate::score::entry::ScoreEntry;
use crate::score::reader::ScoreIndexReader;
use crate::score::selector::TopEntries;
use crate::score::writer::ScoreIndexWriter;
use crate::utils::buffer::{Buffer, CountingWriter, MemoryBuffer, MmapBuffer};

pub const CATALOG_CBOR: &str = "catalog.cbor";
pub const SCORES_DAT: &str = "scores.dat";

/// Where one term's score index lives within the scores file
#[derive(Serialize, Deserialize)]
pub struct TermScoreInformation {
    /// Byte position of the blob
    pub position: u64,

    /// Byte length of the blob (header included)
    pub length: usize,

    /// Number of retained entries
    pub num_entries: usize,
}

/// Global information on the catalog structure
#[derive(Serialize, Deserialize)]
pub struct CatalogInformation {
    pub terms: Vec<TermScoreInformation>,
}

/// Accumulates the top-scoring postings of every term during the indexing
/// pass, then serializes them in one go
pub struct CatalogBuilder {
    folder: PathBuf,
    selectors: Vec<TopEntries>,
    built: bool,
}

impl CatalogBuilder {
    pub fn new(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            selectors: Vec::new(),
            built: false,
        }
    }

    /// Routes one posting into its term's selector, growing the term table
    /// on demand
    pub fn add(
        &mut self,
        term_ix: TermIndex,
        score: ScoreValue,
        offset: StreamOffset,
        docid: DocId,
    ) {
        assert!(
            !self.built,
            "catalog cannot be changed since it has been built"
        );

        if term_ix >= self.selectors.len() {
            self.selectors
                .resize_with(term_ix + 1, TopEntries::default);
        }

        self.selectors[term_ix].admit(ScoreEntry {
            offset,
            score,
            docid,
        });
    }

    /// Closes the catalog: finalizes each term's score index into the
    /// scores file and writes the catalog information
    pub fn build(&mut self) -> Result<(), ScoreIndexError> {
        assert!(!self.built, "catalog has already been built");
        self.built = true;

        let scores_path = self.folder.join(SCORES_DAT);
        let mut scores_file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(scores_path)?;

        let mut information = CatalogInformation { terms: Vec::new() };
        let mut position: u64 = 0;

        for (term_ix, selector) in std::mem::take(&mut self.selectors).into_iter().enumerate() {
            let num_entries = selector.len();

            let mut writer = ScoreIndexWriter::new(CountingWriter::new(&mut scores_file));
            for entry in selector.entries() {
                writer.add_entry(entry.score, entry.offset, entry.docid)?;
            }
            let length = writer.finalize()?;

            debug!(
                "term {}: {} entries at {} ({} bytes)",
                term_ix, num_entries, position, length
            );
            information.terms.push(TermScoreInformation {
                position,
                length,
                num_entries,
            });
            position += length as u64;
        }

        let info_path = self.folder.join(CATALOG_CBOR);
        let info_file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(info_path)?;
        ciborium::ser::into_writer(&information, info_file)
            .expect("error while serializing the score catalog information");

        info!(
            "built score catalog: {} terms, {} bytes of score indexes",
            information.terms.len(),
            position
        );
        Ok(())
    }
}

/// A finalized catalog, ready to serve readers
pub struct ScoreIndexCatalog {
    terms: Vec<TermScoreInformation>,
    buffer: Box<dyn Buffer>,
}

/// Loads a catalog built in `folder`, backed by a full in-memory copy or a
/// memory map of the scores file
pub fn load_catalog(folder: &Path, in_memory: bool) -> Result<ScoreIndexCatalog, ScoreIndexError> {
    let info_file = File::options().read(true).open(folder.join(CATALOG_CBOR))?;
    let information: CatalogInformation = ciborium::de::from_reader(info_file)
        .expect("error while loading the score catalog information");

    let scores_path = folder.join(SCORES_DAT);
    let buffer: Box<dyn Buffer> = if in_memory {
        Box::new(MemoryBuffer::new(&scores_path)?)
    } else {
        Box::new(MmapBuffer::new(&scores_path)?)
    };

    info!("loaded score catalog: {} terms", information.terms.len());
    Ok(ScoreIndexCatalog {
        terms: information.terms,
        buffer,
    })
}

impl ScoreIndexCatalog {
    /// Opens a fresh reader over one term's score index
    pub fn reader(&self, term_ix: TermIndex) -> Result<ScoreIndexReader<'_>, ScoreIndexError> {
        let info = self
            .terms
            .get(term_ix)
            .ok_or_else(|| ScoreIndexError::CorruptIndex {
                reason: format!(
                    "term {} is beyond the {} terms in the catalog",
                    term_ix,
                    self.terms.len()
                ),
            })?;

        let start = info.position as usize;
        let slice = self
            .buffer
            .slice(start, start + info.length)
            .ok_or_else(|| ScoreIndexError::CorruptIndex {
                reason: format!(
                    "term {} declares {} bytes at {} beyond the scores file",
                    term_ix, info.length, info.position
                ),
            })?;

        ScoreIndexReader::open(slice)
    }

    pub fn term_information(&self, term_ix: TermIndex) -> Option<&TermScoreInformation> {
        self.terms.get(term_ix)
    }
}

impl Len for ScoreIndexCatalog {
    fn len(&self) -> usize {
        self.terms.len()
    }
}
