//! Wire format of the score index: packed entry and header records.
//!
//! Field order, widths and endianness are the serialization contract between
//! writer and reader; both sides go through the functions here so the two
//! paths cannot drift apart.

use std::cmp::Ordering;
use std::fmt;
use std::io::Write;
use std::mem::size_of;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::base::{DocId, ScoreValue, StreamOffset};

/// Maximum number of entries a score index retains for one term
pub const MAX_SCORE_ENTRIES: usize = 20;

/// One retained posting: its byte position in the main posting stream,
/// its relevance score, and its document
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ScoreEntry {
    pub offset: StreamOffset,
    pub score: ScoreValue,
    pub docid: DocId,
}

impl ScoreEntry {
    /// Serialized width: offset (u64) | score (f32) | docid (u64)
    pub const WIRE_SIZE: usize =
        size_of::<StreamOffset>() + size_of::<ScoreValue>() + size_of::<DocId>();

    /// Ranking order: score descending, then document ID ascending
    pub fn cmp_ranked(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then(self.docid.cmp(&other.docid))
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        writer.write_u64::<BigEndian>(self.offset)?;
        writer.write_f32::<BigEndian>(self.score)?;
        writer.write_u64::<BigEndian>(self.docid)?;
        Ok(())
    }

    pub fn read(slice: &mut &[u8]) -> Result<Self, std::io::Error> {
        let offset = slice.read_u64::<BigEndian>()?;
        let score = slice.read_f32::<BigEndian>()?;
        let docid = slice.read_u64::<BigEndian>()?;
        Ok(Self {
            offset,
            score,
            docid,
        })
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{},{})", self.docid, self.score, self.offset)
    }
}

/// Fixed-size header preceding the entries.
///
/// `lowest_index`/`lowest_score` are write-time bookkeeping; a reader only
/// relies on `num_entries`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreIndexHeader {
    pub num_entries: u16,
    pub lowest_index: u16,
    pub lowest_score: ScoreValue,
}

impl ScoreIndexHeader {
    /// Serialized width: num_entries (u16) | lowest_index (u16) | lowest_score (f32)
    pub const WIRE_SIZE: usize = 2 * size_of::<u16>() + size_of::<ScoreValue>();

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        writer.write_u16::<BigEndian>(self.num_entries)?;
        writer.write_u16::<BigEndian>(self.lowest_index)?;
        writer.write_f32::<BigEndian>(self.lowest_score)?;
        Ok(())
    }

    pub fn read(slice: &mut &[u8]) -> Result<Self, std::io::Error> {
        let num_entries = slice.read_u16::<BigEndian>()?;
        let lowest_index = slice.read_u16::<BigEndian>()?;
        let lowest_score = slice.read_f32::<BigEndian>()?;
        Ok(Self {
            num_entries,
            lowest_index,
            lowest_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_layout() {
        let entry = ScoreEntry {
            offset: 0x0102,
            score: 1.5,
            docid: 3,
        };

        let mut buffer = Vec::new();
        entry.write(&mut buffer).expect("write failed");

        // 1.5f32 is 0x3FC00000
        assert_eq!(
            buffer,
            vec![
                0, 0, 0, 0, 0, 0, 0x01, 0x02, // offset
                0x3F, 0xC0, 0, 0, // score
                0, 0, 0, 0, 0, 0, 0, 3, // docid
            ]
        );
        assert_eq!(buffer.len(), ScoreEntry::WIRE_SIZE);

        let mut slice = &buffer[..];
        assert_eq!(ScoreEntry::read(&mut slice).expect("read failed"), entry);
    }

    #[test]
    fn test_header_wire_layout() {
        let header = ScoreIndexHeader {
            num_entries: 2,
            lowest_index: 1,
            lowest_score: 1.5,
        };

        let mut buffer = Vec::new();
        header.write(&mut buffer).expect("write failed");

        assert_eq!(buffer, vec![0, 2, 0, 1, 0x3F, 0xC0, 0, 0]);
        assert_eq!(buffer.len(), ScoreIndexHeader::WIRE_SIZE);

        let mut slice = &buffer[..];
        assert_eq!(
            ScoreIndexHeader::read(&mut slice).expect("read failed"),
            header
        );
    }

    #[test]
    fn test_ranking_order() {
        let a = ScoreEntry {
            offset: 0,
            score: 2.,
            docid: 7,
        };
        let b = ScoreEntry {
            offset: 0,
            score: 1.,
            docid: 2,
        };
        let c = ScoreEntry {
            offset: 0,
            score: 1.,
            docid: 9,
        };

        // Higher score first, document ID breaks exact ties
        assert_eq!(a.cmp_ranked(&b), Ordering::Less);
        assert_eq!(b.cmp_ranked(&c), Ordering::Less);
        assert_eq!(c.cmp_ranked(&a), Ordering::Greater);
        assert_eq!(b.cmp_ranked(&b), Ordering::Equal);
    }
}
