use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// Read-only view on a finalized byte region.
///
/// The backing storage is owned here; score index readers borrow slices out
/// of it and never free or mutate it.
pub trait Buffer: Send + Sync {
    fn data(&self) -> &[u8];

    fn slice(&self, start: usize, end: usize) -> Option<&[u8]> {
        self.data().get(start..end)
    }
}

/// Stores the data in memory
pub struct MemoryBuffer {
    data: Vec<u8>,
}

impl MemoryBuffer {
    pub fn new(path: &Path) -> Result<Self, std::io::Error> {
        let mut file = File::options().read(true).open(path)?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        Ok(Self { data })
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl Buffer for MemoryBuffer {
    fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Uses a memory map
pub struct MmapBuffer {
    mmap: Mmap,
}

impl MmapBuffer {
    pub fn new(path: &Path) -> Result<Self, std::io::Error> {
        let file = File::options().read(true).open(path)?;
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self { mmap })
    }
}

impl Buffer for MmapBuffer {
    fn data(&self) -> &[u8] {
        &self.mmap
    }
}

/// Sequential sink wrapper that reports the number of bytes written,
/// so a writer can account for the exact serialized size of what it emits
pub struct CountingWriter<W: Write> {
    sink: W,
    written: usize,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// Total bytes accepted by the sink so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.sink.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }
}
