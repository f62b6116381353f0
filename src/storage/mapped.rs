use crate::error::{Field, Op, Result, TdlError};
use crate::format::HEADER_SIZE;
use crate::format::header::is_magic;
use crate::format::name::decode_name;
use crate::pose::PoseRecord;
use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Read-only memory-mapped view of a complete log, for inspection and
/// fast sequential replay. Never writes.
pub struct MappedLog {
    mmap: Mmap,
    name: String,
    data_offset: usize,
}

impl MappedLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(|e| TdlError::io(Op::Read, Field::File, e))?;
        let len = file
            .metadata()
            .map_err(|e| TdlError::io(Op::Read, Field::File, e))?
            .len();
        let len = mappable_len(len)?;

        if len < HEADER_SIZE {
            return Err(TdlError::InvalidFormat { read: len });
        }

        // SAFETY: the map is read-only; the file must not be truncated by
        // another process while mapped.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| TdlError::io(Op::Read, Field::File, e))?;

        if !is_magic(&mmap) {
            return Err(TdlError::InvalidFormat { read: HEADER_SIZE });
        }

        let (name, name_len) =
            decode_name(&mmap[HEADER_SIZE..]).ok_or_else(|| TdlError::Truncated {
                op: Op::Read,
                field: Field::Name,
                expected: len - HEADER_SIZE + 1,
                actual: len - HEADER_SIZE,
            })?;

        let log = Self {
            mmap,
            name,
            data_offset: HEADER_SIZE + name_len,
        };

        if log.trailing_bytes() > 0 {
            warn!(
                trailing = log.trailing_bytes(),
                "log ends in a partial record"
            );
        }
        debug!(name = %log.name, records = log.record_count(), "log mapped");
        Ok(log)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte offset of the first record.
    #[inline]
    pub fn data_offset(&self) -> usize {
        self.data_offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Number of complete records.
    #[inline]
    pub fn record_count(&self) -> usize {
        (self.mmap.len() - self.data_offset) / PoseRecord::SIZE
    }

    /// Bytes of an incomplete final record, zero for a clean file.
    #[inline]
    pub fn trailing_bytes(&self) -> usize {
        (self.mmap.len() - self.data_offset) % PoseRecord::SIZE
    }

    pub fn replay<F>(&self, mut callback: F) -> u64
    where
        F: FnMut(PoseRecord),
    {
        let mut count = 0;
        for pose in self.iter() {
            callback(pose);
            count += 1;
        }
        count
    }

    pub fn iter(&self) -> RecordIter<'_> {
        RecordIter {
            chunks: self.mmap[self.data_offset..].chunks_exact(PoseRecord::SIZE),
        }
    }

    #[cfg(unix)]
    pub fn advise_sequential(&self) -> Result<()> {
        self.mmap
            .advise(memmap2::Advice::Sequential)
            .map_err(|e| TdlError::io(Op::Read, Field::File, e))
    }
}

/// File length as `usize`, rejecting files larger than the address space.
pub(crate) fn mappable_len(len: u64) -> Result<usize> {
    usize::try_from(len).map_err(|_| {
        TdlError::io(
            Op::Read,
            Field::File,
            io::Error::new(
                io::ErrorKind::FileTooLarge,
                format!("{len} bytes does not fit in the address space"),
            ),
        )
    })
}

pub struct RecordIter<'a> {
    chunks: std::slice::ChunksExact<'a, u8>,
}

impl Iterator for RecordIter<'_> {
    type Item = PoseRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.chunks.next()?;
        let bytes: &[u8; PoseRecord::SIZE] = chunk.try_into().ok()?;
        Some(PoseRecord::from_bytes(bytes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for RecordIter<'_> {}
