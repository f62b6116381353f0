use crate::error::{Field, Op, Result, TdlError};
use crate::format::{prepare, read_record};
use crate::pose::PoseRecord;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;

/// A read session over one handle. Construction runs the cursor
/// preparation, so records can be pulled immediately.
pub struct TdlReader<S = File> {
    stream: S,
    name: String,
    records_read: u64,
    done: bool,
}

impl TdlReader<File> {
    /// Opens an existing log read-only. No extension is required.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(|e| TdlError::io(Op::Read, Field::File, e))?;
        Self::from_handle(file)
    }
}

impl<S: Read + Seek> TdlReader<S> {
    pub fn from_handle(mut stream: S) -> Result<Self> {
        let name = prepare(&mut stream)?;
        Ok(Self {
            stream,
            name,
            records_read: 0,
            done: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// `Ok(None)` at a clean end of stream. Calling again after that keeps
    /// returning `Ok(None)`; the cursor does not move on its own.
    #[inline]
    pub fn next_record(&mut self) -> Result<Option<PoseRecord>> {
        let pose = read_record(&mut self.stream)?;
        if pose.is_some() {
            self.records_read += 1;
        }
        Ok(pose)
    }

    /// Re-runs preparation, putting the cursor back on the first record.
    pub fn rewind(&mut self) -> Result<()> {
        self.name = prepare(&mut self.stream)?;
        self.records_read = 0;
        self.done = false;
        debug!(name = %self.name, "reader rewound");
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Seek> Iterator for TdlReader<S> {
    type Item = Result<PoseRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(pose)) => Some(Ok(pose)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Plays a log back endlessly: reaching the end rewinds to the first
/// record instead of stopping.
pub struct LoopingReader<S = File> {
    inner: TdlReader<S>,
    loops: u64,
}

impl<S: Read + Seek> LoopingReader<S> {
    pub fn new(inner: TdlReader<S>) -> Self {
        Self { inner, loops: 0 }
    }

    /// Only returns `Ok(None)` when the log holds no records at all.
    pub fn next_record(&mut self) -> Result<Option<PoseRecord>> {
        if let Some(pose) = self.inner.next_record()? {
            return Ok(Some(pose));
        }
        if self.inner.records_read() == 0 {
            return Ok(None);
        }

        self.inner.rewind()?;
        self.loops += 1;
        self.inner.next_record()
    }

    /// Completed passes over the log.
    #[inline]
    pub fn loops(&self) -> u64 {
        self.loops
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn into_inner(self) -> TdlReader<S> {
        self.inner
    }
}
