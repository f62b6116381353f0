use super::creator::create_log;
use crate::error::{Field, Op, Result, TdlError};
use crate::format::name::stored_name;
use crate::format::write_record;
use crate::pose::PoseRecord;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A write session: one freshly created log, appended to in arrival order.
pub struct TdlWriter {
    file: File,
    path: PathBuf,
    name: String,
    records_written: u64,
}

impl TdlWriter {
    pub fn create<P: AsRef<Path>>(path: P, name: &str) -> Result<Self> {
        let (file, path) = create_log(path, name)?;
        Ok(Self {
            file,
            path,
            name: stored_name(name).to_owned(),
            records_written: 0,
        })
    }

    /// Appends one record. After an error the file may end in a partial
    /// record and the session should not be written to again.
    #[inline]
    pub fn write_record(&mut self, pose: &PoseRecord) -> Result<()> {
        write_record(&mut self.file, pose)?;
        self.records_written += 1;
        Ok(())
    }

    pub fn write_pose(&mut self, position: [f32; 3], orientation: [f32; 9]) -> Result<()> {
        self.write_record(&PoseRecord::new(position, orientation))
    }

    pub fn sync(&self) -> Result<()> {
        self.file
            .sync_all()
            .map_err(|e| TdlError::io(Op::Write, Field::File, e))
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Path after `.tdl` normalization.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The name as stored on disk, after truncation.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_inner(self) -> File {
        debug!(path = %self.path.display(), records = self.records_written, "write session closed");
        self.file
    }
}
