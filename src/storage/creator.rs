use super::path::normalize_log_path;
use crate::error::{Field, Op, Result, TdlError};
use crate::format::{write_header, write_name};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// rw-rw-r--, before the process umask.
#[cfg(unix)]
pub const LOG_FILE_MODE: u32 =
    (libc::S_IRUSR | libc::S_IWUSR | libc::S_IRGRP | libc::S_IWGRP | libc::S_IROTH) as u32;

/// Creates a new log at the normalized `path` and writes the header and
/// name field. The returned handle is positioned at the first record slot.
///
/// Never overwrites: an occupied path yields `AlreadyExists` and the
/// existing file is left untouched. A short header or name write yields
/// `PartialCreate` naming the file that was left behind.
pub fn create_log<P: AsRef<Path>>(path: P, name: &str) -> Result<(File, PathBuf)> {
    let path = normalize_log_path(path);
    let mut file = open_exclusive(&path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            TdlError::AlreadyExists { path: path.clone() }
        } else {
            TdlError::io(Op::Write, Field::File, e)
        }
    })?;

    write_preamble(&mut file, &path, name)?;

    debug!(path = %path.display(), name, "log created");
    Ok((file, path))
}

pub(crate) fn write_preamble<W: Write + ?Sized>(
    writer: &mut W,
    path: &Path,
    name: &str,
) -> Result<()> {
    write_header(writer)
        .and_then(|()| write_name(writer, name))
        .map_err(|e| TdlError::PartialCreate {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
}

fn open_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }

    options.open(path)
}
