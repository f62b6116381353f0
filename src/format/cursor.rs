use super::header::check_header;
use super::name::read_name;
use crate::error::{Field, Op, Result, TdlError};
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

/// Rewinds to offset 0, checks the header and consumes the name field.
///
/// On success the cursor sits on the first record (or at end of stream for
/// an empty log) and the stored name is returned. On a header mismatch the
/// cursor is left wherever the check stopped.
pub fn prepare<S: Read + Seek + ?Sized>(stream: &mut S) -> Result<String> {
    stream
        .seek(SeekFrom::Start(0))
        .map_err(|e| TdlError::io(Op::Read, Field::File, e))?;

    if let Err(read) = check_header(stream)? {
        return Err(TdlError::InvalidFormat { read });
    }

    let name = read_name(stream)?;
    debug!(name = %name, "cursor prepared");
    Ok(name)
}
