use super::io::{read_full, write_block};
use crate::error::{Field, Op, Result, TdlError};
use std::io::{Read, Write};

/// Fixed preamble of every log: `\xDB T D L \r \n \x1A \n \0`.
///
/// The leading non-ASCII byte and the mixed line endings make text tools
/// reject or mangle the file early.
pub const MAGIC: [u8; 9] = [219, 84, 68, 76, 13, 10, 26, 10, 0];

pub const HEADER_SIZE: usize = MAGIC.len();

pub fn write_header<W: Write + ?Sized>(writer: &mut W) -> Result<()> {
    write_block(writer, Field::Header, &MAGIC)
}

/// Consumes up to 9 bytes from the current position and compares them to
/// [`MAGIC`]. A short read is reported as invalid, not as an error.
pub fn validate_header<R: Read + ?Sized>(reader: &mut R) -> Result<bool> {
    Ok(check_header(reader)?.is_ok())
}

/// Like [`validate_header`] but keeps the byte count for diagnostics.
pub(crate) fn check_header<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<std::result::Result<(), usize>> {
    let mut buf = [0u8; HEADER_SIZE];
    let read = read_full(reader, &mut buf).map_err(|e| TdlError::io(Op::Read, Field::Header, e))?;
    if read == HEADER_SIZE && buf == MAGIC {
        Ok(Ok(()))
    } else {
        Ok(Err(read))
    }
}

#[inline]
pub fn is_magic(bytes: &[u8]) -> bool {
    bytes.len() >= HEADER_SIZE && bytes[..HEADER_SIZE] == MAGIC
}
