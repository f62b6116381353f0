use super::io::write_block;
use crate::error::{Field, Op, Result, TdlError};
use std::io::{self, Read, Write};

/// Maximum stored name length in bytes, excluding the terminator.
pub const NAME_MAX: usize = 32;

/// The bytes of `name` that end up on disk.
///
/// Stops at the first NUL, caps at [`NAME_MAX`] bytes and never splits a
/// UTF-8 sequence.
pub fn stored_name(name: &str) -> &str {
    let end = name.find('\0').unwrap_or(name.len());
    let mut cut = end.min(NAME_MAX);
    while !name.is_char_boundary(cut) {
        cut -= 1;
    }
    &name[..cut]
}

/// Writes the truncated name followed by a single zero byte in one block.
pub fn write_name<W: Write + ?Sized>(writer: &mut W, name: &str) -> Result<()> {
    let stored = stored_name(name).as_bytes();
    let mut buf = [0u8; NAME_MAX + 1];
    buf[..stored.len()].copy_from_slice(stored);
    write_block(writer, Field::Name, &buf[..stored.len() + 1])
}

/// Reads the name field one byte at a time.
///
/// Only the first [`NAME_MAX`] bytes are kept, but consumption continues
/// to the terminator so the cursor always lands on the first record.
pub fn read_name<R: Read + ?Sized>(reader: &mut R) -> Result<String> {
    let mut kept = Vec::with_capacity(NAME_MAX);
    let mut consumed = 0usize;
    let mut byte = [0u8; 1];

    loop {
        match reader.read(&mut byte) {
            Ok(0) => {
                return Err(TdlError::Truncated {
                    op: Op::Read,
                    field: Field::Name,
                    expected: consumed + 1,
                    actual: consumed,
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TdlError::io(Op::Read, Field::Name, e)),
        }
        consumed += 1;

        if byte[0] == 0 {
            break;
        }
        if kept.len() < NAME_MAX {
            kept.push(byte[0]);
        }
    }

    Ok(String::from_utf8_lossy(&kept).into_owned())
}

/// Decodes a name field from an in-memory slice.
///
/// Returns the name and the number of bytes the field occupies including
/// its terminator, or `None` if no terminator is present.
pub fn decode_name(bytes: &[u8]) -> Option<(String, usize)> {
    let end = bytes.iter().position(|&b| b == 0)?;
    let kept = &bytes[..end.min(NAME_MAX)];
    Some((String::from_utf8_lossy(kept).into_owned(), end + 1))
}
