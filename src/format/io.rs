use crate::error::{Field, Op, Result, TdlError};
use std::io::{self, Read, Write};

/// Reads until `buf` is full or the stream reports end of file.
/// Returns the number of bytes actually placed in `buf`.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Writes until `buf` is drained or the sink accepts zero bytes.
/// Returns the number of bytes accepted.
pub fn write_full<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

/// Writes the whole block or fails with `Truncated` carrying the shortfall.
pub fn write_block<W: Write + ?Sized>(writer: &mut W, field: Field, buf: &[u8]) -> Result<()> {
    let written = write_full(writer, buf).map_err(|e| TdlError::io(Op::Write, field, e))?;
    if written < buf.len() {
        return Err(TdlError::Truncated {
            op: Op::Write,
            field,
            expected: buf.len(),
            actual: written,
        });
    }
    Ok(())
}
