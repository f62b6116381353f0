use super::io::{read_full, write_block};
use crate::error::{Field, Op, Result, TdlError};
use crate::pose::PoseRecord;
use std::io::{Read, Write};
use tracing::trace;

/// Appends one record at the current cursor: position block, then
/// orientation block. Values are not inspected.
///
/// A failure may leave a partial record behind; the session should be
/// considered dead after any error here.
pub fn write_record<W: Write + ?Sized>(writer: &mut W, pose: &PoseRecord) -> Result<()> {
    write_block(writer, Field::Position, &pose.position_bytes())?;
    write_block(writer, Field::Orientation, &pose.orientation_bytes())?;
    trace!(position = ?pose.position, "record written");
    Ok(())
}

/// Reads the next record.
///
/// `Ok(None)` means the stream ended cleanly on a record boundary. Any
/// partial record, including one that stops exactly after its position
/// block, is reported as `Truncated`.
pub fn read_record<R: Read + ?Sized>(reader: &mut R) -> Result<Option<PoseRecord>> {
    let mut position = [0u8; PoseRecord::POSITION_SIZE];
    let got = read_full(reader, &mut position).map_err(|e| TdlError::io(Op::Read, Field::Position, e))?;
    if got == 0 {
        return Ok(None);
    }
    if got < position.len() {
        return Err(short_read(Field::Position, position.len(), got));
    }

    let mut orientation = [0u8; PoseRecord::ORIENTATION_SIZE];
    let got = read_full(reader, &mut orientation)
        .map_err(|e| TdlError::io(Op::Read, Field::Orientation, e))?;
    if got < orientation.len() {
        return Err(short_read(Field::Orientation, orientation.len(), got));
    }

    Ok(Some(PoseRecord::from_parts(&position, &orientation)))
}

fn short_read(field: Field, expected: usize, actual: usize) -> TdlError {
    TdlError::Truncated {
        op: Op::Read,
        field,
        expected,
        actual,
    }
}
