//! Byte-level codecs for the Tracked Data Log (`.tdl`) format.
//!
//! ```text
//! offset 0..9    header   DB 54 44 4C 0D 0A 1A 0A 00
//! offset 9..N+1  name     up to 32 bytes, then 00
//! offset N+1..   records  48 bytes each:
//!                  3 x f32 LE position (x, y, z)
//!                  9 x f32 LE orientation (row-major 3x3)
//! ```
//!
//! Every codec works on the caller's stream at its current position and
//! never closes it.

pub mod cursor;
pub mod header;
pub mod io;
pub mod name;
pub mod record;

pub use cursor::prepare;
pub use header::{HEADER_SIZE, MAGIC, validate_header, write_header};
pub use name::{NAME_MAX, read_name, write_name};
pub use record::{read_record, write_record};
