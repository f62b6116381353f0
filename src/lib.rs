pub mod error;
pub mod format;
pub mod pose;
pub mod storage;

pub use error::{ErrorKind, Result, TdlError};
pub use pose::{Mat3, PoseRecord, Vec3};
pub use storage::{LoopingReader, MappedLog, TdlReader, TdlWriter, create_log};
