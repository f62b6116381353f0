use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which part of a log file an operation was touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    File,
    Header,
    Name,
    Position,
    Orientation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Header => "header",
            Self::Name => "name field",
            Self::Position => "position",
            Self::Orientation => "orientation",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Coarse failure category, independent of diagnostic detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFormat,
    IoFailure,
    AlreadyExists,
}

#[derive(Debug, Error)]
pub enum TdlError {
    #[error("not a tracked data log: header mismatch ({read} of 9 bytes read)")]
    InvalidFormat { read: usize },

    #[error("short {op} of {field}: {actual} of {expected} bytes")]
    Truncated {
        op: Op,
        field: Field,
        expected: usize,
        actual: usize,
    },

    #[error("{op} of {field} failed: {source}")]
    Io {
        op: Op,
        field: Field,
        #[source]
        source: io::Error,
    },

    #[error("log file already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    /// The file was created but its header or name could not be written in
    /// full. It is left on disk at `path`.
    #[error("incomplete log left at {}: {source}", .path.display())]
    PartialCreate {
        path: PathBuf,
        #[source]
        source: Box<TdlError>,
    },
}

impl TdlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::Truncated { .. } | Self::Io { .. } => ErrorKind::IoFailure,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::PartialCreate { source, .. } => source.kind(),
        }
    }

    #[inline]
    pub fn is_io_failure(&self) -> bool {
        self.kind() == ErrorKind::IoFailure
    }

    pub(crate) fn io(op: Op, field: Field, source: io::Error) -> Self {
        Self::Io { op, field, source }
    }
}

pub type Result<T> = std::result::Result<T, TdlError>;
