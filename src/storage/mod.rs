pub mod creator;
pub mod mapped;
pub mod path;
pub mod reader;
pub mod writer;

pub use creator::create_log;
pub use mapped::{MappedLog, RecordIter};
pub use path::{EXTENSION, normalize_log_path};
pub use reader::{LoopingReader, TdlReader};
pub use writer::TdlWriter;
