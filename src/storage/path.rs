use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const EXTENSION: &str = ".tdl";

/// Appends `.tdl` unless the path already ends in exactly that suffix.
///
/// The comparison is on the raw trailing bytes, so `log.TDL` becomes
/// `log.TDL.tdl` and `.tdl` alone is left as is.
pub fn normalize_log_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.as_os_str().as_encoded_bytes().ends_with(EXTENSION.as_bytes()) {
        return path.to_path_buf();
    }
    let mut raw = OsString::from(path.as_os_str());
    raw.push(EXTENSION);
    PathBuf::from(raw)
}
