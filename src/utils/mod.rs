use std::path::Path;

pub use self::hex::{decode_hex, encode_hex};
pub use self::replace::replace_all;

pub mod hex;
pub mod replace;

/// True when a filesystem entry of any kind exists at `path`.
///
/// Existence only; readability and entry type are the caller's problem.
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// True when `suffix` is a trailing exact substring of `text`.
///
/// The empty suffix matches everything; a suffix longer than `text`
/// matches nothing.
pub fn ends_with(text: &str, suffix: &str) -> bool {
    text.ends_with(suffix)
}
