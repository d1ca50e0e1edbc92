//! Utility functions and helpers.

pub mod text;
pub mod url;

/// Final path component of an archive entry name.
///
/// Directory pseudo-entries (`"dir/"`) yield an empty string.
pub fn base_name(entry_name: &str) -> &str {
    entry_name.rsplit(['/', '\\']).next().unwrap_or("")
}
