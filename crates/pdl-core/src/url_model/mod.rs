//! Output-name derivation.
//!
//! Each target is persisted as one file named after its final path segment,
//! sanitized for Linux filesystems.

mod path;
mod sanitize;

pub use path::final_segment;
pub use sanitize::sanitize_filename_for_linux;

/// Name used when a target has no usable final path segment.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives the local file name for `target`.
///
/// - `derive_filename("https://example.com/archive.zip")` → `"archive.zip"`
/// - `derive_filename("https://example.com/")` → `"download.bin"`
pub fn derive_filename(target: &str) -> String {
    let Some(raw) = final_segment(target) else {
        return DEFAULT_FILENAME.to_string();
    };

    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
