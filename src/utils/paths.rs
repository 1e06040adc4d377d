// Path conversion
//
// The collector keys ignore matching and file ordering on paths relative to
// the extraction root, always with `/` separators.

use std::path::{Path, MAIN_SEPARATOR};

/// Path of `path` relative to `root`, with `/` separators
///
/// Paths outside the root are returned whole, still Unix-style.
pub fn to_relative_unix_style(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let text = relative.to_string_lossy();

    // On Unix, MAIN_SEPARATOR is already '/'
    if MAIN_SEPARATOR == '\\' {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}
