// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

/// Storage key of the published feed document
pub const FEED_KEY: &str = "feed.rss";

/// Check if a character is allowed in storage keys (whitelist approach)
fn is_valid_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}

/// Normalize a name into a storage-safe slug
///
/// Every character outside `[A-Za-z0-9_-]` becomes one `-` per UTF-16 code
/// unit, so characters beyond the Basic Multilingual Plane turn into `--`.
/// The result is lowercased. Applying it twice yields the same result as once.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if is_valid_key_char(c) {
            slug.push(c.to_ascii_lowercase());
        } else {
            slug.extend(std::iter::repeat_n('-', c.len_utf16()));
        }
    }
    slug
}

/// Get the extension of a local file including the leading dot
///
/// Returns an empty string when the path has no extension.
pub fn original_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Compute the storage key for an episode: `slug(filename)` plus the
/// extension of its local audio file
pub fn object_key(filename: &str, local_path: &Path) -> String {
    format!("{}{}", slug(filename), original_extension(local_path))
}
