use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sha1::{Digest, Sha1};

/// Compute the SHA-1 digest of a file's contents, rendered as uppercase hex
/// (40 characters).
///
/// The digest is a function of the byte content only; path and filesystem
/// metadata never enter the hash.
pub fn file_sha1(path: &Path) -> Result<String> {
    // Must read the entire file into memory; the manifest format hashes
    // whole files, never ranges.
    let content = fs::read(path)
        .with_context(|| format!("Failed to read {} for hashing", path.display()))?;

    let mut hasher = Sha1::new();
    hasher.update(&content);
    Ok(hex::encode_upper(hasher.finalize()))
}
