//! Instruction image loading.
//!
//! Two paths in, matching the external driver contract: an in-process
//! `Vec<u32>` of already-encoded instruction words (what [`crate::isa::encode`]
//! produces, and what tests assemble directly), or a flat little-endian
//! binary file on disk.

use std::fs;
use std::path::Path;

/// Loads an image already assembled in memory. A thin pass-through, kept
/// as its own function so both entry points share one name at the call
/// site regardless of where the image came from.
pub fn from_words(words: Vec<u32>) -> Vec<u32> {
    words
}

/// Loads a flat binary file and decodes it as little-endian 32-bit words.
/// A trailing partial word (fewer than 4 bytes) is dropped.
pub fn from_file(path: &Path) -> Result<Vec<u32>, std::io::Error> {
    let bytes = fs::read(path)?;
    let words = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    Ok(words)
}
