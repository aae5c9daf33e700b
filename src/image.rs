//! Flat binary images.
//!
//! Both the ALU ROM and the program are stored as raw bytes with no header.
//! Loading is lenient: an image is truncated or zero-padded to the size the
//! machine expects instead of being rejected.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fit `bytes` to exactly `size` bytes, truncating or zero-padding.
pub fn normalize(mut bytes: Vec<u8>, size: usize) -> Vec<u8> {
    bytes.resize(size, 0);
    bytes
}

/// Read an image from disk and fit it to `size` bytes.
pub fn load_image<P: AsRef<Path>>(path: P, size: usize) -> Result<Vec<u8>, ImageError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.len() != size {
        log::debug!(
            "{}: {} bytes, normalized to {}",
            path.display(),
            bytes.len(),
            size
        );
    }
    Ok(normalize(bytes, size))
}

/// Write an image to disk as-is.
pub fn save_image<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), ImageError> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|source| ImageError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur while reading or writing images.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
