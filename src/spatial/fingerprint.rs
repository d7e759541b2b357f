//! Content-addressed tile identity

use image::RgbaImage;
use std::fmt::{self, Write as _};

/// BLAKE3 digest of a tile's pixel content
///
/// Computed over the raw RGBA bytes in row-major order, so two blocks with
/// identical pixels always share a fingerprint. Ordering follows the digest
/// bytes and is only used to keep iteration deterministic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint an arbitrary sequence of channel values
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// Fingerprint the pixels of a tile block
    pub fn of_block(block: &RgbaImage) -> Self {
        Self::of_bytes(block.as_raw())
    }

    /// Raw digest bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First eight hex digits, enough to tell tiles apart in diagnostics
    pub fn short(&self) -> String {
        self.0.iter().take(4).fold(String::new(), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
    }
}

impl From<[u8; 32]> for Fingerprint {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}
