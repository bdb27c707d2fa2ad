//! UTF-8 decoding that drops invalid byte sequences.

/// Text recovered from raw file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Number of bytes discarded because they were not valid UTF-8.
    pub dropped_bytes: usize,
}

/// Decode `bytes` as UTF-8, silently discarding every invalid sequence.
///
/// Unlike `String::from_utf8_lossy`, nothing is substituted for the
/// discarded bytes.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> Decoded {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped_bytes = 0;

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped_bytes += chunk.invalid().len();
    }

    Decoded {
        text,
        dropped_bytes,
    }
}
