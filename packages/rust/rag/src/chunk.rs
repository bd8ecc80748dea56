//! Fixed-policy text chunking.
//!
//! The chunk size and overlap are compile-time constants: chunk boundaries
//! never depend on external configuration, so the same corpus always splits
//! the same way.

/// Characters per chunk.
pub const CHUNK_SIZE: usize = 4000;

/// Characters of overlap between consecutive chunks.
pub const CHUNK_OVERLAP: usize = 200;

/// Split text into overlapping chunks of [`CHUNK_SIZE`] characters with
/// [`CHUNK_OVERLAP`] characters carried over between neighbors.
///
/// Chunks that are empty after whitespace trimming are dropped.
pub fn split_text(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = CHUNK_SIZE - CHUNK_OVERLAP;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + CHUNK_SIZE).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_text("").is_empty());
        assert!(split_text("   \n\t  ").is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_text("tyre pressures for the weekend");
        assert_eq!(chunks, vec!["tyre pressures for the weekend"]);
    }

    #[test]
    fn long_text_overlaps_by_fixed_amount() {
        let text = "x".repeat(CHUNK_SIZE + 1000);
        let chunks = split_text(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), CHUNK_SIZE);
        // Second chunk starts CHUNK_SIZE - CHUNK_OVERLAP in, covering the rest
        assert_eq!(chunks[1].chars().count(), 1000 + CHUNK_OVERLAP);
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "lap ".repeat(3000);
        assert_eq!(split_text(&text), split_text(&text));
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "é".repeat(CHUNK_SIZE + 50);
        let chunks = split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), CHUNK_SIZE);
    }
}
