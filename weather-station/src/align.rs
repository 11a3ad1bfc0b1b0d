//! Sentence alignment
//!
//! The parser reads fields at fixed offsets from the start of the line, so
//! any noise ahead of the sentence (a half-received previous frame, a
//! power-up glitch) would shift every field. Alignment searches for the
//! first `c` tag that has the `s` tag at its expected distance and drops
//! everything before it.

use sen0186::{Field, FIELDS};

/// Return `line` starting at the first plausible sentence start, plus the
/// number of bytes dropped.
///
/// Lines with no plausible start are returned unchanged, leaving the parser
/// to report them as malformed.
pub fn align_sentence(line: &str) -> (&str, usize) {
    let first = Field::WindDirection.spec();
    let second = Field::WindSpeedAvg.spec();
    let gap = second.tag_offset() - first.tag_offset();
    let bytes = line.as_bytes();

    let start = (0..bytes.len().saturating_sub(gap))
        .find(|&i| bytes[i] == first.tag && bytes[i + gap] == second.tag);

    match start {
        // The tag is ASCII, so `i` is always a char boundary
        Some(i) => (&line[i..], i),
        None => (line, 0),
    }
}
