//! Splits a changelog into per-release blocks

use crate::domain::HeaderLine;

/// One release block: the header and the lines up to the next header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub header: &'a HeaderLine,
    pub body: &'a [String],
}

/// Partition `lines` at the given headers.
///
/// Headers must be in document order. Lines before the first header belong
/// to no segment.
pub fn split_segments<'a>(lines: &'a [String], headers: &'a [HeaderLine]) -> Vec<Segment<'a>> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let start = (header.index + 1).min(lines.len());
            let end = headers
                .get(i + 1)
                .map(|next| next.index)
                .unwrap_or(lines.len())
                .max(start);
            Segment {
                header,
                body: &lines[start..end],
            }
        })
        .collect()
}
