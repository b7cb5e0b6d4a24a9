//! Byte offset to line/column mapping.

/// Precomputed line starts for one source text.
///
/// Lines and columns are 1-indexed; columns count bytes, which is what
/// editors and `go vet` report for ASCII import paths.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Indexes the line starts of `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Returns the 1-indexed `(line, column)` of a byte offset.
    ///
    /// Offsets past the end are clamped to the end of the text.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line - 1];
        (line, offset - start + 1)
    }
}
