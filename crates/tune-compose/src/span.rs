use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Byte range of a token in the tune source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` starts exactly where this span ends
    pub fn touches(&self, other: Span) -> bool {
        self.end == other.start
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// 0-based line holding the start of the span
    pub fn line(&self, source: &str) -> usize {
        let end = self.start.min(source.len());
        source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
