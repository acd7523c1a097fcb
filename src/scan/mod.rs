//! Structural scanning of rendered HTML fragments.
//!
//! Nothing here builds a DOM. The scanners work over byte offsets of the
//! original string and hand out [`Region`]s that borrow from it.

pub mod paragraph;
pub mod table;
pub mod token;

pub use paragraph::ParagraphScanner;
pub use table::{strip_tables, table_regions};
pub use token::{Token, Tokenizer};

use std::ops::Range;

/// Kind of structural element a region covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// A `<table>` element, including any nested tables
    Table,
    /// A `<p>` element
    Paragraph,
}

/// A contiguous span of the scanned HTML.
///
/// Regions are positions into the source, never copies of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    /// What the span denotes
    pub kind: RegionKind,
    /// Byte offset of the first byte of the opening tag
    pub start: usize,
    /// Byte offset one past the last byte of the closing tag
    pub end: usize,
    source: &'a str,
}

impl<'a> Region<'a> {
    pub(crate) fn new(kind: RegionKind, source: &'a str, span: Range<usize>) -> Self {
        Self {
            kind,
            start: span.start,
            end: span.end,
            source,
        }
    }

    /// Raw markup of the region, tags included.
    pub fn as_str(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    /// Byte range of the region within its source.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the region in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the region is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
