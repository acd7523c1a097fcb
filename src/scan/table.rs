//! Removal of table regions from HTML fragments.
//!
//! Infoboxes, navigation boxes and other generated summaries are usually
//! rendered as tables near the top of a page. They are cut out before
//! paragraph scanning so the first paragraph found is real prose.

use std::borrow::Cow;

use super::token::Tokenizer;
use super::{Region, RegionKind};

const TABLE_TAG: &str = "table";

/// Find the outermost balanced table regions of a fragment, in document order.
///
/// Nested tables are part of their outermost table's region. Malformed markup
/// never fails the scan: a close tag with no open table is ignored, and an
/// open tag that is never closed yields no region (balanced tables inside it
/// still do).
pub fn table_regions(html: &str) -> Vec<Region<'_>> {
    let mut open_starts: Vec<usize> = Vec::new();
    let mut matched: Vec<(usize, usize)> = Vec::new();
    let mut stray_closes = 0usize;

    for token in Tokenizer::new(html) {
        if token.is_open(TABLE_TAG) {
            open_starts.push(token.span().start);
        } else if token.is_close(TABLE_TAG) {
            match open_starts.pop() {
                Some(start) => matched.push((start, token.span().end)),
                None => stray_closes += 1,
            }
        }
    }

    if stray_closes > 0 || !open_starts.is_empty() {
        log::warn!(
            "Unbalanced table markup left in place ({} unmatched open, {} unmatched close)",
            open_starts.len(),
            stray_closes
        );
    }

    // Pairs are recorded innermost first; keep only those not inside another.
    matched.sort_unstable_by_key(|&(start, _)| start);
    let mut regions: Vec<Region<'_>> = Vec::new();
    for (start, end) in matched {
        if regions.last().is_some_and(|outer| start < outer.end) {
            continue;
        }
        regions.push(Region::new(RegionKind::Table, html, start..end));
    }
    regions
}

/// Remove every table region from a fragment.
///
/// Returns the input unchanged (borrowed) when it contains no balanced table.
/// Markup outside table regions is copied through byte for byte.
///
/// # Example
///
/// ```
/// use metadesc::scan::strip_tables;
///
/// let html = "<table><tr><td><table></table></td></tr></table><p>Hello</p>";
/// assert_eq!(strip_tables(html), "<p>Hello</p>");
/// ```
pub fn strip_tables(html: &str) -> Cow<'_, str> {
    let regions = table_regions(html);
    if regions.is_empty() {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for region in &regions {
        log::trace!("Stripping table region {:?}", region.span());
        out.push_str(&html[cursor..region.start]);
        cursor = region.end;
    }
    out.push_str(&html[cursor..]);
    Cow::Owned(out)
}
