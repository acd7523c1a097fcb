//! Lazy scanning of paragraph regions.

use regex::{Matches, Regex};
use std::sync::OnceLock;

use super::{Region, RegionKind};

/// Smallest `<p>...</p>` span, any case, across line breaks.
///
/// Only a bare `<p>` opens a paragraph: rendered body text uses it for
/// prose, while `<p class=...>` tends to mark notices and hatnotes.
const PARAGRAPH_PATTERN: &str = r"(?is)<p>.*?</p>";

fn paragraph_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PARAGRAPH_PATTERN).expect("paragraph pattern is valid"))
}

/// Iterator over paragraph regions of a fragment, in document order.
///
/// Regions are found on demand; consuming only the first one does no work
/// for the rest of the input. The scanner cannot be rewound, create a new
/// one to start over.
///
/// # Example
///
/// ```
/// use metadesc::scan::ParagraphScanner;
///
/// let html = "<p>One</p>\n<P>Two</P>";
/// let found: Vec<_> = ParagraphScanner::new(html).map(|r| r.as_str()).collect();
/// assert_eq!(found, vec!["<p>One</p>", "<P>Two</P>"]);
/// ```
pub struct ParagraphScanner<'a> {
    source: &'a str,
    matches: Matches<'static, 'a>,
}

impl<'a> ParagraphScanner<'a> {
    /// Create a scanner over the given fragment.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            matches: paragraph_regex().find_iter(source),
        }
    }

    /// The fragment being scanned.
    pub fn source(&self) -> &'a str {
        self.source
    }
}

impl<'a> Iterator for ParagraphScanner<'a> {
    type Item = Region<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.matches.next()?;
        Some(Region::new(RegionKind::Paragraph, self.source, m.range()))
    }
}

impl std::iter::FusedIterator for ParagraphScanner<'_> {}
