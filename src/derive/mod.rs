//! Description derivation from rendered HTML.
//!
//! The pipeline is: strip tables, scan paragraphs lazily, sanitize each one,
//! take the first that is not empty.
//!
//! # Example
//!
//! ```
//! use metadesc::derive::{derive, DeriveOptions};
//!
//! let html = "<table><tr><td><p>Infobox</p></td></tr></table><p>The <b>real</b> text.</p>";
//! let desc = derive(html, &DeriveOptions::default());
//! assert_eq!(desc.as_deref(), Some("The real text."));
//! ```

mod options;

pub use options::DeriveOptions;

use std::borrow::Cow;

use crate::sanitize::TextSanitizer;
use crate::scan::{strip_tables, ParagraphScanner};

/// Derive a description from an HTML fragment.
///
/// Returns `None` when the fragment has no paragraph with text outside of
/// tables. That is a normal outcome, not an error.
pub fn derive(html: &str, options: &DeriveOptions) -> Option<String> {
    let content = if options.strip_tables {
        strip_tables(html)
    } else {
        Cow::Borrowed(html)
    };

    let sanitizer = TextSanitizer::new(options.sanitize.clone());
    let found = ParagraphScanner::new(&content)
        .enumerate()
        .find_map(|(index, region)| {
            let candidate = sanitizer.sanitize(region.as_str());
            if candidate.is_none() {
                log::trace!("Paragraph {} is empty after sanitizing, skipping", index);
            } else {
                log::debug!("Using paragraph {} at {:?}", index, region.span());
            }
            candidate
        });

    if found.is_none() {
        log::debug!("No description candidate in {} bytes of content", html.len());
    }
    found
}

/// Source of automatically derived descriptions.
///
/// Hosts that want a different heuristic implement this and hand it to
/// [`Hooks::with_provider`](crate::hooks::Hooks::with_provider).
pub trait DescriptionProvider: Send + Sync {
    /// Derive a description from rendered page HTML.
    fn derive(&self, html: &str) -> Option<String>;

    /// Get the name of this provider.
    fn name(&self) -> &str {
        "custom"
    }
}

/// First-paragraph provider backed by [`derive`].
#[derive(Debug, Clone, Default)]
pub struct SimpleDescriptionProvider {
    options: DeriveOptions,
}

impl SimpleDescriptionProvider {
    /// Create a provider with the given options.
    pub fn new(options: DeriveOptions) -> Self {
        Self { options }
    }

    /// Get the provider options.
    pub fn options(&self) -> &DeriveOptions {
        &self.options
    }
}

impl DescriptionProvider for SimpleDescriptionProvider {
    fn derive(&self, html: &str) -> Option<String> {
        derive(html, &self.options)
    }

    fn name(&self) -> &str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::SanitizePreset;

    fn derive_default(html: &str) -> Option<String> {
        derive(html, &DeriveOptions::default())
    }

    #[test]
    fn test_table_exclusion() {
        let html = "<table><tr><td><p>Boilerplate</p></td></tr></table><p>Real text.</p>";
        assert_eq!(derive_default(html).as_deref(), Some("Real text."));
    }

    #[test]
    fn test_nested_table_balance() {
        let html = "<table><table></table></table><p>Hello</p>";
        assert_eq!(derive_default(html).as_deref(), Some("Hello"));
    }

    #[test]
    fn test_empty_paragraph_skip() {
        assert_eq!(
            derive_default("<p>   </p><p>Second.</p>").as_deref(),
            Some("Second.")
        );
    }

    #[test]
    fn test_no_paragraph() {
        assert_eq!(derive_default("<div>no paragraphs here</div>"), None);
        assert_eq!(derive_default(""), None);
    }

    #[test]
    fn test_all_paragraphs_empty() {
        assert_eq!(derive_default("<p> </p><p><br></p><p>\n</p>"), None);
    }

    #[test]
    fn test_tag_stripping() {
        assert_eq!(
            derive_default("<p>Hello <b>world</b>!</p>").as_deref(),
            Some("Hello world!")
        );
    }

    #[test]
    fn test_keep_tables_option() {
        let html = "<table><tr><td><p>Boilerplate</p></td></tr></table><p>Real text.</p>";
        let options = DeriveOptions::new().keep_tables();
        assert_eq!(derive(html, &options).as_deref(), Some("Boilerplate"));
    }

    #[test]
    fn test_standard_sanitize_option() {
        let html = "<p>Line one\n   line two</p>";
        let options = DeriveOptions::new().with_sanitize_preset(SanitizePreset::Standard);
        assert_eq!(derive(html, &options).as_deref(), Some("Line one line two"));
        assert_eq!(
            derive_default(html).as_deref(),
            Some("Line one\n   line two")
        );
    }

    #[test]
    fn test_simple_provider() {
        let provider = SimpleDescriptionProvider::default();
        assert_eq!(provider.name(), "simple");
        assert_eq!(provider.derive("<p>x</p>").as_deref(), Some("x"));
        assert!(provider.options().strip_tables);
    }
}
