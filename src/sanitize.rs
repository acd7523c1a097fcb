//! Turning paragraph markup into plain description text.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Sanitizer preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizePreset {
    /// Strip tags and trim the ends
    #[default]
    Minimal,
    /// Minimal + collapse whitespace runs + Unicode NFC
    Standard,
}

/// Options for text sanitizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeOptions {
    /// Collapse every run of whitespace (including newlines) into one space
    pub collapse_whitespace: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,
}

impl SanitizeOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: SanitizePreset) -> Self {
        match preset {
            SanitizePreset::Minimal => Self::minimal(),
            SanitizePreset::Standard => Self::standard(),
        }
    }

    /// Minimal sanitize options.
    pub fn minimal() -> Self {
        Self {
            collapse_whitespace: false,
            normalize_unicode: false,
        }
    }

    /// Standard sanitize options.
    pub fn standard() -> Self {
        Self {
            collapse_whitespace: true,
            normalize_unicode: true,
        }
    }
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Strips markup from a paragraph region and decides whether anything is left.
#[derive(Debug, Clone, Default)]
pub struct TextSanitizer {
    options: SanitizeOptions,
}

impl TextSanitizer {
    /// Create a sanitizer with the given options.
    pub fn new(options: SanitizeOptions) -> Self {
        Self { options }
    }

    /// Create a sanitizer from a preset.
    pub fn from_preset(preset: SanitizePreset) -> Self {
        Self::new(SanitizeOptions::from_preset(preset))
    }

    /// Get the sanitizer options.
    pub fn options(&self) -> &SanitizeOptions {
        &self.options
    }

    /// Sanitize raw paragraph markup into a candidate description.
    ///
    /// Returns `None` when nothing but whitespace survives tag stripping.
    pub fn sanitize(&self, markup: &str) -> Option<String> {
        let mut text = strip_tags(markup);

        if self.options.normalize_unicode {
            text = text.nfc().collect();
        }

        let text = if self.options.collapse_whitespace {
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            text.trim().to_string()
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Remove every tag from an HTML fragment, keeping the text between them.
///
/// - `<!-- ... -->` comments are dropped whole
/// - a `<` followed by whitespace (or at the very end) is literal text
/// - a tag left open at the end swallows the rest of the input
/// - quoted attribute values may contain `>`
///
/// Entities are not decoded.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        if let Some(comment) = tail.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        match tail[1..].chars().next() {
            Some(c) if !c.is_whitespace() => {
                rest = tag_end(tail).map_or("", |gt| &tail[gt + 1..]);
            }
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Offset of the `>` closing the tag that starts `tag`.
///
/// Quotes only delimit a value directly after `=`.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut after_eq = false;
    for (i, c) in tag.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if after_eq && (c == '"' || c == '\'') => {
                quote = Some(c);
                after_eq = false;
            }
            None if c == '>' => return Some(i),
            None if c == '=' => after_eq = true,
            None if after_eq && c.is_whitespace() => {}
            None => after_eq = false,
        }
    }
    None
}
