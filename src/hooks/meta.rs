//! Metadata emission into a page response.

use serde::Serialize;

/// Destination for page metadata entries.
///
/// Hosts implement this over their response object. Other collaborators may
/// add entries to the same sink, so callers check [`contains`](Self::contains)
/// before publishing.
pub trait MetadataSink {
    /// Check if an entry with this name was already published.
    fn contains(&self, name: &str) -> bool;

    /// Publish a metadata entry.
    fn publish(&mut self, name: &str, value: &str);
}

/// A single metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    /// Entry name (`description`, `og:description`, ...)
    pub name: String,
    /// Entry value, unescaped
    pub content: String,
}

impl MetaTag {
    /// Render as an HTML `<meta>` element.
    ///
    /// Open Graph names (`og:*`) use the `property` attribute, everything
    /// else uses `name`.
    pub fn to_html(&self) -> String {
        let attr = if self.name.starts_with("og:") {
            "property"
        } else {
            "name"
        };
        format!(
            "<meta {}=\"{}\" content=\"{}\"/>",
            attr,
            escape_attr(&self.name),
            escape_attr(&self.content)
        )
    }
}

/// In-memory [`MetadataSink`] that keeps entries in publish order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetaTags {
    tags: Vec<MetaTag>,
}

impl MetaTags {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the content of an entry.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.content.as_str())
    }

    /// Iterate over entries in publish order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetaTag> {
        self.tags.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Render all entries as `<meta>` elements, one per line.
    pub fn to_html(&self) -> String {
        self.tags
            .iter()
            .map(MetaTag::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl MetadataSink for MetaTags {
    fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    fn publish(&mut self, name: &str, value: &str) {
        self.tags.push(MetaTag {
            name: name.to_string(),
            content: value.to_string(),
        });
    }
}

impl<'a> IntoIterator for &'a MetaTags {
    type Item = &'a MetaTag;
    type IntoIter = std::slice::Iter<'a, MetaTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
