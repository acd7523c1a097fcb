//! Tag-level tokenizer for HTML fragments.
//!
//! Splits a fragment into opening tags, closing tags and the text between
//! them. This is deliberately shallow: attributes are not parsed (quoted `>`
//! characters are honoured so a tag ends where a browser would end it),
//! comments and doctypes fall through as text, and there is no notion of
//! void or implied elements.

use std::ops::Range;

/// A lexical unit of an HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name ...>`
    OpenTag {
        /// Tag name as written (case preserved)
        name: &'a str,
        /// Byte span from `<` through `>`
        span: Range<usize>,
    },
    /// `</name ...>`
    CloseTag {
        /// Tag name as written (case preserved)
        name: &'a str,
        /// Byte span from `<` through `>`
        span: Range<usize>,
    },
    /// Anything between tags
    Text {
        /// Byte span of the text run
        span: Range<usize>,
    },
}

impl<'a> Token<'a> {
    /// Byte span of the token.
    pub fn span(&self) -> Range<usize> {
        match self {
            Token::OpenTag { span, .. } | Token::CloseTag { span, .. } | Token::Text { span } => {
                span.clone()
            }
        }
    }

    /// Check if this is an opening tag with the given name (ASCII case-insensitive).
    pub fn is_open(&self, tag: &str) -> bool {
        matches!(self, Token::OpenTag { name, .. } if name.eq_ignore_ascii_case(tag))
    }

    /// Check if this is a closing tag with the given name (ASCII case-insensitive).
    pub fn is_close(&self, tag: &str) -> bool {
        matches!(self, Token::CloseTag { name, .. } if name.eq_ignore_ascii_case(tag))
    }
}

/// Iterator over the [`Token`]s of a fragment.
///
/// Runs in a single forward pass. Adjacent text tokens may be emitted when a
/// `<` turns out not to start a tag.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over the given fragment.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Try to read a tag starting at `start` (which must hold `<`).
    fn read_tag(&self, start: usize) -> Option<Token<'a>> {
        let bytes = self.src.as_bytes();
        let closing = bytes.get(start + 1) == Some(&b'/');
        let name_start = if closing { start + 2 } else { start + 1 };

        let name_len = bytes
            .get(name_start..)?
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count();
        if name_len == 0 {
            return None;
        }

        let name_end = name_start + name_len;
        let end = name_end + find_tag_end(&bytes[name_end..])? + 1;
        let name = &self.src[name_start..name_end];
        let span = start..end;

        Some(if closing {
            Token::CloseTag { name, span }
        } else {
            Token::OpenTag { name, span }
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        if bytes[start] == b'<' {
            if let Some(tag) = self.read_tag(start) {
                self.pos = tag.span().end;
                return Some(tag);
            }
        }

        // `<` is ASCII, so start + 1 stays on a char boundary when it was one
        let search_from = if bytes[start] == b'<' { start + 1 } else { start };
        let end = self.src[search_from..]
            .find('<')
            .map_or(bytes.len(), |i| search_from + i);
        self.pos = end;
        Some(Token::Text { span: start..end })
    }
}

/// Offset of the `>` that closes a tag, skipping quoted attribute values.
///
/// A quote only opens a value when it follows `=` (whitespace allowed in
/// between); an apostrophe inside an unquoted value is an ordinary byte.
fn find_tag_end(bytes: &[u8]) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_eq = false;
    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if after_eq && (b == b'"' || b == b'\'') => {
                quote = Some(b);
                after_eq = false;
            }
            None if b == b'>' => return Some(i),
            None if b == b'=' => after_eq = true,
            None if after_eq && b.is_ascii_whitespace() => {}
            None => after_eq = false,
        }
    }
    None
}
