//! # metadesc
//!
//! Derive short plain-text page descriptions from rendered HTML.
//!
//! Given the HTML body of a rendered page, metadesc drops table regions
//! (infoboxes, navboxes), finds the first paragraph that still has text after
//! removing markup, and stores it as the page's `description` property. An
//! explicit author override can claim the property first; the store keeps
//! whichever value was written first.
//!
//! ## Quick Start
//!
//! ```
//! use metadesc::derive_description;
//!
//! let html = "<table><tr><td><p>Infobox</p></td></tr></table>\
//!             <p>   </p><p>Rust is a <b>systems</b> language.</p>";
//! assert_eq!(
//!     derive_description(html).as_deref(),
//!     Some("Rust is a systems language.")
//! );
//! ```
//!
//! ## Host integration
//!
//! ```
//! use metadesc::{Config, Hooks, MetaTags, PageContext};
//! use metadesc::hooks::{DirectiveTable, DIRECTIVE_NAME};
//!
//! fn main() -> metadesc::Result<()> {
//!     let hooks = Hooks::new(Config::new().with_meta_description_functions(true));
//!     let mut directives = DirectiveTable::new();
//!     hooks.on_first_call_init(&mut directives)?;
//!
//!     // One context per page compilation
//!     let mut ctx = PageContext::new();
//!     directives.invoke(DIRECTIVE_NAME, &mut ctx, "Written by hand");
//!     hooks.on_after_render(&mut ctx, "<p>Derived text</p>");
//!
//!     let mut tags = MetaTags::new();
//!     hooks.on_output_page(&ctx, &mut tags);
//!     assert_eq!(tags.get("og:description"), Some("Written by hand"));
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod derive;
pub mod error;
pub mod hooks;
pub mod sanitize;
pub mod scan;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use derive::{DeriveOptions, DescriptionProvider, SimpleDescriptionProvider};
pub use error::{Error, Result};
pub use hooks::{
    DescriptionOverride, DirectiveRegistry, DirectiveTable, Hooks, MetaTag, MetaTags,
    MetadataSink, OverrideRegistrar, RenderOutcome, DIRECTIVE_NAME, OG_DESCRIPTION_KEY,
};
pub use sanitize::{SanitizeOptions, SanitizePreset, TextSanitizer};
pub use scan::{ParagraphScanner, Region, RegionKind};
pub use store::{PageContext, PropertyStore, SetOutcome, DESCRIPTION_KEY};

use serde::Serialize;
use std::path::Path;

/// Derive a description from rendered HTML with default options.
///
/// # Example
///
/// ```
/// use metadesc::derive_description;
///
/// assert_eq!(derive_description("<p>Hello <b>world</b>!</p>").as_deref(), Some("Hello world!"));
/// assert_eq!(derive_description("<div>no paragraphs here</div>"), None);
/// ```
pub fn derive_description(html: &str) -> Option<String> {
    derive::derive(html, &DeriveOptions::default())
}

/// Derive a description from rendered HTML with custom options.
pub fn derive_description_with_options(html: &str, options: &DeriveOptions) -> Option<String> {
    derive::derive(html, options)
}

/// Read an HTML file and derive its description.
///
/// # Example
///
/// ```no_run
/// use metadesc::describe_file;
///
/// if let Some(desc) = describe_file("page.html")? {
///     println!("{}", desc);
/// }
/// # Ok::<(), metadesc::Error>(())
/// ```
pub fn describe_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let html = std::fs::read_to_string(path)?;
    Ok(derive_description(&html))
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Builder running a full page compilation: override, derivation, metadata.
///
/// # Example
///
/// ```
/// use metadesc::{Metadesc, SanitizePreset};
///
/// let result = Metadesc::new()
///     .with_cleanup(SanitizePreset::Standard)
///     .describe("<p>First\n   paragraph</p>")?;
/// assert_eq!(result.description(), Some("First paragraph"));
/// assert_eq!(result.meta_tags().len(), 2);
/// # Ok::<(), metadesc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Metadesc {
    config: Config,
    override_text: Option<String>,
}

impl Metadesc {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Invoke the override directive with this text before derivation.
    ///
    /// Has no effect unless the configuration enables description functions.
    pub fn with_override(mut self, text: impl Into<String>) -> Self {
        self.override_text = Some(text.into());
        self
    }

    /// Enable or disable the override directive.
    pub fn with_functions(mut self, enable: bool) -> Self {
        self.config.enable_meta_description_functions = enable;
        self
    }

    /// Set sanitize preset.
    pub fn with_cleanup(mut self, preset: SanitizePreset) -> Self {
        self.config.derive.sanitize = SanitizeOptions::from_preset(preset);
        self
    }

    /// Keep tables when scanning for paragraphs.
    pub fn keep_tables(mut self) -> Self {
        self.config.derive.strip_tables = false;
        self
    }

    /// Run one page compilation over rendered HTML.
    pub fn describe(&self, html: &str) -> Result<DescribeResult> {
        self.describe_in(PageContext::new(), html)
    }

    /// Run one page compilation over an HTML file.
    pub fn describe_file<P: AsRef<Path>>(&self, path: P) -> Result<DescribeResult> {
        let html = std::fs::read_to_string(path)?;
        self.describe(&html)
    }

    /// Run one page compilation using an existing context.
    ///
    /// Lets a host resume a compilation whose store was persisted earlier.
    pub fn describe_in(&self, mut context: PageContext, html: &str) -> Result<DescribeResult> {
        let hooks = Hooks::new(self.config.clone());
        let mut directives = DirectiveTable::new();
        hooks.on_first_call_init(&mut directives)?;

        if let Some(ref text) = self.override_text {
            if directives
                .invoke(&self.config.directive_name, &mut context, text)
                .is_none()
            {
                log::warn!("Override ignored: description functions are disabled");
            }
        }

        let outcome = hooks.on_after_render(&mut context, html);
        let mut meta_tags = MetaTags::new();
        hooks.on_output_page(&context, &mut meta_tags);

        Ok(DescribeResult {
            context,
            meta_tags,
            outcome,
        })
    }
}

/// Result of a page compilation run by [`Metadesc`].
#[derive(Debug, Clone, Serialize)]
pub struct DescribeResult {
    context: PageContext,
    meta_tags: MetaTags,
    #[serde(skip)]
    outcome: RenderOutcome,
}

impl DescribeResult {
    /// The stored description, if any.
    pub fn description(&self) -> Option<&str> {
        self.context.description()
    }

    /// The compilation context, including every stored property.
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Consume the result and return the context for persistence.
    pub fn into_context(self) -> PageContext {
        self.context
    }

    /// Metadata entries published for the page.
    pub fn meta_tags(&self) -> &MetaTags {
        &self.meta_tags
    }

    /// What automatic derivation did.
    pub fn outcome(&self) -> RenderOutcome {
        self.outcome
    }

    /// Serialize the result to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self)?,
            JsonFormat::Compact => serde_json::to_string(self)?,
        };
        Ok(json)
    }
}
