//! Host integration points.
//!
//! A host rendering pipeline drives description handling through three
//! callbacks on [`Hooks`]:
//!
//! 1. [`on_first_call_init`](Hooks::on_first_call_init) once per markup
//!    processor, to register the override directive (if enabled).
//! 2. [`on_after_render`](Hooks::on_after_render) after the page body has
//!    been rendered to HTML, to derive a description automatically.
//! 3. [`on_output_page`](Hooks::on_output_page) when assembling the
//!    response, to publish the description as metadata.
//!
//! Override directives run during rendering, so they execute before
//! step 2 and take precedence through the store's first-wins rule. The
//! ordering is the host's responsibility; nothing here enforces it.

mod meta;
mod registry;

pub use meta::{MetaTag, MetaTags, MetadataSink};
pub use registry::{
    DescriptionOverride, DirectiveRegistry, DirectiveTable, OverrideRegistrar, DIRECTIVE_NAME,
};

use std::sync::Arc;

use crate::config::Config;
use crate::derive::{DescriptionProvider, SimpleDescriptionProvider};
use crate::error::Result;
use crate::store::{PageContext, DESCRIPTION_KEY};

/// Metadata name used for the Open Graph copy of the description.
pub const OG_DESCRIPTION_KEY: &str = "og:description";

/// What [`Hooks::on_after_render`] did for a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Interface message compilation, derivation not attempted
    Skipped,
    /// A description was already present; nothing written
    AlreadyPresent,
    /// No paragraph yielded text
    NoCandidate,
    /// A derived description was stored
    Stored,
}

/// Description handling wired to a host's lifecycle callbacks.
pub struct Hooks<P: DescriptionProvider = SimpleDescriptionProvider> {
    config: Config,
    provider: P,
}

impl Hooks<SimpleDescriptionProvider> {
    /// Create hooks using the first-paragraph provider configured by `config`.
    pub fn new(config: Config) -> Self {
        let provider = SimpleDescriptionProvider::new(config.derive.clone());
        Self { config, provider }
    }
}

impl<P: DescriptionProvider> Hooks<P> {
    /// Create hooks with a custom description provider.
    pub fn with_provider(config: Config, provider: P) -> Self {
        Self { config, provider }
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the description provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Register the description override directive with the host.
    ///
    /// Does nothing when `enable_meta_description_functions` is off; only
    /// automatic derivation can then populate the description.
    pub fn on_first_call_init(&self, registry: &mut dyn DirectiveRegistry) -> Result<bool> {
        if !self.config.enable_meta_description_functions {
            log::debug!("Description functions disabled, not registering directive");
            return Ok(false);
        }
        registry.set_directive(&self.config.directive_name, Arc::new(DescriptionOverride))?;
        Ok(true)
    }

    /// Derive a description from rendered HTML and store it if none is set.
    ///
    /// Safe to call several times for the same compilation; only the first
    /// stored value survives.
    pub fn on_after_render(&self, ctx: &mut PageContext, html: &str) -> RenderOutcome {
        if ctx.is_interface_message() && self.config.derive.skip_interface_messages {
            return RenderOutcome::Skipped;
        }

        // Presence check saves a scan; first-wins would reject the write anyway.
        if ctx.description().is_some_and(|d| !d.is_empty()) {
            return RenderOutcome::AlreadyPresent;
        }

        let Some(desc) = self.provider.derive(html) else {
            return RenderOutcome::NoCandidate;
        };

        if ctx.set_description_if_absent(desc).is_stored() {
            log::debug!("Description derived by '{}' provider", self.provider.name());
            RenderOutcome::Stored
        } else {
            RenderOutcome::AlreadyPresent
        }
    }

    /// Publish the stored description as `description` and `og:description`.
    ///
    /// Names the sink already carries are skipped, so repeated calls (or
    /// other collaborators adding the same names) never produce duplicates.
    /// Returns the number of entries published.
    pub fn on_output_page(&self, ctx: &PageContext, sink: &mut dyn MetadataSink) -> usize {
        let Some(desc) = ctx.description() else {
            return 0;
        };

        let mut published = 0;
        for name in [DESCRIPTION_KEY, OG_DESCRIPTION_KEY] {
            if sink.contains(name) {
                log::debug!("Metadata '{}' already present, not adding again", name);
                continue;
            }
            sink.publish(name, desc);
            published += 1;
        }
        published
    }
}

impl Default for Hooks<SimpleDescriptionProvider> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
