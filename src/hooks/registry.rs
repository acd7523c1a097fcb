//! Override directives and the registry a host dispatches them through.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::{PageContext, SetOutcome};

/// Default name under which the description override directive is registered.
///
/// Pages invoke the directive by this name, so hosts migrating existing
/// markup keep it; [`Config::directive_name`](crate::Config) can change it.
pub const DIRECTIVE_NAME: &str = "description2";

/// An author-invoked construct that writes a property directly.
///
/// The host expands the directive's argument (templates, variables) and
/// passes the resulting text in. Implementations write unconditionally and
/// rely on the store's first-wins rule; they never check for an existing
/// value themselves.
pub trait OverrideRegistrar: Send + Sync {
    /// Accept the expanded directive argument for the current compilation.
    fn accept(&self, ctx: &mut PageContext, text: &str) -> SetOutcome;
}

/// Directive that sets the page description.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionOverride;

impl DescriptionOverride {
    /// Create the description override directive.
    pub fn new() -> Self {
        Self
    }
}

impl OverrideRegistrar for DescriptionOverride {
    fn accept(&self, ctx: &mut PageContext, text: &str) -> SetOutcome {
        let outcome = ctx.set_description_if_absent(text);
        if outcome.is_stored() {
            log::debug!("Description set by override directive");
        }
        outcome
    }
}

/// Host-side table of callable directives.
pub trait DirectiveRegistry {
    /// Register a directive under a name.
    fn set_directive(&mut self, name: &str, directive: Arc<dyn OverrideRegistrar>) -> Result<()>;
}

/// In-memory [`DirectiveRegistry`] keyed by lowercase name.
#[derive(Default)]
pub struct DirectiveTable {
    directives: HashMap<String, Arc<dyn OverrideRegistrar>>,
}

impl DirectiveTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a directive by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn OverrideRegistrar>> {
        self.directives.get(&name.to_lowercase()).cloned()
    }

    /// Check if a directive is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(&name.to_lowercase())
    }

    /// Registered directive names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.directives.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Invoke a directive as the host's markup processor would.
    ///
    /// Returns `None` when no directive of that name is registered.
    pub fn invoke(&self, name: &str, ctx: &mut PageContext, text: &str) -> Option<SetOutcome> {
        let directive = self.get(name)?;
        Some(directive.accept(ctx, text))
    }
}

impl DirectiveRegistry for DirectiveTable {
    fn set_directive(&mut self, name: &str, directive: Arc<dyn OverrideRegistrar>) -> Result<()> {
        let key = name.to_lowercase();
        if self.directives.contains_key(&key) {
            return Err(Error::DirectiveExists(key));
        }
        self.directives.insert(key, directive);
        Ok(())
    }
}

impl std::fmt::Debug for DirectiveTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveTable")
            .field("directives", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_sets_description() {
        let mut ctx = PageContext::new();
        let outcome = DescriptionOverride::new().accept(&mut ctx, "Explicit");
        assert_eq!(outcome, SetOutcome::Stored);
        assert_eq!(ctx.description(), Some("Explicit"));
    }

    #[test]
    fn test_override_is_first_wins() {
        let mut ctx = PageContext::new();
        let _ = ctx.set_description_if_absent("Derived");
        let outcome = DescriptionOverride.accept(&mut ctx, "Late override");
        assert_eq!(outcome, SetOutcome::AlreadySet);
        assert_eq!(ctx.description(), Some("Derived"));
    }

    #[test]
    fn test_table_register_and_invoke() {
        let mut table = DirectiveTable::new();
        table
            .set_directive(DIRECTIVE_NAME, Arc::new(DescriptionOverride))
            .unwrap();

        assert!(table.contains("DESCRIPTION2"));
        assert_eq!(table.names(), vec!["description2"]);

        let mut ctx = PageContext::new();
        assert_eq!(
            table.invoke("description2", &mut ctx, "Hi"),
            Some(SetOutcome::Stored)
        );
        assert_eq!(table.invoke("missing", &mut ctx, "Hi"), None);
    }

    #[test]
    fn test_table_rejects_duplicate() {
        let mut table = DirectiveTable::new();
        table
            .set_directive("description", Arc::new(DescriptionOverride))
            .unwrap();
        let result = table.set_directive("Description", Arc::new(DescriptionOverride));
        assert!(matches!(result, Err(Error::DirectiveExists(name)) if name == "description"));
    }
}
