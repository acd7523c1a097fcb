//! Integration tests for host lifecycle hooks.

use std::collections::HashSet;
use std::sync::Arc;

use metadesc::{
    Config, DeriveOptions, DescriptionProvider, DirectiveRegistry, DirectiveTable, Hooks,
    MetaTags, MetadataSink, OverrideRegistrar, PageContext, RenderOutcome, DIRECTIVE_NAME,
    OG_DESCRIPTION_KEY,
};

/// Provider that always returns the same text.
struct FixedProvider(&'static str);

impl DescriptionProvider for FixedProvider {
    fn derive(&self, _html: &str) -> Option<String> {
        Some(self.0.to_string())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Sink standing in for a response that may already carry
/// tags added by unrelated collaborators.
#[derive(Default)]
struct RecordingSink {
    names: HashSet<String>,
    published: Vec<(String, String)>,
}

impl MetadataSink for RecordingSink {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn publish(&mut self, name: &str, value: &str) {
        self.names.insert(name.to_string());
        self.published.push((name.to_string(), value.to_string()));
    }
}

/// Registry that only records which directives were registered.
#[derive(Default)]
struct CountingRegistry {
    calls: Vec<String>,
}

impl DirectiveRegistry for CountingRegistry {
    fn set_directive(
        &mut self,
        name: &str,
        _directive: Arc<dyn OverrideRegistrar>,
    ) -> metadesc::Result<()> {
        self.calls.push(name.to_string());
        Ok(())
    }
}

fn enabled() -> Config {
    Config::new().with_meta_description_functions(true)
}

#[test]
fn test_full_lifecycle_with_override() {
    let hooks = Hooks::new(enabled());
    let mut directives = DirectiveTable::new();
    assert!(hooks.on_first_call_init(&mut directives).unwrap());

    let mut ctx = PageContext::new();
    directives.invoke(DIRECTIVE_NAME, &mut ctx, "Hand-written summary");
    let outcome = hooks.on_after_render(&mut ctx, "<p>Derived summary</p>");
    assert_eq!(outcome, RenderOutcome::AlreadyPresent);

    let mut tags = MetaTags::new();
    assert_eq!(hooks.on_output_page(&ctx, &mut tags), 2);
    assert_eq!(tags.get("description"), Some("Hand-written summary"));
    assert_eq!(tags.get(OG_DESCRIPTION_KEY), Some("Hand-written summary"));
}

#[test]
fn test_full_lifecycle_automatic_only() {
    let hooks = Hooks::new(Config::default());
    let mut directives = DirectiveTable::new();
    assert!(!hooks.on_first_call_init(&mut directives).unwrap());

    let mut ctx = PageContext::new();
    assert_eq!(directives.invoke(DIRECTIVE_NAME, &mut ctx, "ignored"), None);
    assert_eq!(
        hooks.on_after_render(&mut ctx, "<p>Derived summary</p>"),
        RenderOutcome::Stored
    );

    let mut tags = MetaTags::new();
    hooks.on_output_page(&ctx, &mut tags);
    assert_eq!(
        tags.to_html(),
        "<meta name=\"description\" content=\"Derived summary\"/>\n\
         <meta property=\"og:description\" content=\"Derived summary\"/>"
    );
}

#[test]
fn test_registration_called_only_when_enabled() {
    let mut registry = CountingRegistry::default();
    Hooks::new(Config::default())
        .on_first_call_init(&mut registry)
        .unwrap();
    assert!(registry.calls.is_empty());

    Hooks::new(enabled())
        .on_first_call_init(&mut registry)
        .unwrap();
    assert_eq!(registry.calls, vec![DIRECTIVE_NAME.to_string()]);
}

#[test]
fn test_duplicate_registration_errors() {
    let hooks = Hooks::new(enabled());
    let mut directives = DirectiveTable::new();
    hooks.on_first_call_init(&mut directives).unwrap();
    assert!(hooks.on_first_call_init(&mut directives).is_err());
}

#[test]
fn test_output_skips_names_added_by_others() {
    let hooks = Hooks::new(Config::default());
    let mut ctx = PageContext::new();
    let _ = hooks.on_after_render(&mut ctx, "<p>Ours</p>");

    let mut sink = RecordingSink::default();
    sink.publish("description", "Theirs");

    assert_eq!(hooks.on_output_page(&ctx, &mut sink), 1);
    assert_eq!(hooks.on_output_page(&ctx, &mut sink), 0);
    assert_eq!(
        sink.published,
        vec![
            ("description".to_string(), "Theirs".to_string()),
            ("og:description".to_string(), "Ours".to_string()),
        ]
    );
}

#[test]
fn test_output_publishes_empty_override() {
    let hooks = Hooks::new(enabled());
    let mut directives = DirectiveTable::new();
    hooks.on_first_call_init(&mut directives).unwrap();

    let mut ctx = PageContext::new();
    directives.invoke(DIRECTIVE_NAME, &mut ctx, "");
    let _ = hooks.on_after_render(&mut ctx, "<p>Not used</p>");

    let mut tags = MetaTags::new();
    assert_eq!(hooks.on_output_page(&ctx, &mut tags), 2);
    assert_eq!(tags.get("description"), Some(""));
}

#[test]
fn test_custom_provider() {
    let hooks = Hooks::with_provider(Config::default(), FixedProvider("Fixed text"));
    assert_eq!(hooks.provider().name(), "fixed");

    let mut ctx = PageContext::new();
    assert_eq!(
        hooks.on_after_render(&mut ctx, "<div>anything</div>"),
        RenderOutcome::Stored
    );
    assert_eq!(ctx.description(), Some("Fixed text"));
}

#[test]
fn test_interface_messages_can_be_included() {
    let config = Config::new()
        .with_derive_options(DeriveOptions::new().with_skip_interface_messages(false));
    let hooks = Hooks::new(config);

    let mut ctx = PageContext::interface_message();
    assert_eq!(
        hooks.on_after_render(&mut ctx, "<p>UI text</p>"),
        RenderOutcome::Stored
    );
}

#[test]
fn test_config_drives_derivation() {
    let config = Config::from_json_str(r#"{ "derive": { "strip_tables": false } }"#).unwrap();
    let hooks = Hooks::new(config);

    let mut ctx = PageContext::new();
    let _ = hooks.on_after_render(
        &mut ctx,
        "<table><tr><td><p>In table</p></td></tr></table><p>Body</p>",
    );
    assert_eq!(ctx.description(), Some("In table"));
}
