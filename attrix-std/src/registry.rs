//! Handler registry.
//!
//! Maps aliases to [`HandlerEntry`]s. Registration overwrites; the built-in
//! ajax handler is registered lazily under the default alias the first time
//! it is asked for.

use crate::ajax::AjaxHandler;
use attrix_core::{DescribeError, HandlerEntry};
use std::collections::HashMap;

/// Alias → handler mapping.
#[derive(Debug)]
pub struct HandlerRegistry {
    entries: HashMap<String, HandlerEntry>,
    default_alias: String,
}

impl HandlerRegistry {
    /// Create an empty registry whose default alias is `default_alias`.
    pub fn new(default_alias: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            default_alias: default_alias.into(),
        }
    }

    /// The alias bootstrapped on demand.
    pub fn default_alias(&self) -> &str {
        &self.default_alias
    }

    /// Register or overwrite the entry for `alias`.
    pub fn register(&mut self, alias: impl Into<String>, entry: impl Into<HandlerEntry>) {
        let alias = alias.into();
        tracing::debug!(alias = %alias, "Registering handler");
        self.entries.insert(alias, entry.into());
    }

    /// Look up an entry.
    pub fn lookup(&self, alias: &str) -> Option<&HandlerEntry> {
        self.entries.get(alias)
    }

    /// Register the built-in ajax handler under the default alias unless
    /// something is registered there already.
    pub fn bootstrap_default(&mut self) {
        if !self.entries.contains_key(&self.default_alias) {
            let alias = self.default_alias.clone();
            self.register(alias, AjaxHandler::entry());
        }
    }

    /// Look up `alias`, bootstrapping the default handler when needed.
    pub fn resolve(&mut self, alias: &str) -> Result<HandlerEntry, DescribeError> {
        if self.lookup(alias).is_none() && alias == self.default_alias {
            self.bootstrap_default();
        }
        self.lookup(alias)
            .cloned()
            .ok_or_else(|| DescribeError::UnregisteredHandler(alias.to_owned()))
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrix_core::{Context, Parameters, Selector};

    fn noop(_: &Context, _: &Selector, _: Parameters) -> Result<(), DescribeError> {
        Ok(())
    }

    #[test]
    fn default_alias_is_bootstrapped_once() {
        let mut registry = HandlerRegistry::new("ajax");
        assert!(registry.is_empty());

        registry.resolve("ajax").unwrap();
        registry.resolve("ajax").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn bootstrap_keeps_existing_default() {
        let mut registry = HandlerRegistry::new("ajax");
        registry.register("ajax", (noop, Parameters::new().with("mine", true)));
        registry.bootstrap_default();

        let entry = registry.lookup("ajax").unwrap();
        assert!(entry.defaults().contains_key("mine"));
    }

    #[test]
    fn unknown_alias_fails() {
        let mut registry = HandlerRegistry::new("ajax");
        let err = registry.resolve("nonexistent").unwrap_err();
        assert!(matches!(err, DescribeError::UnregisteredHandler(alias) if alias == "nonexistent"));
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = HandlerRegistry::new("ajax");
        registry.register("mine", (noop, Parameters::new().with("v", 1)));
        registry.register("mine", (noop, Parameters::new().with("v", 2)));

        let entry = registry.lookup("mine").unwrap();
        assert_eq!(entry.defaults().get("v"), Some(&2.into()));
    }
}
