//! Target resolution.

use super::options::TargetSpec;
use attrix_core::{Page, Selector, TargetFn};
use std::fmt;

/// A target ready to be located when a response arrives.
#[derive(Clone)]
pub enum ResolvedTarget {
    /// A known selector.
    Selector(Selector),
    /// An identifier looked up lazily; the element may not exist yet.
    Lazy(String),
    /// A producer called with the source element.
    Custom(TargetFn),
}

impl ResolvedTarget {
    /// Locate the target element for a response to `element`.
    pub fn locate(&self, page: &dyn Page, element: &Selector) -> Option<Selector> {
        match self {
            ResolvedTarget::Selector(selector) => Some(selector.clone()),
            ResolvedTarget::Lazy(id) => {
                let selector = Selector::id(id);
                page.exists(&selector).then_some(selector)
            }
            ResolvedTarget::Custom(f) => f(element),
        }
    }
}

impl fmt::Debug for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTarget::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            ResolvedTarget::Lazy(id) => f.debug_tuple("Lazy").field(id).finish(),
            ResolvedTarget::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Resolve the configured target for `element`.
///
/// `this` on a degenerate selector yields `None`: the binding is skipped.
pub fn resolve_target(spec: &TargetSpec, element: &Selector) -> Option<ResolvedTarget> {
    match spec {
        TargetSpec::This if element.is_degenerate() => {
            tracing::warn!(element = %element, "Skipping binding, `this` target has no identifier");
            None
        }
        TargetSpec::This => Some(ResolvedTarget::Selector(element.clone())),
        TargetSpec::Id(id) => Some(ResolvedTarget::Lazy(id.clone())),
        TargetSpec::Element(selector) => Some(ResolvedTarget::Selector(selector.clone())),
        TargetSpec::Custom(f) => Some(ResolvedTarget::Custom(f.clone())),
    }
}
