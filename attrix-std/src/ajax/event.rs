//! Event resolution.

use super::options::EventSpec;
use attrix_core::{Page, Scope, Selector};

/// The event fired once the page is ready.
pub const READY: &str = "ready";

/// Tags whose natural trigger is a click.
const CLICK_TAGS: &[&str] = &["button", "a"];

/// Where and on what the listener gets subscribed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    /// Event name.
    pub event: String,
    /// Subscription scope.
    pub scope: Scope,
}

/// Deduce the event for `auto`: a click for buttons and links, `ready`
/// for anything else, missing elements included.
pub fn deduce_event(page: &dyn Page, element: &Selector) -> &'static str {
    match page.tag_name(element) {
        Some(tag) if CLICK_TAGS.contains(&tag.to_ascii_lowercase().as_str()) => "click",
        _ => READY,
    }
}

/// Resolve the configured event into a binding.
///
/// Returns `None` when the event is `ready` and the element does not
/// exist: there is nothing to be ready for.
pub fn resolve_event(spec: &EventSpec, page: &dyn Page, element: &Selector) -> Option<EventBinding> {
    let event = match spec {
        EventSpec::Auto => deduce_event(page, element).to_owned(),
        EventSpec::Ready => READY.to_owned(),
        EventSpec::Named(name) => name.clone(),
    };

    if event == READY {
        if !page.exists(element) {
            tracing::warn!(element = %element, "Skipping `ready` binding for missing element");
            return None;
        }
        // `ready` belongs to the document, not to the element.
        return Some(EventBinding {
            event,
            scope: Scope::Document,
        });
    }

    Some(EventBinding {
        event,
        scope: Scope::Element(element.clone()),
    })
}
