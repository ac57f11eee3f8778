//! Callback name resolution.
//!
//! Names are dotted paths (`cart.render`) walked through nested
//! [`Namespace`]s. Resolution never guesses: a miss is an explicit
//! [`ResolveError`], and the caller decides whether that is fatal.

use attrix_core::{Callback, Entry, Namespace, ResolveError};

/// Resolve a dotted path against one namespace.
pub fn resolve<'a>(path: &str, namespace: &'a Namespace) -> Result<&'a Callback, ResolveError> {
    if path.is_empty() {
        return Err(ResolveError::Empty);
    }

    let mut current = namespace;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let Some(entry) = current.get(segment) else {
            tracing::debug!(path, segment, "Callback path segment not found");
            return Err(ResolveError::NotFound(path.to_owned()));
        };
        match (entry, segments.peek().is_some()) {
            (Entry::Callback(callback), false) => return Ok(callback),
            (Entry::Namespace(nested), true) => current = nested,
            (Entry::Namespace(_), false) => {
                return Err(ResolveError::NotCallable(path.to_owned()));
            }
            (Entry::Callback(_), true) => {
                tracing::debug!(path, segment, "Callback path descends into a callable");
                return Err(ResolveError::NotFound(path.to_owned()));
            }
        }
    }
    Err(ResolveError::NotFound(path.to_owned()))
}

/// Resolve a name against a `local` namespace first, then `global`.
///
/// The local miss is only reported when the global lookup fails as well,
/// and then the global error wins since it is the final tier.
pub fn resolve_from_param<'a>(
    path: &str,
    local: &'a Namespace,
    global: &'a Namespace,
) -> Result<&'a Callback, ResolveError> {
    match resolve(path, local) {
        Ok(callback) => Ok(callback),
        Err(ResolveError::Empty) => Err(ResolveError::Empty),
        Err(_) => resolve(path, global).inspect_err(|err| {
            tracing::warn!(path, error = %err, "Unable to resolve callback");
        }),
    }
}
