//! Success, error and complete resolution.
//!
//! Every resolved callable is wrapped so that it logs before delegating.
//! In lenient mode an unresolvable name leaves the wrapper without a
//! delegate, which makes it a logged no-op.

use super::options::{CompleteSpec, ContentAction, ErrorSpec, SuccessSpec};
use crate::resolve::{resolve, resolve_from_param};
use attrix_core::{
    Callback, CompleteFn, Context, DescribeError, ErrorFn, Failure, LifecycleEvent, Namespace,
    ResolveError, Selector, Success, SuccessFn,
};
use std::sync::Arc;

/// The three response callables of one binding.
#[derive(Clone)]
pub struct ResponseCallbacks {
    /// Runs with a successful response.
    pub success: SuccessFn,
    /// Runs with a failed request.
    pub error: ErrorFn,
    /// Runs after either, then emits the `after` notification.
    pub complete: CompleteFn,
}

/// The built-in callable applying a content action to the target.
pub fn action_callback(action: ContentAction) -> SuccessFn {
    Arc::new(move |success: &Success<'_>| {
        let Some(target) = success.target else {
            tracing::warn!(action = action.as_str(), "Response target not found");
            return;
        };
        if let Err(err) = success.page.apply(target, action.mutation(success.body)) {
            tracing::warn!(action = action.as_str(), target = %target, error = %err, "Unable to apply response");
        }
    })
}

/// The built-in `log` error callable.
pub fn log_failure() -> ErrorFn {
    Arc::new(|failure: &Failure<'_>| {
        tracing::error!(
            status = ?failure.status,
            body = failure.body,
            error = %failure.error,
            "Request failed"
        );
    })
}

/// Turn a resolution outcome into a delegate, honouring strictness.
fn settle<T>(
    option: &'static str,
    outcome: Result<T, ResolveError>,
    strict: bool,
) -> Result<Option<T>, DescribeError> {
    match outcome {
        Ok(found) => Ok(Some(found)),
        Err(source) if strict => Err(DescribeError::Callback { option, source }),
        Err(source) => {
            tracing::warn!(option, error = %source, "Callback unresolved, it will do nothing");
            Ok(None)
        }
    }
}

fn wrong_kind(path: &str, expected: &'static str, found: &Callback) -> ResolveError {
    ResolveError::WrongKind {
        path: path.to_owned(),
        expected,
        found: found.kind(),
    }
}

/// Resolve `success`: built-in actions, then the handler's local
/// namespace, then the application callbacks.
pub fn resolve_success(
    spec: &SuccessSpec,
    cx: &Context,
    local: &Namespace,
    element: &Selector,
) -> Result<SuccessFn, DescribeError> {
    let delegate = match spec {
        SuccessSpec::Action(action) => Some(action_callback(*action)),
        SuccessSpec::Custom(f) => Some(f.clone()),
        SuccessSpec::Named(name) => {
            let outcome =
                resolve_from_param(name, local, cx.callbacks()).and_then(|callback| match callback {
                    Callback::Success(f) => Ok(f.clone()),
                    other => Err(wrong_kind(name, "success", other)),
                });
            settle("success", outcome, cx.settings().strict_callbacks)?
        }
    };

    let element = element.clone();
    Ok(Arc::new(move |success: &Success<'_>| {
        tracing::debug!(element = %element, status = success.status, "Running success callback");
        if let Some(delegate) = &delegate {
            delegate(success);
        }
    }))
}

/// Resolve `error`: the built-in `log`, then the handler's local
/// namespace, then the application callbacks.
pub fn resolve_error(
    spec: &ErrorSpec,
    cx: &Context,
    local: &Namespace,
    element: &Selector,
) -> Result<ErrorFn, DescribeError> {
    let delegate = match spec {
        ErrorSpec::Log => Some(log_failure()),
        ErrorSpec::Custom(f) => Some(f.clone()),
        ErrorSpec::Named(name) => {
            let outcome =
                resolve_from_param(name, local, cx.callbacks()).and_then(|callback| match callback {
                    Callback::Error(f) => Ok(f.clone()),
                    other => Err(wrong_kind(name, "error", other)),
                });
            settle("error", outcome, cx.settings().strict_callbacks)?
        }
    };

    let element = element.clone();
    Ok(Arc::new(move |failure: &Failure<'_>| {
        tracing::debug!(element = %element, status = ?failure.status, "Running error callback");
        if let Some(delegate) = &delegate {
            delegate(failure);
        }
    }))
}

/// Resolve `complete` against the application callbacks only.
///
/// The wrapper always emits the `after` notification on `element`.
pub fn resolve_complete(
    spec: &CompleteSpec,
    cx: &Context,
    element: &Selector,
) -> Result<CompleteFn, DescribeError> {
    let delegate = match spec {
        CompleteSpec::Nothing => None,
        CompleteSpec::Custom(f) => Some(f.clone()),
        CompleteSpec::Named(name) => {
            let outcome = resolve(name, cx.callbacks()).and_then(|callback| match callback {
                Callback::Complete(f) => Ok(f.clone()),
                other => Err(wrong_kind(name, "complete", other)),
            });
            settle("complete", outcome, cx.settings().strict_callbacks)?
        }
    };

    let page = Arc::clone(cx.page());
    let element = element.clone();
    Ok(Arc::new(move || {
        tracing::debug!(element = %element, "Running complete callback");
        if let Some(delegate) = &delegate {
            delegate();
        }
        page.emit(&element, &mut LifecycleEvent::after());
    }))
}

/// Resolve all three response callables of one binding.
pub fn resolve_callbacks(
    success: &SuccessSpec,
    error: &ErrorSpec,
    complete: &CompleteSpec,
    cx: &Context,
    local: &Namespace,
    element: &Selector,
) -> Result<ResponseCallbacks, DescribeError> {
    Ok(ResponseCallbacks {
        success: resolve_success(success, cx, local, element)?,
        error: resolve_error(error, cx, local, element)?,
        complete: resolve_complete(complete, cx, element)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryPage, MockTransport, Node};
    use attrix_core::{Page, Phase, Response, Settings};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn context(page: Arc<MemoryPage>, callbacks: Namespace, strict: bool) -> Context {
        Context::new(page, Arc::new(MockTransport::new()))
            .with_callbacks(callbacks)
            .with_settings(Settings::new().with_strict_callbacks(strict))
    }

    #[test]
    fn builtin_actions_mutate_target() {
        let page = Arc::new(MemoryPage::new().with_element("box", Node::new("div").html("old")));
        let cx = context(page.clone(), Namespace::new(), true);
        let element = Selector::id("box");

        let success = resolve_success(
            &SuccessSpec::Action(ContentAction::Append),
            &cx,
            &Namespace::new(),
            &element,
        )
        .unwrap();
        let response = Response::ok("new");
        success(&Success {
            body: &response.body,
            status: response.status,
            response: &response,
            target: Some(&element),
            page: page.as_ref(),
        });

        assert_eq!(page.html("box").as_deref(), Some("oldnew"));
    }

    #[test]
    fn strict_mode_rejects_unknown_names() {
        let page = Arc::new(MemoryPage::new());
        let cx = context(page, Namespace::new(), true);
        let err = resolve_success(
            &SuccessSpec::Named("app.render".into()),
            &cx,
            &Namespace::new(),
            &Selector::id("box"),
        )
        .err()
        .unwrap();

        assert!(matches!(
            err,
            DescribeError::Callback {
                option: "success",
                source: ResolveError::NotFound(_)
            }
        ));
    }

    #[test]
    fn lenient_mode_yields_noop() {
        let page = Arc::new(MemoryPage::new());
        let cx = context(page, Namespace::new(), false);
        let complete =
            resolve_complete(&CompleteSpec::Named("missing".into()), &cx, &Selector::id("box"));
        assert!(complete.is_ok());
    }

    #[test]
    fn wrong_kind_is_reported() {
        let page = Arc::new(MemoryPage::new());
        let cx = context(page, Namespace::new().with_complete("done", || {}), true);
        let err = resolve_error(
            &ErrorSpec::Named("done".into()),
            &cx,
            &Namespace::new(),
            &Selector::id("box"),
        )
        .err()
        .unwrap();

        assert!(matches!(
            err,
            DescribeError::Callback {
                source: ResolveError::WrongKind { expected: "error", found: "complete", .. },
                ..
            }
        ));
    }

    #[test]
    fn complete_runs_delegate_then_emits_after() {
        let page = Arc::new(MemoryPage::new().with_element("box", Node::new("div")));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let callbacks = Namespace::new().with_complete("app.done", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let cx = context(page.clone(), callbacks, true);

        let complete =
            resolve_complete(&CompleteSpec::Named("app.done".into()), &cx, &Selector::id("box"))
                .unwrap();
        complete();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let phases: Vec<Phase> = page.lifecycle_log().iter().map(|(_, p)| *p).collect();
        assert_eq!(phases, vec![Phase::After]);
        assert!(page.exists(&Selector::id("box")));
    }
}
