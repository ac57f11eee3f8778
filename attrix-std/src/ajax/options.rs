//! Typed ajax options decoded from a merged parameter set.

use attrix_core::{
    CompleteFn, DataValue, DescribeError, ErrorFn, Method, Mutation, Param, Parameters, Selector,
    SuccessFn, TargetFn,
};
use std::{fmt, str::FromStr};

/// Which event arms the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSpec {
    /// Deduce from the element's tag.
    Auto,
    /// Fire once when the page is ready.
    Ready,
    /// A DOM event name.
    Named(String),
}

/// Which element a response is applied to.
#[derive(Clone)]
pub enum TargetSpec {
    /// The described element.
    This,
    /// The element with this identifier, looked up when the response arrives.
    Id(String),
    /// A fixed element.
    Element(Selector),
    /// A producer called with the described element.
    Custom(TargetFn),
}

/// Built-in content actions usable as `success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    /// Remove the target.
    Remove,
    /// Empty the target.
    Empty,
    /// Replace the target's content with the response.
    Fill,
    /// Replace the target with the response.
    Replace,
    /// Insert the response after the target's content.
    Append,
    /// Insert the response before the target's content.
    Prepend,
}

impl ContentAction {
    /// All built-in actions.
    pub const ALL: [ContentAction; 6] = [
        ContentAction::Remove,
        ContentAction::Empty,
        ContentAction::Fill,
        ContentAction::Replace,
        ContentAction::Append,
        ContentAction::Prepend,
    ];

    /// The configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentAction::Remove => "remove",
            ContentAction::Empty => "empty",
            ContentAction::Fill => "fill",
            ContentAction::Replace => "replace",
            ContentAction::Append => "append",
            ContentAction::Prepend => "prepend",
        }
    }

    /// The page mutation applying `body`.
    pub fn mutation(&self, body: &str) -> Mutation {
        match self {
            ContentAction::Remove => Mutation::Remove,
            ContentAction::Empty => Mutation::Empty,
            ContentAction::Fill => Mutation::Fill(body.to_owned()),
            ContentAction::Replace => Mutation::Replace(body.to_owned()),
            ContentAction::Append => Mutation::Append(body.to_owned()),
            ContentAction::Prepend => Mutation::Prepend(body.to_owned()),
        }
    }
}

impl FromStr for ContentAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or(())
    }
}

/// What happens with a successful response.
#[derive(Clone)]
pub enum SuccessSpec {
    /// A built-in content action.
    Action(ContentAction),
    /// A callback looked up by name.
    Named(String),
    /// A callback supplied directly.
    Custom(SuccessFn),
}

/// What happens with a failed request.
#[derive(Clone)]
pub enum ErrorSpec {
    /// Write status and body to the diagnostic log.
    Log,
    /// A callback looked up by name.
    Named(String),
    /// A callback supplied directly.
    Custom(ErrorFn),
}

/// What happens after every request.
#[derive(Clone)]
pub enum CompleteSpec {
    /// Only the `after` notification.
    Nothing,
    /// A callback looked up by name.
    Named(String),
    /// A callback supplied directly.
    Custom(CompleteFn),
}

/// A form whose fields join the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSpec {
    /// The form with this identifier.
    Id(String),
    /// A form reference.
    Element(Selector),
}

impl FormSpec {
    /// The selector addressing the form.
    pub fn selector(&self) -> Selector {
        match self {
            FormSpec::Id(id) => Selector::id(id),
            FormSpec::Element(selector) => selector.clone(),
        }
    }
}

/// Options of the ajax handler.
#[derive(Clone)]
pub struct AjaxOptions {
    /// HTTP verb.
    pub method: Method,
    /// Arming event.
    pub event: EventSpec,
    /// Response target.
    pub target: TargetSpec,
    /// Success behaviour.
    pub success: SuccessSpec,
    /// Error behaviour.
    pub error: ErrorSpec,
    /// Complete behaviour.
    pub complete: CompleteSpec,
    /// Form merged into the request.
    pub form: Option<FormSpec>,
    /// Explicit operation identifier.
    pub op: Option<String>,
}

impl Default for AjaxOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            event: EventSpec::Auto,
            target: TargetSpec::This,
            success: SuccessSpec::Action(ContentAction::Fill),
            error: ErrorSpec::Log,
            complete: CompleteSpec::Nothing,
            form: None,
            op: None,
        }
    }
}

impl fmt::Debug for AjaxOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AjaxOptions")
            .field("method", &self.method)
            .field("event", &self.event)
            .field("form", &self.form)
            .field("op", &self.op)
            .finish_non_exhaustive()
    }
}

fn invalid(option: &'static str, expected: &'static str, found: &Param) -> DescribeError {
    DescribeError::InvalidOption {
        option,
        expected,
        found: found.kind().to_owned(),
    }
}

/// An identifier given as text or as a number.
fn ident(param: &Param) -> Option<String> {
    match param {
        Param::Text(s) => Some(s.clone()),
        Param::Number(n) => Some(DataValue::Number(*n).to_string()),
        _ => None,
    }
}

fn decode_method(param: &Param) -> Result<Option<Method>, DescribeError> {
    match param {
        Param::Null => Ok(None),
        Param::Text(s) => s.parse().map(Some).map_err(|_| DescribeError::InvalidOption {
            option: "method",
            expected: "an HTTP method",
            found: format!("`{s}`"),
        }),
        other => Err(invalid("method", "an HTTP method", other)),
    }
}

fn decode_event(param: &Param) -> Result<Option<EventSpec>, DescribeError> {
    match param {
        Param::Null => Ok(None),
        Param::Text(s) => Ok(Some(match s.as_str() {
            "auto" => EventSpec::Auto,
            "ready" => EventSpec::Ready,
            _ => EventSpec::Named(s.clone()),
        })),
        other => Err(invalid("event", "an event name", other)),
    }
}

fn decode_target(param: &Param) -> Result<Option<TargetSpec>, DescribeError> {
    match param {
        Param::Null => Ok(None),
        Param::Text(s) if s == "this" => Ok(Some(TargetSpec::This)),
        Param::Element(selector) => Ok(Some(TargetSpec::Element(selector.clone()))),
        Param::Target(f) => Ok(Some(TargetSpec::Custom(f.clone()))),
        other => ident(other)
            .map(|id| Some(TargetSpec::Id(id)))
            .ok_or_else(|| invalid("target", "`this`, an identifier or a callable", other)),
    }
}

fn decode_success(param: &Param) -> Result<Option<SuccessSpec>, DescribeError> {
    match param {
        Param::Null => Ok(None),
        Param::Text(s) => Ok(Some(match s.parse::<ContentAction>() {
            Ok(action) => SuccessSpec::Action(action),
            Err(()) => SuccessSpec::Named(s.clone()),
        })),
        Param::Success(f) => Ok(Some(SuccessSpec::Custom(f.clone()))),
        other => Err(invalid("success", "an action, a name or a callable", other)),
    }
}

fn decode_error(param: &Param) -> Result<Option<ErrorSpec>, DescribeError> {
    match param {
        Param::Null => Ok(None),
        Param::Text(s) if s == "log" => Ok(Some(ErrorSpec::Log)),
        Param::Text(s) => Ok(Some(ErrorSpec::Named(s.clone()))),
        Param::Error(f) => Ok(Some(ErrorSpec::Custom(f.clone()))),
        other => Err(invalid("error", "`log`, a name or a callable", other)),
    }
}

fn decode_complete(param: &Param) -> Result<Option<CompleteSpec>, DescribeError> {
    match param {
        Param::Null => Ok(None),
        Param::Text(s) => Ok(Some(CompleteSpec::Named(s.clone()))),
        Param::Complete(f) => Ok(Some(CompleteSpec::Custom(f.clone()))),
        other => Err(invalid("complete", "a name or a callable", other)),
    }
}

fn decode_form(param: &Param) -> Result<Option<FormSpec>, DescribeError> {
    match param {
        Param::Null | Param::Bool(false) => Ok(None),
        Param::Element(selector) => Ok(Some(FormSpec::Element(selector.clone()))),
        other => match ident(other) {
            Some(id) if id.is_empty() => Ok(None),
            Some(id) => Ok(Some(FormSpec::Id(id))),
            None => Err(invalid("form", "an identifier or an element", other)),
        },
    }
}

fn decode_op(param: &Param) -> Result<Option<String>, DescribeError> {
    match param {
        Param::Null => Ok(None),
        other => ident(other)
            .map(|op| Some(op).filter(|op| !op.is_empty()))
            .ok_or_else(|| invalid("op", "an operation identifier", other)),
    }
}

/// Decode one option.
///
/// A caller or handler value that does not decode is an error. A data
/// attribute that does not decode is ignored with a warning and the default
/// it was layered over is used instead.
fn decode<T>(
    params: &Parameters,
    key: &'static str,
    decoder: fn(&Param) -> Result<Option<T>, DescribeError>,
) -> Result<Option<T>, DescribeError> {
    let Some(value) = params.get(key) else {
        return Ok(None);
    };
    match decoder(value) {
        Ok(decoded) => Ok(decoded),
        Err(err) if params.is_from_element(key) => {
            tracing::warn!(option = key, error = %err, "Ignoring data attribute");
            params.shadowed(key).map_or(Ok(None), decoder)
        }
        Err(err) => Err(err),
    }
}

impl AjaxOptions {
    /// Decode options from merged parameters. Absent and `Null` values fall
    /// back to the defaults; keys the handler does not know are ignored.
    pub fn from_params(params: &Parameters) -> Result<Self, DescribeError> {
        let defaults = AjaxOptions::default();
        Ok(Self {
            method: decode(params, "method", decode_method)?.unwrap_or(defaults.method),
            event: decode(params, "event", decode_event)?.unwrap_or(defaults.event),
            target: decode(params, "target", decode_target)?.unwrap_or(defaults.target),
            success: decode(params, "success", decode_success)?.unwrap_or(defaults.success),
            error: decode(params, "error", decode_error)?.unwrap_or(defaults.error),
            complete: decode(params, "complete", decode_complete)?.unwrap_or(defaults.complete),
            form: decode(params, "form", decode_form)?,
            op: decode(params, "op", decode_op)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_decode_to_defaults() {
        let options = AjaxOptions::from_params(&Parameters::new()).unwrap();
        assert_eq!(options.method, Method::Get);
        assert_eq!(options.event, EventSpec::Auto);
        assert!(matches!(options.target, TargetSpec::This));
        assert!(matches!(options.success, SuccessSpec::Action(ContentAction::Fill)));
        assert!(matches!(options.error, ErrorSpec::Log));
        assert!(matches!(options.complete, CompleteSpec::Nothing));
        assert!(options.form.is_none());
    }

    #[test]
    fn strings_map_to_tagged_variants() {
        let params = Parameters::new()
            .with("method", "post")
            .with("event", "ready")
            .with("target", "other")
            .with("success", "append")
            .with("error", "app.failed")
            .with("complete", "app.done")
            .with("form", "signup")
            .with("op", 7);
        let options = AjaxOptions::from_params(&params).unwrap();

        assert_eq!(options.method, Method::Post);
        assert_eq!(options.event, EventSpec::Ready);
        assert!(matches!(options.target, TargetSpec::Id(ref id) if id == "other"));
        assert!(matches!(options.success, SuccessSpec::Action(ContentAction::Append)));
        assert!(matches!(options.error, ErrorSpec::Named(ref n) if n == "app.failed"));
        assert!(matches!(options.complete, CompleteSpec::Named(ref n) if n == "app.done"));
        assert_eq!(options.form, Some(FormSpec::Id("signup".into())));
        assert_eq!(options.op.as_deref(), Some("7"));
    }

    #[test]
    fn unknown_success_name_is_named() {
        let params = Parameters::new().with("success", "app.render");
        let options = AjaxOptions::from_params(&params).unwrap();
        assert!(matches!(options.success, SuccessSpec::Named(ref n) if n == "app.render"));
    }

    #[test]
    fn wrong_kinds_are_rejected() {
        let params = Parameters::new().with("event", true);
        assert!(matches!(
            AjaxOptions::from_params(&params),
            Err(DescribeError::InvalidOption { option: "event", .. })
        ));

        let params = Parameters::new().with("method", "FETCH");
        assert!(matches!(
            AjaxOptions::from_params(&params),
            Err(DescribeError::InvalidOption { option: "method", .. })
        ));
    }

    #[test]
    fn numeric_identifiers_become_text() {
        let params = Parameters::new()
            .with("target", 42)
            .with("form", 3)
            .with("op", 7);
        let options = AjaxOptions::from_params(&params).unwrap();

        assert!(matches!(options.target, TargetSpec::Id(ref id) if id == "42"));
        assert_eq!(options.form, Some(FormSpec::Id("3".into())));
        assert_eq!(options.op.as_deref(), Some("7"));
    }

    #[test]
    fn undecodable_data_attributes_fall_back() {
        let defaults = Parameters::new().with("method", "PUT");
        let mut params = Parameters::layered(&defaults, &Parameters::new());
        let mut data = attrix_core::Data::new();
        data.insert("method".into(), "card".into());
        data.insert("event".into(), true.into());
        params.overlay_element(&data);

        let options = AjaxOptions::from_params(&params).unwrap();
        assert_eq!(options.method, Method::Put);
        assert_eq!(options.event, EventSpec::Auto);
    }
}
