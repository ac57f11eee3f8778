//! Handler parameters.
//!
//! A [`Parameters`] set is built fresh for every element by layering,
//! lowest to highest precedence:
//!
//! 1. the handler's registered defaults,
//! 2. the element's own data attributes (handlers opt in through
//!    [`Parameters::overlay_element`]),
//! 3. the parameters supplied by the caller of `describe`.
//!
//! Every merge produces a new set; the registered defaults are never
//! touched.

use crate::{
    callback::{CompleteFn, ErrorFn, SuccessFn, TargetFn},
    element::Selector,
    value::{Data, DataValue},
};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// A single parameter value.
///
/// Scalars come from configuration or data attributes; the callable
/// variants can only be supplied from code.
#[derive(Clone)]
pub enum Param {
    /// Explicitly unset.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string: a literal, an element identifier or a callback name,
    /// depending on the option.
    Text(String),
    /// A direct element reference.
    Element(Selector),
    /// A target producer.
    Target(TargetFn),
    /// A success callback.
    Success(SuccessFn),
    /// An error callback.
    Error(ErrorFn),
    /// A complete callback.
    Complete(CompleteFn),
}

impl Param {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Param::Null => "null",
            Param::Bool(_) => "a boolean",
            Param::Number(_) => "a number",
            Param::Text(_) => "a string",
            Param::Element(_) => "an element",
            Param::Target(_) => "a target callback",
            Param::Success(_) => "a success callback",
            Param::Error(_) => "an error callback",
            Param::Complete(_) => "a complete callback",
        }
    }

    /// Whether the value is [`Param::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null)
    }

    /// The string value if this is a `Text` variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Wrap a success closure.
    pub fn success<F>(f: F) -> Self
    where
        F: Fn(&crate::callback::Success<'_>) + Send + Sync + 'static,
    {
        Param::Success(Arc::new(f))
    }

    /// Wrap an error closure.
    pub fn error<F>(f: F) -> Self
    where
        F: Fn(&crate::callback::Failure<'_>) + Send + Sync + 'static,
    {
        Param::Error(Arc::new(f))
    }

    /// Wrap a complete closure.
    pub fn complete<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Param::Complete(Arc::new(f))
    }

    /// Wrap a target closure.
    pub fn target<F>(f: F) -> Self
    where
        F: Fn(&Selector) -> Option<Selector> + Send + Sync + 'static,
    {
        Param::Target(Arc::new(f))
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Null => f.write_str("Null"),
            Param::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Param::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Param::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Param::Element(s) => f.debug_tuple("Element").field(s).finish(),
            Param::Target(_) => f.write_str("Target(..)"),
            Param::Success(_) => f.write_str("Success(..)"),
            Param::Error(_) => f.write_str("Error(..)"),
            Param::Complete(_) => f.write_str("Complete(..)"),
        }
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Param::Null, Param::Null) => true,
            (Param::Bool(a), Param::Bool(b)) => a == b,
            (Param::Number(a), Param::Number(b)) => a == b,
            (Param::Text(a), Param::Text(b)) => a == b,
            (Param::Element(a), Param::Element(b)) => a == b,
            (Param::Target(a), Param::Target(b)) => Arc::ptr_eq(a, b),
            (Param::Success(a), Param::Success(b)) => Arc::ptr_eq(a, b),
            (Param::Error(a), Param::Error(b)) => Arc::ptr_eq(a, b),
            (Param::Complete(a), Param::Complete(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_owned())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Number(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Number(value as f64)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Number(f64::from(value))
    }
}

impl From<Selector> for Param {
    fn from(value: Selector) -> Self {
        Param::Element(value)
    }
}

impl From<DataValue> for Param {
    fn from(value: DataValue) -> Self {
        match value {
            DataValue::Text(s) => Param::Text(s),
            DataValue::Number(n) => Param::Number(n),
            DataValue::Bool(b) => Param::Bool(b),
            DataValue::Structured(s) => Param::Text(s),
        }
    }
}

/// Which layer a parameter value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Default,
    Element,
    Caller,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    value: Param,
    origin: Origin,
    /// The default an element value was layered over.
    shadowed: Option<Param>,
}

/// An ordered set of named parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters {
    slots: BTreeMap<String, Slot>,
}

impl Parameters {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) {
        self.slots.insert(
            key.into(),
            Slot {
                value: value.into(),
                origin: Origin::Caller,
                shadowed: None,
            },
        );
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.slots.get(key).map(|slot| &slot.value)
    }

    /// Whether the value under `key` came from the element's data
    /// attributes.
    pub fn is_from_element(&self, key: &str) -> bool {
        self.slots
            .get(key)
            .is_some_and(|slot| slot.origin == Origin::Element)
    }

    /// The default hidden by an element value under `key`, if any.
    pub fn shadowed(&self, key: &str) -> Option<&Param> {
        self.slots.get(key).and_then(|slot| slot.shadowed.as_ref())
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: &str) -> Option<Param> {
        self.slots.remove(key).map(|slot| slot.value)
    }

    /// Whether a parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.slots.iter().map(|(k, slot)| (k.as_str(), &slot.value))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Layer caller `overrides` on top of handler `defaults`.
    ///
    /// Keys present only in `defaults` keep their value; on conflict the
    /// caller wins.
    pub fn layered(defaults: &Parameters, overrides: &Parameters) -> Parameters {
        let mut slots: BTreeMap<String, Slot> = defaults
            .slots
            .iter()
            .map(|(k, slot)| {
                (
                    k.clone(),
                    Slot {
                        value: slot.value.clone(),
                        origin: Origin::Default,
                        shadowed: None,
                    },
                )
            })
            .collect();
        for (k, slot) in &overrides.slots {
            slots.insert(
                k.clone(),
                Slot {
                    value: slot.value.clone(),
                    origin: Origin::Caller,
                    shadowed: None,
                },
            );
        }
        Parameters { slots }
    }

    /// Insert element data between the defaults and the caller layer.
    ///
    /// A data attribute replaces a default but never a caller-supplied value.
    pub fn overlay_element(&mut self, data: &Data) {
        for (key, value) in data {
            let shadowed = match self.slots.get(key) {
                Some(slot) if slot.origin == Origin::Caller => continue,
                Some(slot) if slot.origin == Origin::Default => Some(slot.value.clone()),
                Some(slot) => slot.shadowed.clone(),
                None => None,
            };
            self.slots.insert(
                key.clone(),
                Slot {
                    value: Param::from(value.clone()),
                    origin: Origin::Element,
                    shadowed,
                },
            );
        }
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K: Into<String>, V: Into<Param>, const N: usize> From<[(K, V); N]> for Parameters {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}
