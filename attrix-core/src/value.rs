//! Attribute values and request payloads.

use std::{collections::BTreeMap, fmt};
use url::form_urlencoded;

/// A value read from an element's data attributes.
///
/// Only [`Text`](DataValue::Text), [`Number`](DataValue::Number) and
/// [`Bool`](DataValue::Bool) are considered simple; structured values are
/// kept in their source notation so hosts can report them, but they never
/// reach handler parameters or payloads.
///
/// With the `serde` feature, values map onto plain JSON: strings, numbers
/// and booleans to their JSON counterparts, structured values to the
/// object or array their source notation describes.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A string value.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// An object or array, in source notation.
    Structured(String),
}

impl DataValue {
    /// Returns `true` for strings, numbers and booleans.
    pub fn is_simple(&self) -> bool {
        !matches!(self, DataValue::Structured(_))
    }

    /// Returns the string value if this is a `Text` variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Text(s) | DataValue::Structured(s) => f.write_str(s),
            // `f64` displays whole numbers without a fractional part.
            DataValue::Number(n) => write!(f, "{n}"),
            DataValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_owned())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Number(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Number(value as f64)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

/// Prefix-stripped simple data attributes of one element.
pub type Data = BTreeMap<String, DataValue>;

/// The body of a triggered request.
///
/// The operation identifier always comes first and cannot be shadowed by a
/// data attribute of the same name. Form fields, when present, are appended
/// after the data attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    op: String,
    data: Data,
    form: Vec<(String, String)>,
}

impl Payload {
    /// Key under which the operation identifier is sent.
    pub const OP_KEY: &'static str = "op";

    /// Create a payload carrying only the operation identifier.
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            data: Data::new(),
            form: Vec::new(),
        }
    }

    /// Attach element data.
    pub fn with_data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }

    /// The operation identifier.
    pub fn op(&self) -> &str {
        &self.op
    }

    /// The element data carried by this payload.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Look up a single data value.
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.data.get(key)
    }

    /// Serialized form fields merged into this payload.
    pub fn form_fields(&self) -> &[(String, String)] {
        &self.form
    }

    /// Append serialized form fields.
    pub fn extend_form<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.form.extend(fields);
    }

    /// All key/value pairs in wire order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(1 + self.data.len() + self.form.len());
        pairs.push((Self::OP_KEY.to_owned(), self.op.clone()));
        pairs.extend(
            self.data
                .iter()
                .filter(|(k, _)| k.as_str() != Self::OP_KEY)
                .map(|(k, v)| (k.clone(), v.to_string())),
        );
        pairs.extend(self.form.iter().cloned());
        pairs
    }

    /// URL-encoded representation, form fields included.
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DataValue;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
    use serde_json::Value;

    impl Serialize for DataValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                DataValue::Text(s) => serializer.serialize_str(s),
                DataValue::Number(n) => serializer.serialize_f64(*n),
                DataValue::Bool(b) => serializer.serialize_bool(*b),
                DataValue::Structured(source) => serde_json::from_str::<Value>(source)
                    .map_err(ser::Error::custom)?
                    .serialize(serializer),
            }
        }
    }

    impl<'de> Deserialize<'de> for DataValue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match Value::deserialize(deserializer)? {
                Value::String(s) => Ok(DataValue::Text(s)),
                Value::Bool(b) => Ok(DataValue::Bool(b)),
                Value::Number(n) => n
                    .as_f64()
                    .map(DataValue::Number)
                    .ok_or_else(|| de::Error::custom(format!("number `{n}` is out of range"))),
                structured => Ok(DataValue::Structured(structured.to_string())),
            }
        }
    }
}
