//! Attribute values.
//!
//! Attributes are arbitrary key/value annotations mirrored from a definition
//! onto its stored record. The value type is deliberately narrow: a scalar
//! or a flat list of scalars. Nested structure is rejected eagerly at the
//! JSON boundary instead of failing silently per-field later.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

/// Map of attribute keys to values, as declared on a definition or stored
/// on a record. Ordered so that iteration (and therefore write and log
/// order) is deterministic.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// Errors produced when converting JSON into an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttrValueError {
    /// `null` carries no usable value.
    #[error("null is not a valid attribute value")]
    Null,

    /// Objects (maps) are not representable as attribute values.
    #[error("objects are not valid attribute values")]
    Object,

    /// Lists may only contain scalars, never further lists or objects.
    #[error("lists may only contain scalar values")]
    NestedList,
}

/// A single scalar attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarValue {
    /// Converts a JSON value into a scalar, rejecting anything non-scalar.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, AttrValueError> {
        match value {
            serde_json::Value::String(s) => Ok(Self::Str(s.clone())),
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else {
                    // u64 beyond i64::MAX or a fractional number.
                    Ok(Self::Float(n.as_f64().unwrap_or_default()))
                }
            }
            serde_json::Value::Null => Err(AttrValueError::Null),
            serde_json::Value::Array(_) => Err(AttrValueError::NestedList),
            serde_json::Value::Object(_) => Err(AttrValueError::Object),
        }
    }

    /// Returns the JSON representation of this scalar.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Str(s) => serde_json::Value::from(s.clone()),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Value::from(*f),
            Self::Bool(b) => serde_json::Value::from(*b),
        }
    }

    /// The canonical string form used by loose equality. Floats use their
    /// shortest display form (`1.0` renders as `"1"`), booleans render as
    /// `"1"` / `"0"`.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
        }
    }

    /// Numeric interpretation, if any. Strings participate when they parse
    /// as a number in full.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Str(s) => s.trim().parse::<f64>().ok(),
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    /// Loose equality across representations: numeric comparison when both
    /// sides read as numbers, canonical-string comparison otherwise.
    ///
    /// This intentionally tolerates store-level type normalization
    /// (`"1"` equals `1`) at the cost of masking some genuine changes:
    /// `"0"`, `0`, `0.0` and `false` are all mutually equal under this
    /// comparison. The diff evaluator relies on exactly this behavior to
    /// avoid spurious rewrites.
    #[must_use]
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self.canonical() == other.canonical(),
        }
    }

    /// Truthiness in the store's sense: non-zero numbers, `true`, and any
    /// string other than `""`, `"0"` and `"false"`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Bool(b) => *b,
        }
    }

    /// Borrows the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// An attribute value: a scalar or a flat list of scalars.
///
/// Derived equality is strict (same variant, same value); reconciliation
/// uses [`AttrValue::loosely_eq`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Scalar(ScalarValue),
    List(Vec<ScalarValue>),
}

impl AttrValue {
    /// Converts a JSON value, rejecting nulls, objects and nested lists.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, AttrValueError> {
        match value {
            serde_json::Value::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    match ScalarValue::from_json(item) {
                        Ok(scalar) => list.push(scalar),
                        Err(_) => return Err(AttrValueError::NestedList),
                    }
                }
                Ok(Self::List(list))
            }
            other => ScalarValue::from_json(other).map(Self::Scalar),
        }
    }

    /// Returns the JSON representation of this value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Scalar(s) => s.to_json(),
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(ScalarValue::to_json).collect())
            }
        }
    }

    /// The scalar inside, if this is not a list.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Loose equality: scalars compare via [`ScalarValue::loosely_eq`],
    /// lists compare element-wise with the same rule. A scalar never
    /// equals a list.
    #[must_use]
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a.loosely_eq(b),
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_eq(y))
            }
            _ => false,
        }
    }

    /// Truthiness: a scalar's truthiness; lists are never truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_truthy(),
            Self::List(_) => false,
        }
    }
}

impl From<ScalarValue> for AttrValue {
    fn from(s: ScalarValue) -> Self {
        Self::Scalar(s)
    }
}

impl From<Vec<ScalarValue>> for AttrValue {
    fn from(list: Vec<ScalarValue>) -> Self {
        Self::List(list)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Scalar(ScalarValue::from(s))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Scalar(ScalarValue::from(s))
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        Self::Scalar(ScalarValue::from(i))
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        Self::Scalar(ScalarValue::from(f))
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Scalar(ScalarValue::from(b))
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(v) => serializer.serialize_str(v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
        }
    }
}

impl<'de> Deserialize<'de> for ScalarValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(D::Error::custom)
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(D::Error::custom)
    }
}
