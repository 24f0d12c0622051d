//! Dynamically typed values, used for instance fields, method arguments and event arguments

use super::*;
use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Scalar(f64),
    Text(String),
    Entity(EntityKey),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Read the value as T, failing if it holds something else
    pub fn decode<T: FromValue>(&self) -> CoreResult<T> {
        T::from_value(self)
    }

    /// Numbers of either kind as a float
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lua-like truthiness: only null and false are false
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Scalar(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Entity(key) => write!(f, "{:?}", key),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Scalar(f64::from(value))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<EntityKey> for Value {
    fn from(entity: EntityKey) -> Self {
        if entity.is_null() {
            Value::Null
        } else {
            Value::Entity(entity)
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vec: Vec<T>) -> Self {
        Value::Array(vec.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A type a Value can be read as
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> CoreResult<Self>;
}

fn mismatch<T>(value: &Value, what: &str) -> CoreResult<T> {
    Err(CoreError::BadValue(format!("{:?} is not {}", value, what)))
}

impl FromValue for Value {
    fn from_value(value: &Value) -> CoreResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> CoreResult<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            _ => mismatch(value, "a bool"),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> CoreResult<Self> {
        value
            .as_number()
            .map_or_else(|| mismatch(value, "a number"), Ok)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> CoreResult<Self> {
        match value {
            Value::Integer(v) => Ok(*v),
            Value::Scalar(v) => Err(CoreError::BadValue(format!(
                "{} is a scalar, not an integer",
                v
            ))),
            _ => mismatch(value, "a number"),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> CoreResult<Self> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            _ => mismatch(value, "a string"),
        }
    }
}

impl FromValue for EntityKey {
    fn from_value(value: &Value) -> CoreResult<Self> {
        match value {
            Value::Entity(key) => Ok(*key),
            Value::Null => Ok(EntityKey::null()),
            _ => mismatch(value, "an entity"),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> CoreResult<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            _ => mismatch(value, "an array"),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> CoreResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}
