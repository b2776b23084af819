use super::Value;
use crate::{Error, Result};

use std::fmt;

/// A record identifier.
///
/// Generated keys are integers; a root type declaring its own primary key
/// may use text keys instead.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Id {
    Int(i64),
    String(String),
}

impl Id {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Id::Int(v) => Some(*v),
            Id::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Id::String(v) => Some(v),
            Id::Int(_) => None,
        }
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(v) => fmt::Debug::fmt(v, f),
            Id::String(v) => fmt::Debug::fmt(v, f),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(v) => fmt::Display::fmt(v, f),
            Id::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Int(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Int(value.into())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::String(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::String(value.to_string())
    }
}

impl From<Id> for Value {
    fn from(value: Id) -> Self {
        match value {
            Id::Int(v) => Value::I64(v),
            Id::String(v) => Value::String(v),
        }
    }
}

impl From<&Id> for Value {
    fn from(value: &Id) -> Self {
        value.clone().into()
    }
}

impl TryFrom<&Value> for Id {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(Id::Int(*v)),
            Value::String(v) => Ok(Id::String(v.clone())),
            _ => Err(Error::invalid_result(format!(
                "cannot use {value:?} as an identifier"
            ))),
        }
    }
}
