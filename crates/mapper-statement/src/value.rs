//! Bindable values and their parameter types.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatementError};

/// A value that can be bound to a statement placeholder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", *b as u8),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from!(
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Str,
);

/// Unsigned integers that may not fit an `i64`; those bind as their decimal
/// string.
macro_rules! value_from_wide {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    i64::try_from(v).map_or_else(|_| Value::Str(v.to_string()), Value::Int)
                }
            }
        )*
    };
}

value_from_wide!(u64, usize);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Parameter type tag attached to every bound value.
///
/// Discriminants follow the PDO `PARAM_*` constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Null = 0,
    Int = 1,
    Str = 2,
    Bool = 5,
}

impl ParamType {
    /// Infers the type of a value: null, bool and integer map to their own
    /// tag, everything else binds as a string.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Null => ParamType::Null,
            Value::Bool(_) => ParamType::Bool,
            Value::Int(_) => ParamType::Int,
            Value::Float(_) | Value::Str(_) => ParamType::Str,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Null => "null",
            ParamType::Int => "int",
            ParamType::Str => "str",
            ParamType::Bool => "bool",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ParamType {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "null" => Ok(ParamType::Null),
            "int" | "integer" => Ok(ParamType::Int),
            "str" | "string" => Ok(ParamType::Str),
            "bool" | "boolean" => Ok(ParamType::Bool),
            _ => Err(StatementError::UnknownParamType(s.to_string())),
        }
    }
}

impl TryFrom<i64> for ParamType {
    type Error = StatementError;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(ParamType::Null),
            1 => Ok(ParamType::Int),
            2 => Ok(ParamType::Str),
            5 => Ok(ParamType::Bool),
            other => Err(StatementError::UnknownParamType(other.to_string())),
        }
    }
}

/// A bound value together with its resolved type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub value: Value,
    pub param_type: ParamType,
}

impl Param {
    pub fn new(value: impl Into<Value>, param_type: Option<ParamType>) -> Self {
        let value = value.into();
        let param_type = param_type.unwrap_or_else(|| ParamType::infer(&value));
        Self { value, param_type }
    }
}
