//! Stored property values and typed access to them.
//!
//! A [`StringifiedValue`] keeps the raw text of a property next to the
//! [`DataType`] inferred from it.  Typed reads go through [`FromValue`]: the
//! requested type must match the stored tag, otherwise the read fails with
//! [`IniError::TypeMismatch`] rather than coercing.
//!
//! [`Value`] is the tagged union used in the other direction, to turn a Rust
//! value into its canonical text before it is stored.

use serde::Serialize;

use crate::domain::sniff::{infer_with, DataType, SniffMode, TRUE_FORMS};
use crate::error::{IniError, Result};

/// One property value: raw text plus the type inferred from it.
///
/// Immutable once built; overwriting a property replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifiedValue {
    raw: String,
    data_type: DataType,
}

impl StringifiedValue {
    /// Wraps `raw`, inferring its type in [`SniffMode::Compatible`].
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_mode(raw, SniffMode::Compatible)
    }

    /// Wraps `raw`, inferring its type in the given mode.
    pub fn with_mode(raw: impl Into<String>, mode: SniffMode) -> Self {
        let raw = raw.into();
        let data_type = infer_with(&raw, mode);
        Self { raw, data_type }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The raw text, exactly as stored.  Never fails.
    pub fn as_text(&self) -> &str {
        &self.raw
    }

    /// Extracts the value as `T`.
    ///
    /// # Errors
    ///
    /// [`IniError::TypeMismatch`] if the stored tag is not `T`'s type, or
    /// [`IniError::ParseFailure`] if the tag matched but the text does not
    /// convert (overflow, `3.14.15`, a bare sign).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inibuf_core::domain::value::StringifiedValue;
    ///
    /// let port = StringifiedValue::new("8080");
    /// assert_eq!(port.get::<i32>().unwrap(), 8080);
    /// assert!(port.get::<String>().is_err());
    /// ```
    pub fn get<T: FromValue>(&self) -> Result<T> {
        if self.data_type != T::DATA_TYPE {
            return Err(IniError::TypeMismatch {
                expected: T::DATA_TYPE,
                found: self.data_type,
            });
        }
        T::from_raw(&self.raw)
    }

    /// Extracts the value as whichever variant of [`Value`] its tag names.
    ///
    /// # Errors
    ///
    /// [`IniError::ParseFailure`] if a numeric tag's text does not convert.
    pub fn typed(&self) -> Result<Value> {
        match self.data_type {
            DataType::String => Ok(Value::String(self.raw.clone())),
            DataType::Int => self.get::<i64>().map(Value::Int),
            DataType::Float => self.get::<f64>().map(Value::Float),
            DataType::Bool => self.get::<bool>().map(Value::Bool),
            DataType::Empty => Ok(Value::Empty),
        }
    }
}

/// Types that can be extracted from a [`StringifiedValue`].
pub trait FromValue: Sized {
    /// The stored tag this type may be read from.
    const DATA_TYPE: DataType;

    /// Converts raw text whose tag already matched [`Self::DATA_TYPE`].
    fn from_raw(raw: &str) -> Result<Self>;
}

impl FromValue for String {
    const DATA_TYPE: DataType = DataType::String;

    fn from_raw(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

impl FromValue for bool {
    const DATA_TYPE: DataType = DataType::Bool;

    /// Only the true-forms map to `true`; every other Bool-tagged text is `false`.
    fn from_raw(raw: &str) -> Result<Self> {
        Ok(TRUE_FORMS.contains(&raw))
    }
}

macro_rules! impl_from_value_numeric {
    ($tag:expr => $($ty:ty),+) => {
        $(
            impl FromValue for $ty {
                const DATA_TYPE: DataType = $tag;

                fn from_raw(raw: &str) -> Result<Self> {
                    raw.parse::<$ty>()
                        .map_err(|e| IniError::parse_failure(raw, e))
                }
            }
        )+
    };
}

impl_from_value_numeric!(DataType::Int => i32, i64, u32, u64);
impl_from_value_numeric!(DataType::Float => f32, f64);

/// A typed value: the input to `add_value` and the output of
/// [`StringifiedValue::typed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl Value {
    /// The type the stringified form of this value infers back to.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::String(s) => crate::domain::sniff::infer(s),
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::Bool(_) => DataType::Bool,
            Value::Empty => DataType::Empty,
        }
    }

    /// Canonical textual form.
    ///
    /// Integers are plain decimal, floats use `precision` fractional digits,
    /// booleans are lowercase `true`/`false`, strings pass through unchanged.
    ///
    /// # Errors
    ///
    /// [`IniError::UnsupportedType`] for NaN and infinities, which have no
    /// text that would read back as a float.
    pub fn stringify(&self, precision: usize) -> Result<String> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) if f.is_finite() => Ok(format!("{f:.precision$}")),
            Value::Float(f) => Err(IniError::UnsupportedType(format!("non-finite float {f}"))),
            Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            Value::Empty => Ok(String::new()),
        }
    }

    /// Builds a value of the requested type from text.
    ///
    /// # Errors
    ///
    /// [`IniError::ParseFailure`] if `text` does not convert to a number,
    /// [`IniError::TypeMismatch`] for booleans that are not a recognised
    /// spelling, and [`IniError::UnsupportedType`] when asked for
    /// [`DataType::Empty`].
    pub fn parse_as(text: &str, data_type: DataType) -> Result<Value> {
        match data_type {
            DataType::String => Ok(Value::String(text.to_string())),
            DataType::Int => i64::from_raw(text).map(Value::Int),
            DataType::Float => f64::from_raw(text).map(Value::Float),
            DataType::Bool => StringifiedValue::new(text).get::<bool>().map(Value::Bool),
            DataType::Empty => Err(IniError::UnsupportedType(
                "an empty value cannot be requested explicitly".to_string(),
            )),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
