//! Type inference from the lexical shape of a raw value.
//!
//! A value is classified exactly once, when it enters the store, and the
//! resulting [`DataType`] never changes afterwards.  The classification is a
//! pure function of the text:
//!
//! 1. Blank text is [`DataType::Empty`].
//! 2. `true` / `false` in lowercase, UPPERCASE or Titlecase is [`DataType::Bool`].
//!    Other casings (`tRuE`) fall through.
//! 3. An optional leading `+`/`-` followed only by digits and `.` is
//!    [`DataType::Int`] (no `.`) or [`DataType::Float`] (at least one `.`).
//!    Anything else is [`DataType::String`].
//!
//! # Compatibility quirks
//!
//! [`SniffMode::Compatible`] keeps two quirks of the original file format
//! reader: a bare sign (`-`) counts as `Int`, and `3.14.15` counts as `Float`.
//! Such values are still rejected later, when a typed read tries to convert
//! them.  [`SniffMode::Strict`] demands at least one digit and at most one `.`
//! and classifies everything else as `String`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::IniError;

/// The semantic type inferred for a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Int,
    Float,
    Bool,
    Empty,
}

impl DataType {
    /// Lowercase name used in messages and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::Empty => "empty",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = IniError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(DataType::String),
            "int" | "integer" => Ok(DataType::Int),
            "float" => Ok(DataType::Float),
            "bool" | "boolean" => Ok(DataType::Bool),
            "empty" => Ok(DataType::Empty),
            other => Err(IniError::UnsupportedType(other.to_string())),
        }
    }
}

/// How strictly numeric text is validated during inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SniffMode {
    /// Character-set check only (bare sign is `Int`, `1.2.3` is `Float`).
    #[default]
    Compatible,
    /// Requires a digit, and at most one `.` for floats.
    Strict,
}

/// Spellings recognised as booleans.
pub(crate) const TRUE_FORMS: [&str; 3] = ["true", "TRUE", "True"];
const FALSE_FORMS: [&str; 3] = ["false", "FALSE", "False"];

/// Infers the type of `raw` using [`SniffMode::Compatible`].
///
/// # Examples
///
/// ```rust
/// use inibuf_core::domain::sniff::{infer, DataType};
///
/// assert_eq!(infer("8080"), DataType::Int);
/// assert_eq!(infer("-"), DataType::Int);
/// assert_eq!(infer("3.14.15"), DataType::Float);
/// assert_eq!(infer("localhost"), DataType::String);
/// ```
pub fn infer(raw: &str) -> DataType {
    infer_with(raw, SniffMode::Compatible)
}

/// Infers the type of `raw` under the given [`SniffMode`].
pub fn infer_with(raw: &str, mode: SniffMode) -> DataType {
    if raw.trim().is_empty() {
        return DataType::Empty;
    }

    if TRUE_FORMS.contains(&raw) || FALSE_FORMS.contains(&raw) {
        return DataType::Bool;
    }

    let unsigned = raw
        .strip_prefix('-')
        .or_else(|| raw.strip_prefix('+'))
        .unwrap_or(raw);

    if !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return DataType::String;
    }

    let dots = unsigned.matches('.').count();
    if mode == SniffMode::Strict {
        let has_digit = unsigned.chars().any(|c| c.is_ascii_digit());
        if !has_digit || dots > 1 {
            return DataType::String;
        }
    }

    if dots == 0 {
        DataType::Int
    } else {
        DataType::Float
    }
}
