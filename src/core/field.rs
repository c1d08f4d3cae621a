//! Field value types, descriptors and format validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// A scalar field value held by a [`Record`](crate::core::Record)
///
/// Serialized untagged so that a record maps one-to-one onto a flat JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number, rejecting NaN
    ///
    /// Only `Number` values qualify; numeric-looking strings do not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The string form used for search, category equality and text sorting
    ///
    /// Numbers use their shortest decimal form (`10`, not `10.0`). `Null` has none.
    pub fn natural_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Null => None,
            FieldValue::String(s) => Some(Cow::Borrowed(s)),
            FieldValue::Boolean(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            FieldValue::Number(n) => Some(Cow::Owned(n.to_string())),
        }
    }

    /// Name of the variant, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// How a field is compared by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text: substring search, lexicographic sort
    Text,
    /// Numbers: range filters, numeric sort
    Numeric,
    /// Discrete labels: exact-match filter, facet counts
    Categorical,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Numeric => write!(f, "numeric"),
            FieldKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Names one field of a collection and how it is compared and validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    pub kind: FieldKind,

    /// Whether free-text search looks at this field
    #[serde(default)]
    pub searchable: bool,

    /// Whether mutations must provide a non-null value
    #[serde(default)]
    pub required: bool,

    /// Optional format checked on mutation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            searchable: false,
            required: false,
            format: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Numeric)
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Categorical)
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Field format validators applied to string values on mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
    Email,
    Uuid,
    Url,
    Phone,
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        match self {
            FieldFormat::Email => Self::is_valid_email(string_value),
            FieldFormat::Uuid => Uuid::parse_str(string_value).is_ok(),
            FieldFormat::Url => Self::is_valid_url(string_value),
            FieldFormat::Phone => Self::is_valid_phone(string_value),
        }
    }

    /// Human-readable description used in validation messages
    pub fn describe(&self) -> &'static str {
        match self {
            FieldFormat::Email => "a valid email address",
            FieldFormat::Uuid => "a valid UUID",
            FieldFormat::Url => "an http(s) URL",
            FieldFormat::Phone => "a phone number of 8 to 15 digits",
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
        EMAIL_REGEX
            .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok())
            .as_ref()
            .is_some_and(|regex| regex.is_match(email))
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
        URL_REGEX
            .get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").ok())
            .as_ref()
            .is_some_and(|regex| regex.is_match(url))
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
        PHONE_REGEX
            // At least 8 digits, max 15 (E.164)
            .get_or_init(|| Regex::new(r"^\+?[1-9]\d{7,14}$").ok())
            .as_ref()
            .is_some_and(|regex| regex.is_match(phone))
    }
}
