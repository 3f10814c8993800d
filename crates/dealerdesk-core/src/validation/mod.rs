//! Declarative request validation.
//!
//! A [`RuleSet`] is an ordered list of independent field [`Rule`]s. Every rule is
//! evaluated against the request body or query (as a JSON object) and all
//! failures are returned together, so the caller can report each violation at once.

pub mod email;
pub mod endpoints;
pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use email::{is_email, normalize_email};

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every failure produced by a rule set, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Failures recorded against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "validation failed: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Predicate applied to a single field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Present, not null, not an empty string or array.
    Required,
    Email,
    /// String of at least `n` characters.
    MinLength(usize),
    /// String containing at least one letter and at least one digit.
    LetterAndDigit,
    /// 24-character hexadecimal document id.
    ObjectId,
    /// Integer (number or numeric string) within `[min, max]`.
    IntRange { min: i64, max: i64 },
    /// String equal to one of the listed values.
    OneOf(Vec<String>),
}

impl Check {
    fn passes(&self, value: &Value) -> bool {
        match self {
            Check::Required => match value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                Value::Array(a) => !a.is_empty(),
                _ => true,
            },
            Check::Email => value.as_str().is_some_and(is_email),
            Check::MinLength(n) => value.as_str().is_some_and(|s| s.chars().count() >= *n),
            Check::LetterAndDigit => value.as_str().is_some_and(|s| {
                s.chars().any(char::is_alphabetic) && s.chars().any(|c| c.is_ascii_digit())
            }),
            Check::ObjectId => value.as_str().is_some_and(is_object_id),
            Check::IntRange { min, max } => {
                as_int(value).is_some_and(|n| (*min..=*max).contains(&n))
            }
            Check::OneOf(allowed) => value
                .as_str()
                .is_some_and(|s| allowed.iter().any(|a| a == s)),
        }
    }
}

/// Transformation applied to a field after the whole set has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    NormalizeEmail,
    Trim,
}

impl Sanitizer {
    fn apply(&self, value: &Value) -> Option<Value> {
        let s = value.as_str()?;
        match self {
            Sanitizer::NormalizeEmail => normalize_email(s).map(Value::String),
            Sanitizer::Trim => Some(Value::String(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub field: String,
    pub check: Check,
    pub message: String,
    /// Absent (missing or null) values pass instead of failing.
    pub optional: bool,
    pub sanitizer: Option<Sanitizer>,
}

impl Rule {
    pub fn new(field: impl Into<String>, check: Check, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            check,
            message: message.into(),
            optional: false,
            sanitizer: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Evaluate this rule against a request object.
    pub fn evaluate(&self, input: &Value) -> Option<FieldError> {
        let value = input.get(&self.field).unwrap_or(&Value::Null);
        if value.is_null() && self.optional {
            return None;
        }
        if self.check.passes(value) {
            None
        } else {
            Some(FieldError {
                field: self.field.clone(),
                message: self.message.clone(),
            })
        }
    }
}

/// Ordered rules for one endpoint.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn merge(mut self, other: RuleSet) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// All failures for `input`, in rule order. Empty when everything passes.
    pub fn errors(&self, input: &Value) -> ValidationErrors {
        ValidationErrors(self.rules.iter().filter_map(|r| r.evaluate(input)).collect())
    }

    /// Validate `input` and return a sanitised copy of it.
    pub fn validate(&self, input: &Value) -> Result<Value, ValidationErrors> {
        let errors = self.errors(input);
        if !errors.is_empty() {
            tracing::debug!(failures = errors.len(), "request failed validation");
            return Err(errors);
        }

        let mut output = input.clone();
        if let Value::Object(map) = &mut output {
            for rule in &self.rules {
                let Some(sanitizer) = rule.sanitizer else {
                    continue;
                };
                if let Some(slot) = map.get_mut(&rule.field) {
                    if let Some(clean) = sanitizer.apply(slot) {
                        *slot = clean;
                    }
                }
            }
        }
        Ok(output)
    }
}

/// 24 hex digits, the shape of a document id.
pub fn is_object_id(s: &str) -> bool {
    s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Integer value of a JSON number or numeric string. Query parameters arrive as strings.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
