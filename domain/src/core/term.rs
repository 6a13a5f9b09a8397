//! Term value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The subject whose public sentiment is evaluated (Value Object)
///
/// A term is substituted into every phrase template before the
/// composed queries are sent to the search backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Term {
    value: String,
}

impl Term {
    /// Create a new term
    ///
    /// Surrounding whitespace is trimmed. Returns [`DomainError::EmptyTerm`]
    /// if nothing is left.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTerm);
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Get the term text
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume and return the inner text
    pub fn into_string(self) -> String {
        self.value
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for Term {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Term::new(value)
    }
}

impl TryFrom<&str> for Term {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Term::new(value)
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.value
    }
}
