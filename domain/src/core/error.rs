//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Term cannot be empty")]
    EmptyTerm,

    #[error("Template set must contain at least one template")]
    EmptyTemplateSet,

    #[error("Template '{0}' has no %v slot for the term")]
    MissingSlot(String),

    #[error("Template '{template}' has {count} %v slots, expected exactly one")]
    ExtraSlots { template: String, count: usize },
}

impl DomainError {
    /// Check if this error describes a malformed template
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyTemplateSet
                | DomainError::MissingSlot(_)
                | DomainError::ExtraSlots { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_slots_display() {
        let error = DomainError::ExtraSlots {
            template: "%v vs %v".to_string(),
            count: 2,
        };
        assert_eq!(
            error.to_string(),
            "Template '%v vs %v' has 2 %v slots, expected exactly one"
        );
    }

    #[test]
    fn test_is_template_error() {
        assert!(DomainError::EmptyTemplateSet.is_template_error());
        assert!(DomainError::MissingSlot("rules".to_string()).is_template_error());
        assert!(!DomainError::EmptyTerm.is_template_error());
    }
}
