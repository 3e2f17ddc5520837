//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Unknown actor role: {0}")]
    InvalidRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_topic_display() {
        let error = DomainError::InvalidTopic("topic cannot be empty".to_string());
        assert_eq!(error.to_string(), "Invalid topic: topic cannot be empty");
    }

    #[test]
    fn test_invalid_role_display() {
        let error = DomainError::InvalidRole("narrator".to_string());
        assert_eq!(error.to_string(), "Unknown actor role: narrator");
    }
}
