//! Session-level error types.

/// Errors raised by editor session operations.
///
/// `UndefinedVariables` is the save/publish gate: it is raised locally,
/// before any network call, and carries the count so the surfaced message
/// tells the user exactly how many variables still need configuring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{count} undefined variable(s) must be defined before saving or publishing")]
    UndefinedVariables { count: usize },

    #[error("no variable named '{0}'")]
    UnknownVariable(String),

    #[error("a variable named '{0}' already exists")]
    DuplicateVariable(String),

    #[error("'{0}' is not a valid variable name")]
    InvalidName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_variables_message_names_count() {
        let err = SessionError::UndefinedVariables { count: 3 };
        assert_eq!(
            err.to_string(),
            "3 undefined variable(s) must be defined before saving or publishing"
        );
    }
}
