//! Common result and error types for the Tempo engine.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error (a bug in Tempo), not a
/// problem with user data. Missing delay profiles or overrides are never
/// errors; they degrade to zero or to the geometric fallback.
pub type TempoResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Tempo, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("cache generation overflow");
        assert_eq!(
            format!("{err}"),
            "internal error: cache generation overflow"
        );
    }

    #[test]
    fn err_path() {
        let r: TempoResult<i64> = Err(InternalError::new("bad layer"));
        let err = r.err().unwrap();
        assert_eq!(err.message, "bad layer");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
