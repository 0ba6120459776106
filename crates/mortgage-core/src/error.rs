use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    /// Input whose arithmetic leaves the 96-bit decimal range.
    pub fn out_of_range(field: &str) -> Self {
        MortgageError::InvalidInput {
            field: field.into(),
            reason: "Amount exceeds the supported numeric range".into(),
        }
    }

    /// Name of the offending input field, if the error is an input rejection.
    pub fn field(&self) -> Option<&str> {
        match self {
            MortgageError::InvalidInput { field, .. } => Some(field.as_str()),
            MortgageError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}
