use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmbMetricsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SmbMetricsError {
    fn from(e: serde_json::Error) -> Self {
        SmbMetricsError::SerializationError(e.to_string())
    }
}
