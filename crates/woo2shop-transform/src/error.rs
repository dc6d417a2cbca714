use thiserror::Error;

/// Record-level validation failure. The batch processor catches this, counts
/// the record as failed, and moves on; it never aborts the batch.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing mandatory field: {field}")]
    MissingField { field: &'static str },

    #[error("malformed {what} payload: {message}")]
    MalformedPayload { what: &'static str, message: String },
}

impl ValidationError {
    pub(crate) fn payload(what: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            what,
            message: message.into(),
        }
    }
}
