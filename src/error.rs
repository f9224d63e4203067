use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A field the analysis result must carry is absent. Holds the field path,
    /// e.g. `flaggedClauses[2].severity`.
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Font data could not be parsed or the requested face is not loaded.
    #[error("text measurement failed: {0}")]
    Measurement(String),

    #[error("canvas error: {0}")]
    Canvas(String),

    #[error("invalid theme: {0}")]
    InvalidTheme(String),

    #[error("malformed analysis JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
