use thiserror::Error;

/// Top-level error type for the graph marker.
#[derive(Debug, Error)]
pub enum GraphmarkError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Answer(#[from] AnswerError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors raised while parsing specification text.
///
/// A specification that fails to parse is unusable: marking never skips a clause it could not
/// understand.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("unknown feature in specification line: {0}")]
    UnknownFeature(String),

    #[error("invalid {tag} clause `{data}`: {reason}")]
    InvalidClause {
        tag: &'static str,
        data: String,
        reason: String,
    },

    #[error("{0} is not a valid sector")]
    UnknownSector(String),

    #[error("invalid line selector `{0}`")]
    InvalidLineSelector(String),
}

impl SpecError {
    pub(crate) fn invalid(tag: &'static str, data: &str, reason: impl Into<String>) -> Self {
        Self::InvalidClause {
            tag,
            data: data.trim().to_owned(),
            reason: reason.into(),
        }
    }
}

/// Errors related to the shape of an incoming request.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("unknown answer type {0}")]
    UnknownAnswerType(String),

    #[error("malformed answer: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors related to marker settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("setting {name} = {value} must be positive")]
    NotPositive { name: &'static str, value: f64 },

    #[error("slope window must contain at least two points, got {0}")]
    SlopeWindow(usize),

    #[error("malformed settings: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Convenience type alias for results using [`GraphmarkError`].
pub type Result<T> = std::result::Result<T, GraphmarkError>;
