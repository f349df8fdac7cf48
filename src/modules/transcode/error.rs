use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can sink a transcode request. Cleanup failures are
/// deliberately absent: by the time cleanup runs the response is already
/// determined, so those are only logged.
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("no primary video clip provided")]
    MissingPrimaryClip,

    #[error("unsupported media type {0}, expected video/*")]
    UnsupportedMediaType(String),

    #[error("failed to stage uploaded files: {0}")]
    Staging(String),

    #[error("failed to launch transcoder {program}: {source}")]
    TranscoderSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transcoder failed ({status}): {detail}")]
    TranscoderExit { status: String, detail: String },

    #[error("failed to read transcoded output: {0}")]
    Readback(#[source] std::io::Error),
}

impl TranscodeError {
    /// Client errors for bad submissions, server errors for everything past
    /// validation.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranscodeError::MissingPrimaryClip | TranscodeError::UnsupportedMediaType(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
