use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Which lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Cgpa,
    Syllabus,
}

impl LookupKind {
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Self::Cgpa => "CGPA not found",
            Self::Syllabus => "Syllabus not found",
        }
    }
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Unknown intent")]
    UnknownIntent,

    #[error("{}", .0.not_found_message())]
    NotFound(LookupKind),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("store: {0}")]
    Store(#[from] anyhow::Error),
}

impl WebhookError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::UnknownIntent => 400,
            Self::NotFound(_) => 404,
            Self::MalformedRequest(_) => 422,
            Self::Store(_) => 500,
        }
    }

    /// Text placed in the `detail` field of the error body.
    ///
    /// Store failures never leak their cause to the caller.
    pub fn detail(&self) -> String {
        match self {
            Self::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if let Self::Store(ref cause) = self {
            tracing::error!("Store failure while serving webhook: {cause:#}");
        }

        (
            status,
            Json(ErrorBody {
                detail: self.detail(),
            }),
        )
            .into_response()
    }
}
