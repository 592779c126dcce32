use http::StatusCode;
use serde::Serialize;

/// Domain error that knows how it should look on the wire
///
/// Feature crates implement this for their error enums; handlers render
/// it through [`ErrorBody`] so domain code never touches axum.
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    /// Machine-readable category, e.g. `not_found_error`
    fn error_type(&self) -> &str;

    /// Text safe to show a client; must not carry upstream details
    fn client_message(&self) -> String;
}

/// JSON error payload: `{"error": {"message": ..., "type": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorBody {
    pub fn of(error: &(impl HttpError + ?Sized)) -> Self {
        Self {
            error: ErrorDetail {
                message: error.client_message(),
                kind: error.error_type().to_owned(),
            },
        }
    }
}
