use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Method, Response, StatusCode};
use thiserror::Error;
use tokio::task::JoinError;

/// Failure of a batch run. Sorting and the simulated delay cannot fail on
/// their own, so the only source is a unit of work that never completed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("unit of work did not complete ({completed} finished before it): {source}")]
    TaskFailed {
        completed: usize,
        #[source]
        source: JoinError,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON payload: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("No route for {0}")]
    NotFound(String),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("Batch processing failed: {0}")]
    Batch(#[from] BatchError),

    #[error("Failed to encode response: {0}")]
    Encode(serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedInput(_) | AppError::BodyRead(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Batch(_) | AppError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text response carrying the error message.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let status = self.status();
        let mut resp = Response::new(Full::new(Bytes::from(self.to_string())));
        *resp.status_mut() = status;
        let headers = resp.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        if status == StatusCode::METHOD_NOT_ALLOWED {
            headers.insert(ALLOW, HeaderValue::from_static("POST"));
        }
        resp
    }
}
