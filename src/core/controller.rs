use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::log::info;
use crate::core::command::CommandError;

// The client-facing error contract: four kinds, fixed messages, JSON envelope.
// Everything richer stays in CommandError/LibraryError and the logs.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum ServerError {
    BadRequest,
    NotFound,
    Unprocessable,
    MethodNotAllowed,
}

impl ServerError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub(crate) fn message(&self) -> &'static str {
        match self {
            ServerError::BadRequest => "You entered a bad request",
            ServerError::NotFound => "Resource not found",
            ServerError::Unprocessable => "Unprocessable Entity",
            ServerError::MethodNotAllowed => "Method Not Allowed",
        }
    }

    // legacy envelope: success is the string "false" on errors, boolean true on success
    pub(crate) fn body(&self) -> serde_json::Value {
        json!({
            "success": "false",
            "error": self.status().as_u16(),
            "message": self.message(),
        })
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    info!("rejecting malformed request body {:?}", err);
    ServerError::BadRequest
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        info!("translating command failure {:?}", err);
        match err {
            CommandError::Validation { .. } => ServerError::BadRequest,
            CommandError::NotFound { .. } => ServerError::NotFound,
            CommandError::Database { .. } => ServerError::Unprocessable,
            CommandError::DuplicateKey { .. } => ServerError::Unprocessable,
            CommandError::Runtime { .. } => ServerError::Unprocessable,
            CommandError::Serialization { .. } => ServerError::Unprocessable,
        }
    }
}

pub(crate) fn append_cors_headers(headers: &mut HeaderMap) {
    headers.insert("Access-Control-Allow-Headers",
                   HeaderValue::from_static("Content-Type,Authorization"));
    headers.insert("Access-Control-Allow-Methods",
                   HeaderValue::from_static("GET,PUT,POST,DELETE,OPTIONS"));
}

// Router-level layer so every response carries the CORS headers on the way out,
// error responses and fallbacks included.
pub(crate) async fn cors_headers<B>(req: Request<B>, next: Next<B>) -> Response {
    let mut response = next.run(req).await;
    append_cors_headers(response.headers_mut());
    response
}
