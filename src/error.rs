use rocket::http::Status;
use rocket::serde::{json::Json, Deserialize, Serialize};
use rocket::{catch, Request};

#[derive(Debug)]
pub enum ServerError {
    Database { source: sqlx::Error },
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database { source } => Some(source),
        }
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database { source } => write!(f, "failed to connect to the database: {}", source),
        }
    }
}

impl From<sqlx::Error> for ServerError {
    fn from(source: sqlx::Error) -> Self {
        Self::Database { source }
    }
}

/// Body of every error response produced by a catcher.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: Status, message: String) -> Self {
        Self {
            status_code: status.code,
            error: status.reason_lossy().to_owned(),
            message,
        }
    }
}

#[catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(
        Status::NotFound,
        format!("Route {}:{} not found", request.method(), request.uri().path()),
    ))
}

#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let message = status.reason_lossy().to_owned();
    (status, Json(ErrorBody::new(status, message)))
}
