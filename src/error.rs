use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use serde_json::json;
use thiserror::Error as ThisError;

/// Error taxonomy of the booking core. Each variant maps to a distinct HTTP
/// status and JSON body so callers can tell the kinds apart.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A required field is missing or malformed. Detected before any write.
    #[error("{0}")]
    InvalidInput(String),
    /// The referenced event does not exist.
    #[error("Event not found")]
    NotFound,
    /// Admitting the request would push booked seats past the event capacity.
    #[error("Not enough seats available")]
    CapacityExceeded,
    /// The backing store failed; not retried here, callers may retry.
    #[error("storage failure: {0}")]
    Storage(#[from] mongodb::error::Error),
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (status, message) = match &self {
            Error::InvalidInput(msg) => (Status::BadRequest, msg.clone()),
            Error::NotFound => (Status::NotFound, self.to_string()),
            Error::CapacityExceeded => (Status::BadRequest, self.to_string()),
            Error::Storage(err) => {
                tracing::error!("storage failure: {err}");
                (Status::InternalServerError, "Database error".to_string())
            }
        };

        let body = Json(json!({ "error": message }));
        Response::build_from(body.respond_to(req)?).status(status).ok()
    }
}
