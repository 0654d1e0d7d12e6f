use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    /// The worker running the turn panicked or was shut down
    #[error("Unable to process turn: {0}")]
    UnableToProcessTurn(String),
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("{}", self);

        HttpResponse::build(self.status_code()).finish()
    }
}
