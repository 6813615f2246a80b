use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::JsonResponse;

#[derive(Debug)]
pub enum RequestError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Conflict(&'static str),
    ServerError,
    DatabaseError(sqlx::Error),
}

#[derive(serde::Serialize)]
pub struct RequestErrorJson {
    message: String,
}

impl RequestErrorJson {
    pub fn new(message: &str) -> RequestErrorJson {
        RequestErrorJson {
            message: message.to_string(),
        }
    }
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl From<crate::validation::ValidationError> for RequestError {
    fn from(value: crate::validation::ValidationError) -> Self {
        Self::BadRequest(value.message())
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJson> {
        let (status_code, json) = match self {
            RequestError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, RequestErrorJson::new(message))
            }
            RequestError::NotFound(message) => {
                (StatusCode::NOT_FOUND, RequestErrorJson::new(message))
            }
            RequestError::Conflict(message) => {
                (StatusCode::CONFLICT, RequestErrorJson::new(message))
            }
            RequestError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                RequestErrorJson::new("Internal Server Error"),
            ),
            // A write that trips a foreign key references a missing row,
            // which the API reports the same way as any other missing row
            RequestError::DatabaseError(sqlx::Error::Database(e))
                if e.message().contains("FOREIGN KEY constraint failed") =>
            {
                (StatusCode::NOT_FOUND, RequestErrorJson::new("Not Found"))
            }
            RequestError::DatabaseError(e) => {
                tracing::error!(error = %e, "unhandled database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RequestErrorJson::new("Internal Server Error"),
                )
            }
        };
        (status_code, Json(json))
    }
}
