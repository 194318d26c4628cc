use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use liftlog_domain::{CreateError, DeleteError, ReadError, UpdateError, ValidationError};
use serde::Serialize;
use tracing::error;

/// Error surfaced to the client: a status code and a safe message. Anything
/// unexpected is logged server-side and mapped to a generic 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "authentication required".to_string(),
        }
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "insufficient permissions".to_string(),
        }
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "not found".to_string(),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<ReadError> for ApiError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::NotFound => ApiError::not_found(),
            err => {
                error!("read failed: {err}");
                ApiError::internal()
            }
        }
    }
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::NotFound => ApiError::not_found(),
            CreateError::Conflict(message) => ApiError::bad_request(message),
            CreateError::Validation(err) => ApiError::bad_request(err.to_string()),
            err => {
                error!("create failed: {err}");
                ApiError::internal()
            }
        }
    }
}

impl From<UpdateError> for ApiError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::NotFound => ApiError::not_found(),
            UpdateError::Forbidden => ApiError::forbidden(),
            UpdateError::Conflict(message) => ApiError::bad_request(message),
            UpdateError::Validation(err) => ApiError::bad_request(err.to_string()),
            err => {
                error!("update failed: {err}");
                ApiError::internal()
            }
        }
    }
}

impl From<DeleteError> for ApiError {
    fn from(err: DeleteError) -> Self {
        match err {
            DeleteError::NotFound => ApiError::not_found(),
            DeleteError::Forbidden => ApiError::forbidden(),
            DeleteError::Conflict(message) => ApiError::bad_request(message),
            err => {
                error!("delete failed: {err}");
                ApiError::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use liftlog_domain::StorageError;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ApiError::from(ReadError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(UpdateError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(CreateError::Conflict("duplicate".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DeleteError::Storage(StorageError::Other("boom".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unexpected_errors_use_generic_message() {
        let err = ApiError::from(ReadError::Storage(StorageError::Other(
            "connection refused to db at 10.0.0.1".into(),
        )));
        assert_eq!(err.message, "internal server error");
    }
}
