use attendtrack_collab::{AuthError, CourseError, StorageError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{resource}:{identifier} not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Invalid(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Session does not exist")]
    Unauthorized,
    #[error("Unknown internal error: {0}")]
    Unknown(String),
}

impl ServerError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Invalid(_) | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let Self::Unknown(message) = &self {
            error!("Request failed: {}", message);
        }

        (self.as_status_code(), self.to_string()).into_response()
    }
}

impl From<AuthError> for ServerError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::Invalid(e) => Self::Invalid(e.to_string()),
            AuthError::AlreadyRegistered => Self::Conflict(value.to_string()),
            // Unknown roll numbers look the same as wrong passwords from the outside
            AuthError::NotRegistered | AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::NoSession => Self::Unauthorized,
            e => Self::Unknown(e.to_string()),
        }
    }
}

impl From<CourseError> for ServerError {
    fn from(value: CourseError) -> Self {
        match value {
            CourseError::NotFound(id) => Self::NotFound {
                resource: "course",
                identifier: id,
            },
            CourseError::AlreadyMarked { .. } => Self::Conflict(value.to_string()),
            CourseError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(value: StorageError) -> Self {
        Self::Unknown(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use attendtrack_core::ValidationError;

    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (
                ServerError::from(AuthError::InvalidCredentials),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::from(AuthError::NotRegistered),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::from(AuthError::AlreadyRegistered),
                StatusCode::CONFLICT,
            ),
            (
                ServerError::from(AuthError::Invalid(ValidationError::InvalidSection)),
                StatusCode::BAD_REQUEST,
            ),
            (ServerError::from(AuthError::NoSession), StatusCode::UNAUTHORIZED),
            (
                ServerError::from(CourseError::NotFound("1".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::from(CourseError::AlreadyMarked {
                    course_id: "1".to_string(),
                    date: "2025-03-14".to_string(),
                }),
                StatusCode::CONFLICT,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
