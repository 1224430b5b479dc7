use axum::http::StatusCode;
use axum_helpers::ApiError;
use axum_helpers::errors::messages;
use mongodb::bson::oid;
use std::error::Error as StdError;
use strum::Display;
use thiserror::Error;

/// Boxed error from the backing store or anything else below the repository
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors surfaced by an [`crate::repository::ItemRepository`]
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("item not found")]
    NotFound,

    #[error("invalid hexadecimal representation of an ObjectID")]
    InvalidHexId(#[source] oid::Error),

    #[error("generic repository error")]
    Generic(#[source] BoxError),
}

impl RepositoryError {
    pub fn generic(cause: impl Into<BoxError>) -> Self {
        Self::Generic(cause.into())
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidHexId(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Generic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<oid::Error> for RepositoryError {
    fn from(err: oid::Error) -> Self {
        Self::InvalidHexId(err)
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Layer an error was first classified in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorSource {
    Repository,
    Service,
}

/// Service-level error: cause, message, origin layer and HTTP status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub cause: Option<String>,
    pub message: String,
    pub origin: ErrorSource,
    pub http: StatusCode,
}

impl ServiceError {
    pub fn empty_item() -> Self {
        Self {
            cause: None,
            message: "item is empty".to_string(),
            origin: ErrorSource::Service,
            http: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(cause: impl Into<String>) -> Self {
        Self {
            cause: Some(cause.into()),
            message: messages::INTERNAL_SERVER_ERROR.to_string(),
            origin: ErrorSource::Service,
            http: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify an arbitrary error.
    ///
    /// A service error is returned unchanged, a repository error is translated, and
    /// anything else becomes an internal error.
    pub fn classify(err: BoxError) -> Self {
        let err = match err.downcast::<ServiceError>() {
            Ok(service) => return *service,
            Err(other) => other,
        };
        match err.downcast::<RepositoryError>() {
            Ok(repository) => Self::from(*repository),
            Err(other) => Self::internal(describe(other.as_ref())),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        let http = err.http_status();
        let message = if http == StatusCode::INTERNAL_SERVER_ERROR {
            messages::INTERNAL_SERVER_ERROR.to_string()
        } else {
            err.to_string()
        };

        Self {
            cause: Some(describe(&err)),
            message,
            origin: ErrorSource::Repository,
            http,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::new(err.http, err.message, err.cause)
    }
}

/// Error message followed by its source chain, `outer: inner: root`
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn invalid_hex() -> RepositoryError {
        ObjectId::parse_str("not-hex").unwrap_err().into()
    }

    #[test]
    fn test_repository_error_statuses() {
        assert_eq!(RepositoryError::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(invalid_hex().http_status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            RepositoryError::generic("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_keeps_message_and_status() {
        let err = ServiceError::from(RepositoryError::NotFound);
        assert_eq!(err.http, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "item not found");
        assert_eq!(err.origin, ErrorSource::Repository);
    }

    #[test]
    fn test_invalid_hex_is_unprocessable() {
        let err = ServiceError::from(invalid_hex());
        assert_eq!(err.http, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.message,
            "invalid hexadecimal representation of an ObjectID"
        );
    }

    #[test]
    fn test_generic_becomes_internal_regardless_of_cause_text() {
        for text in ["connection refused", "item not found", "timeout"] {
            let err = ServiceError::from(RepositoryError::generic(text));
            assert_eq!(err.http, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.message, "internal server error");
            assert_eq!(
                err.cause.as_deref(),
                Some(format!("generic repository error: {text}").as_str())
            );
        }
    }

    #[test]
    fn test_classify_passes_service_error_through() {
        let original = ServiceError::empty_item();
        let classified = ServiceError::classify(Box::new(original.clone()));
        assert_eq!(classified, original);
    }

    #[test]
    fn test_classify_translates_repository_error() {
        let classified = ServiceError::classify(Box::new(RepositoryError::NotFound));
        assert_eq!(classified.http, StatusCode::NOT_FOUND);
        assert_eq!(classified.origin, ErrorSource::Repository);
    }

    #[test]
    fn test_classify_wraps_unknown_error() {
        let classified = ServiceError::classify("socket closed".into());
        assert_eq!(classified.http, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(classified.message, "internal server error");
        assert_eq!(classified.origin, ErrorSource::Service);
        assert_eq!(classified.cause.as_deref(), Some("socket closed"));
    }

    #[test]
    fn test_service_error_to_api_error() {
        let api: ApiError = ServiceError::empty_item().into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "item is empty");
    }

    #[test]
    fn test_error_source_display() {
        assert_eq!(ErrorSource::Repository.to_string(), "repository");
        assert_eq!(ErrorSource::Service.to_string(), "service");
    }
}
