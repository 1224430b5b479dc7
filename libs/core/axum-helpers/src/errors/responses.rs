//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorBody;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - body or query could not be decoded",
    content_type = "application/json",
    example = json!({
        "cause": "id is required",
        "message": "failed to decode request",
        "http": 400
    })
)]
pub struct BadRequestResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "cause": "item not found",
        "message": "item not found",
        "http": 404
    })
)]
pub struct NotFoundResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - identifier has the wrong format",
    content_type = "application/json",
    example = json!({
        "cause": "invalid hexadecimal representation of an ObjectID: invalid hex string length 7",
        "message": "invalid hexadecimal representation of an ObjectID",
        "http": 422
    })
)]
pub struct UnprocessableEntityResponse(pub ErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "cause": "",
        "message": "internal server error",
        "http": 500
    })
)]
pub struct InternalServerErrorResponse(pub ErrorBody);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use axum::http::StatusCode;
    use utoipa::openapi::RefOr;

    fn example_of<'a, R: ToResponse<'a>>() -> ErrorBody {
        let (_, response) = R::response();
        let RefOr::T(response) = response else {
            panic!("inline response expected");
        };
        let example = response.content["application/json"]
            .example
            .clone()
            .expect("example set");
        serde_json::from_value(example).unwrap()
    }

    #[test]
    fn test_client_error_examples_show_cause() {
        let not_found = ApiError::new(
            StatusCode::NOT_FOUND,
            "item not found",
            Some("item not found".to_string()),
        );
        assert_eq!(example_of::<NotFoundResponse>(), not_found.body());

        let example = example_of::<UnprocessableEntityResponse>();
        assert_eq!(example.http, 422);
        assert!(example.cause.starts_with(&example.message));
    }

    #[test]
    fn test_server_error_example_hides_cause() {
        let internal = ApiError::internal("connection refused");
        assert_eq!(example_of::<InternalServerErrorResponse>(), internal.body());
    }
}
