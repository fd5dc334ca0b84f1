//! Tests for error types and response mapping

use super::types::BoardError;
use actix_web::ResponseError;
use actix_web::http::StatusCode;

#[test]
fn test_forbidden_maps_to_403() {
    let err = BoardError::forbidden("You are not allowed to modify this lab");
    assert_eq!(err.error_response().status(), StatusCode::FORBIDDEN);
}

#[test]
fn test_unauthorized_maps_to_401() {
    let err = BoardError::unauthorized("Missing bearer token");
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_not_found_maps_to_404() {
    let err = BoardError::not_found("Lab not found");
    assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_conflict_maps_to_409() {
    let err = BoardError::conflict("You have already applied to this job");
    assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
}

#[test]
fn test_validation_maps_to_400() {
    let err = BoardError::validation("Unknown role: Janitor");
    assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_storage_maps_to_500() {
    let err = BoardError::storage("table missing");
    assert_eq!(
        err.error_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_error_display() {
    let err = BoardError::forbidden("denied");
    assert_eq!(err.to_string(), "Forbidden: denied");

    let err = BoardError::config("missing jwt secret");
    assert_eq!(err.to_string(), "Configuration error: missing jwt secret");
}
