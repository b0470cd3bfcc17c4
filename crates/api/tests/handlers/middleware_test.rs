use bookable_api::middleware::auth;
use bookable_api::middleware::error_handling::map_error;
use bookable_core::errors::BookingError;
use uuid::Uuid;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = BookingError::NotFound("Service not found".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_invalid_appointment_time() {
    let error = BookingError::InvalidAppointmentTime;

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_scheduling_conflict() {
    let error = BookingError::SchedulingConflict;

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_malformed_input() {
    let error = BookingError::MalformedInput("bad datetime".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = BookingError::Validation("Invalid input".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = BookingError::Authentication("Invalid password".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = BookingError::Authorization("Not authorized".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = BookingError::Database(eyre::eyre!("Database error"));

    let response = map_error(error);

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    // The PHC string never echoes the plaintext
    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_verify_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert!(auth::verify_password(password, &hashed).unwrap());
    assert!(!auth::verify_password("wrong_password", &hashed).unwrap());
}

#[tokio::test]
async fn test_verify_password_rejects_garbage_hash() {
    let result = auth::verify_password("test_password", "not a phc string");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_access_token_round_trip() {
    let user_id = Uuid::new_v4();
    let secret = "test-secret";

    let token = auth::create_access_token(user_id, secret, 30).unwrap();
    let decoded = auth::validate_access_token(&token, secret).unwrap();

    assert_eq!(decoded, user_id);
}

#[tokio::test]
async fn test_access_token_wrong_secret_is_rejected() {
    let token = auth::create_access_token(Uuid::new_v4(), "test-secret", 30).unwrap();

    let result = auth::validate_access_token(&token, "other-secret");

    assert!(matches!(result, Err(BookingError::Authentication(_))));
}

#[tokio::test]
async fn test_expired_access_token_is_rejected() {
    // Issue a token that expired ten minutes ago, past the decoder's leeway
    let token = auth::create_access_token(Uuid::new_v4(), "test-secret", -10).unwrap();

    let result = auth::validate_access_token(&token, "test-secret");

    assert!(matches!(result, Err(BookingError::Authentication(_))));
}
