/**
 * Error Conversion
 *
 * This module provides the `IntoResponse` implementation for service
 * errors so handlers can return `Result<_, ApiError>` directly.
 *
 * # Response Format
 *
 * Error responses are returned as JSON:
 * ```json
 * {
 *   "message": "Session not found"
 * }
 * ```
 *
 * Server-side failures (database, internal) are logged with their full
 * details and presented to the caller as a generic 500 body.
 */

use axum::{
    response::{Response, IntoResponse},
    http::StatusCode,
    body::Body,
};
use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!("[Error] Internal failure: {:?}", self);
        }

        let status = self.status_code();
        let message = self.message();

        let body = serde_json::json!({
            "message": message,
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap_or_else(|_| {
                format!(r#"{{"message":"{}"}}"#, message)
            })))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}
