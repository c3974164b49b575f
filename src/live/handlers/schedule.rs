/**
 * Schedule Session Handler
 *
 * This module implements the session scheduling handler for
 * POST /api/teacher/live-session/schedule.
 *
 * # Scheduling Process
 *
 * 1. Validate that all required fields are present and non-blank
 * 2. Parse the scheduled date (RFC 3339 or bare `YYYY-MM-DD`)
 * 3. Create the session document with a fresh session id
 * 4. Return the new session id
 *
 * # Validation
 *
 * - sessionTitle, shortDescription, sessionHeading, date and time are
 *   required; courseId is optional
 * - Blank strings count as missing
 * - A bare date is stored as midnight UTC of that day
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ApiError;
use crate::live::handlers::types::{ScheduleSessionRequest, ScheduleSessionResponse};
use crate::middleware::AuthUser;
use crate::server::AppState;
use crate::store::NewSession;

fn required(field: Option<String>) -> Result<String, ApiError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::validation("All fields are required"))
}

/// Parse the scheduled date, accepting RFC 3339 or a bare `YYYY-MM-DD`
fn parse_scheduled_date(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(parsed.and_time(NaiveTime::MIN).and_utc());
    }
    Err(ApiError::validation("Invalid date format"))
}

/// Schedule a live session (POST /api/teacher/live-session/schedule)
///
/// Creates a new session document owned by the calling teacher. The
/// session starts inactive; the teacher activates it with the start
/// endpoint when class begins.
///
/// # Arguments
///
/// * `State(state)` - Shared application state
/// * `AuthUser(user)` - The authenticated teacher
/// * `Json(request)` - Schedule request body
///
/// # Returns
///
/// `201 Created` with `{ message, sessionId }`
///
/// # Errors
///
/// * `400 Bad Request` - If a required field is missing or blank, or the
///   date cannot be parsed
///
/// # Example Request
///
/// ```http
/// POST /api/teacher/live-session/schedule HTTP/1.1
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "sessionTitle": "Fractions, part 2",
///   "shortDescription": "Continuing from Monday",
///   "sessionHeading": "Mathematics - Grade 6",
///   "date": "2025-03-14",
///   "time": "10:00 AM"
/// }
/// ```
pub async fn schedule_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ScheduleSessionRequest>,
) -> Result<(StatusCode, Json<ScheduleSessionResponse>), ApiError> {
    let session_title = required(request.session_title)?;
    let short_description = required(request.short_description)?;
    let session_heading = required(request.session_heading)?;
    let date = required(request.date)?;
    let time = required(request.time)?;

    let scheduled_date = parse_scheduled_date(&date)?;

    let session = state
        .store
        .create(NewSession {
            teacher_id: user.user_id,
            org_id: user.org_id,
            course_id: request.course_id.filter(|id| !id.is_empty()),
            session_title,
            short_description,
            session_heading,
            scheduled_date,
            scheduled_time: time,
        })
        .await?;

    tracing::info!(
        "[LiveSession] Scheduled session {} for teacher {}",
        session.session_id,
        session.teacher_id
    );

    Ok((
        StatusCode::CREATED,
        Json(ScheduleSessionResponse {
            message: "Live session scheduled successfully".to_string(),
            session_id: session.session_id,
        }),
    ))
}
