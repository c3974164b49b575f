/**
 * WebSocket Socket Handler
 *
 * Upgrade endpoint and per-connection task for the live-session socket.
 * The upgrade is authenticated before the handshake completes; identity
 * always comes from the verified token, never from event payloads.
 *
 * # Connection Lifecycle
 *
 * 1. Client connects with a token (Authorization header or `?token=`).
 * 2. The connection is registered with a fresh connection id and an
 *    unbounded outbound queue.
 * 3. A single task multiplexes outbound queue drain, inbound frames and
 *    the heartbeat timer until the peer goes away.
 * 4. Teardown unregisters the connection and tells the session the user
 *    left.
 *
 * # Heartbeat
 *
 * The server pings every 25 seconds and drops connections that have been
 * silent for more than 60 seconds.
 */

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;
use chrono::Utc;
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::{verify_token, Claims};
use crate::error::ApiError;
use crate::model::{NetworkQuality, Role};
use crate::server::AppState;
use crate::signaling::protocol::{ClientEvent, ServerEvent, SessionDescription};
use crate::signaling::registry::ConnectionInfo;
use crate::signaling::sdp::constrain_opus_audio;
use crate::signaling::ConnId;

const PING_INTERVAL: Duration = Duration::from_secs(25);
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    token: Option<String>,
}

/// Handle the WebSocket upgrade (GET /live-session)
///
/// Verifies the caller's token before accepting the handshake. Browsers
/// cannot set headers on WebSocket requests, so the token is also
/// accepted as a `token` query parameter.
///
/// # Errors
///
/// * `401 Unauthorized` - If the token is missing or invalid
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let token = connection_token(&headers, query.token.as_deref())
        .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let claims = verify_token(&token).map_err(|e| {
        tracing::warn!("[Signaling] Rejected upgrade with invalid token: {}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, claims)))
}

/// Token from the Authorization header, falling back to the query string
fn connection_token(headers: &HeaderMap, query_token: Option<&str>) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }
    query_token.map(str::to_string)
}

/// Per-connection task: register, multiplex, tear down
async fn handle_socket(socket: WebSocket, state: AppState, claims: Claims) {
    let conn_id = Uuid::new_v4();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ServerEvent>();

    state.signaling.registry().register(
        conn_id,
        ConnectionInfo {
            session_id: None,
            user_id: claims.sub.clone(),
            user_name: claims.name.clone(),
            role: claims.role,
        },
        outbound_tx,
    );
    tracing::info!(
        "[Signaling] Connection {} opened for {} {}",
        conn_id,
        claims.role.as_str(),
        claims.sub
    );

    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.reset(); // skip the immediate first tick
    let mut last_seen = Instant::now();

    loop {
        tokio::select! {
            maybe_event = outbound_rx.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(
                            "[Signaling] Failed to serialize {} for {}: {:?}",
                            event.name(),
                            conn_id,
                            e
                        );
                        continue;
                    }
                };
                if ws_tx.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                if last_seen.elapsed() > IDLE_TIMEOUT {
                    tracing::warn!(
                        "[Signaling] Connection {} idle for {:?}, closing",
                        conn_id,
                        last_seen.elapsed()
                    );
                    break;
                }
                if ws_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
            maybe_message = ws_rx.next() => {
                let Some(message) = maybe_message else {
                    break;
                };
                match message {
                    Ok(Message::Text(text)) => {
                        last_seen = Instant::now();
                        let event: ClientEvent = match serde_json::from_str(&text) {
                            Ok(event) => event,
                            Err(e) => {
                                tracing::warn!(
                                    "[Signaling] Dropping malformed frame from {}: {}",
                                    conn_id,
                                    e
                                );
                                continue;
                            }
                        };
                        if let Err(err) = handle_event(conn_id, event, &state).await {
                            if err.is_internal() {
                                tracing::error!(
                                    "[Signaling] Handler failure on {}: {:?}",
                                    conn_id,
                                    err
                                );
                            }
                            state.signaling.unicast(
                                conn_id,
                                ServerEvent::Error {
                                    message: err.message(),
                                },
                            );
                        }
                    }
                    Ok(Message::Ping(payload)) => {
                        last_seen = Instant::now();
                        if ws_tx.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Pong(_)) => {
                        last_seen = Instant::now();
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("[Signaling] Transport error on {}: {}", conn_id, e);
                        break;
                    }
                }
            }
        }
    }

    disconnect(conn_id, &state);
}

/// Unregister and notify the former session, if any
fn disconnect(conn_id: ConnId, state: &AppState) {
    let Some(info) = state.signaling.registry().unregister(conn_id) else {
        return;
    };
    tracing::info!(
        "[Signaling] Connection {} closed for {} {}",
        conn_id,
        info.role.as_str(),
        info.user_id
    );

    if let Some(session_id) = info.session_id {
        state.signaling.broadcast_to_session(
            &session_id,
            ServerEvent::UserLeft {
                user_id: info.user_id,
                user_name: info.user_name,
                role: info.role,
            },
        );
        state.signaling.release_session_state(&session_id);
    }
}

/// Dispatch one inbound event
///
/// Precondition failures surface as an `error` event to the originator;
/// nothing here replies to anyone else on failure.
async fn handle_event(
    conn_id: ConnId,
    event: ClientEvent,
    state: &AppState,
) -> Result<(), ApiError> {
    tracing::debug!("[Signaling] {} from {}", event.name(), conn_id);

    match event {
        ClientEvent::JoinSession {
            session_id,
            user_id,
            user_name: _,
            role,
        } => handle_join(conn_id, &session_id, &user_id, role, state).await,
        ClientEvent::ReconnectToSession {
            session_id,
            user_id,
            user_name: _,
        } => handle_reconnect(conn_id, &session_id, &user_id, state).await,
        ClientEvent::ChangeSlide {
            session_id,
            slide_index,
            slide_image,
        } => handle_change_slide(conn_id, &session_id, slide_index, slide_image, state).await,
        ClientEvent::SlideUploaded {
            session_id,
            slide_url,
            slide_index,
        } => handle_slide_uploaded(conn_id, &session_id, slide_url, slide_index, state),
        ClientEvent::WebrtcOffer {
            session_id: _,
            target_conn_id,
            offer,
        } => relay_offer(conn_id, target_conn_id, offer, state),
        ClientEvent::WebrtcAnswer {
            session_id: _,
            target_conn_id,
            answer,
        } => relay_answer(conn_id, target_conn_id, answer, state),
        ClientEvent::WebrtcIceCandidate {
            session_id: _,
            target_conn_id,
            candidate,
        } => relay_ice_candidate(conn_id, target_conn_id, candidate, state),
        ClientEvent::RequestTeacherStream { session_id } => {
            handle_request_teacher_stream(conn_id, &session_id, state)
        }
        ClientEvent::SendChatMessage {
            session_id,
            message,
        } => handle_chat_message(conn_id, &session_id, &message, state).await,
        ClientEvent::Understood { session_id } => {
            handle_understood(conn_id, &session_id, state).await
        }
        ClientEvent::NetworkQualityReport {
            session_id,
            quality,
            stats: _,
        } => handle_network_quality(conn_id, &session_id, quality, state),
        ClientEvent::MaterialUploaded {
            session_id,
            material,
        } => handle_material_relay(conn_id, &session_id, material, state),
    }
}

/// Connection info for a registered connection; gone means the socket
/// task is already tearing down
fn connection(conn_id: ConnId, state: &AppState) -> Result<ConnectionInfo, ApiError> {
    state
        .signaling
        .registry()
        .get(conn_id)
        .ok_or_else(|| ApiError::internal("Connection not registered"))
}

fn require_joined(info: &ConnectionInfo, session_id: &str) -> Result<(), ApiError> {
    if info.session_id.as_deref() == Some(session_id) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Not joined to session"))
    }
}

async fn handle_join(
    conn_id: ConnId,
    session_id: &str,
    asserted_user_id: &str,
    asserted_role: Role,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;
    if asserted_user_id != info.user_id || asserted_role != info.role {
        tracing::warn!(
            "[Signaling] Join identity mismatch on {}: payload {} vs token {}",
            conn_id,
            asserted_user_id,
            info.user_id
        );
        return Err(ApiError::validation("Identity mismatch"));
    }

    let session = state.store.get(session_id).await?;
    if !session.is_active {
        return Err(ApiError::invalid_state("Session not active"));
    }

    let participant_count = match info.role {
        Role::Student => state.store.add_participant(session_id, &info.user_id).await?,
        Role::Teacher => state.store.participant_count(session_id).await?,
    };

    state.signaling.registry().bind_session(conn_id, session_id);
    tracing::info!(
        "[Signaling] {} {} joined session {} ({} participant(s))",
        info.role.as_str(),
        info.user_id,
        session_id,
        participant_count
    );

    state.signaling.broadcast_to_session(
        session_id,
        ServerEvent::UserJoined {
            user_id: info.user_id,
            user_name: info.user_name,
            role: info.role,
            participant_count,
        },
    );
    Ok(())
}

async fn handle_reconnect(
    conn_id: ConnId,
    session_id: &str,
    asserted_user_id: &str,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;
    if asserted_user_id != info.user_id {
        tracing::warn!(
            "[Signaling] Reconnect identity mismatch on {}: payload {} vs token {}",
            conn_id,
            asserted_user_id,
            info.user_id
        );
        return Err(ApiError::validation("Identity mismatch"));
    }

    let session = state.store.get(session_id).await?;
    if !session.is_active {
        return Err(ApiError::invalid_state("Session no longer active"));
    }

    state.signaling.registry().bind_session(conn_id, session_id);
    tracing::info!(
        "[Signaling] {} {} reconnected to session {}",
        info.role.as_str(),
        info.user_id,
        session_id
    );

    state.signaling.broadcast_to_session(
        session_id,
        ServerEvent::UserReconnected {
            user_id: info.user_id,
            user_name: info.user_name,
            timestamp: Utc::now(),
        },
    );
    Ok(())
}

async fn handle_change_slide(
    conn_id: ConnId,
    session_id: &str,
    slide_index: i64,
    slide_image: Option<String>,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;
    if info.role != Role::Teacher {
        return Err(ApiError::forbidden("Only teacher can change slides"));
    }
    if info.session_id.as_deref() != Some(session_id) {
        return Err(ApiError::forbidden("Only teacher can change slides"));
    }

    let session = state.store.get(session_id).await?;
    if session.teacher_id != info.user_id {
        return Err(ApiError::forbidden("Only teacher can change slides"));
    }
    if !session.is_active {
        return Err(ApiError::invalid_state("Session not active"));
    }

    state.store.set_current_slide(session_id, slide_index).await?;

    let seq = state.signaling.next_seq(session_id);
    state.signaling.broadcast_to_session(
        session_id,
        ServerEvent::SlideChanged {
            slide_index,
            slide_image,
            changed_by: info.user_name,
            seq,
        },
    );
    Ok(())
}

fn handle_slide_uploaded(
    conn_id: ConnId,
    session_id: &str,
    slide_url: String,
    slide_index: i64,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;
    if info.role != Role::Teacher {
        return Err(ApiError::forbidden("Only teacher can upload slides"));
    }

    state.signaling.broadcast_to_session(
        session_id,
        ServerEvent::NewSlideAvailable {
            slide_url,
            slide_index,
            uploaded_by: info.user_name,
            timestamp: Utc::now(),
        },
    );
    Ok(())
}

fn relay_offer(
    conn_id: ConnId,
    target_conn_id: ConnId,
    mut offer: SessionDescription,
    state: &AppState,
) -> Result<(), ApiError> {
    offer.sdp = constrain_opus_audio(&offer.sdp);
    let delivered = state.signaling.unicast(
        target_conn_id,
        ServerEvent::WebrtcOffer {
            offer,
            from_conn_id: conn_id,
        },
    );
    if delivered {
        Ok(())
    } else {
        Err(ApiError::unavailable("Peer not connected"))
    }
}

fn relay_answer(
    conn_id: ConnId,
    target_conn_id: ConnId,
    mut answer: SessionDescription,
    state: &AppState,
) -> Result<(), ApiError> {
    answer.sdp = constrain_opus_audio(&answer.sdp);
    let delivered = state.signaling.unicast(
        target_conn_id,
        ServerEvent::WebrtcAnswer {
            answer,
            from_conn_id: conn_id,
        },
    );
    if delivered {
        Ok(())
    } else {
        Err(ApiError::unavailable("Peer not connected"))
    }
}

fn relay_ice_candidate(
    conn_id: ConnId,
    target_conn_id: ConnId,
    candidate: serde_json::Value,
    state: &AppState,
) -> Result<(), ApiError> {
    let delivered = state.signaling.unicast(
        target_conn_id,
        ServerEvent::WebrtcIceCandidate {
            candidate,
            from_conn_id: conn_id,
        },
    );
    if delivered {
        Ok(())
    } else {
        Err(ApiError::unavailable("Peer not connected"))
    }
}

fn handle_request_teacher_stream(
    conn_id: ConnId,
    session_id: &str,
    state: &AppState,
) -> Result<(), ApiError> {
    let teacher_conn_id = state
        .signaling
        .registry()
        .find_teacher_of_session(session_id)
        .ok_or_else(|| ApiError::unavailable("Teacher not available"))?;

    let delivered = state.signaling.unicast(
        teacher_conn_id,
        ServerEvent::StudentRequestingStream {
            student_conn_id: conn_id,
        },
    );
    if delivered {
        Ok(())
    } else {
        Err(ApiError::unavailable("Teacher not available"))
    }
}

async fn handle_chat_message(
    conn_id: ConnId,
    session_id: &str,
    message: &str,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;
    require_joined(&info, session_id)?;

    let persisted = state
        .chat
        .append(session_id, &info.user_id, &info.user_name, info.role, message)
        .await?;

    state
        .signaling
        .broadcast_to_session(session_id, ServerEvent::ChatMessage(persisted));
    Ok(())
}

async fn handle_understood(
    conn_id: ConnId,
    session_id: &str,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;
    require_joined(&info, session_id)?;

    let understood_count = state.store.increment_understood(session_id).await?;
    let seq = state.signaling.next_seq(session_id);

    state.signaling.broadcast_to_session(
        session_id,
        ServerEvent::UnderstoodCountUpdated {
            understood_count,
            seq,
        },
    );
    Ok(())
}

fn handle_network_quality(
    conn_id: ConnId,
    session_id: &str,
    quality: NetworkQuality,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;

    if info.role == Role::Teacher && quality == NetworkQuality::Poor {
        state.signaling.broadcast_to_session(
            session_id,
            ServerEvent::NetworkQualityWarning {
                message: "Teacher experiencing network issues".to_string(),
                severity: "warning".to_string(),
                timestamp: Utc::now(),
            },
        );
    } else {
        tracing::debug!(
            "[Signaling] Network quality {:?} reported by {} in session {}",
            quality,
            info.user_id,
            session_id
        );
    }
    Ok(())
}

fn handle_material_relay(
    conn_id: ConnId,
    session_id: &str,
    material: crate::model::Material,
    state: &AppState,
) -> Result<(), ApiError> {
    let info = connection(conn_id, state)?;
    require_joined(&info, session_id)?;

    state
        .signaling
        .broadcast_to_session(session_id, ServerEvent::NewMaterial { material });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_connection_token_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        let token = connection_token(&headers, Some("query-token"));
        assert_eq!(token.as_deref(), Some("header-token"));
    }

    #[test]
    fn test_connection_token_falls_back_to_query() {
        let headers = HeaderMap::new();
        let token = connection_token(&headers, Some("query-token"));
        assert_eq!(token.as_deref(), Some("query-token"));
    }

    #[test]
    fn test_connection_token_requires_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(connection_token(&headers, None).is_none());
    }
}
