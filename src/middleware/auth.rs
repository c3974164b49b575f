/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and attaches the decoded identity to the
 * request, plus role guards for the teacher/student route groups.
 */

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::tokens::verify_token;
use crate::error::ApiError;
use crate::model::Role;

/// Authenticated user data extracted from a JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    pub org_id: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token
/// 3. Attaches the decoded identity to request extensions for handlers
///
/// Returns 401 Unauthorized if the token is missing or invalid
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing Authorization header");
            ApiError::unauthorized("No token provided")
        })?;

    // Expected format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("[Auth] Invalid Authorization header format");
        ApiError::unauthorized("No token provided")
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {:?}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        name: claims.name,
        role: claims.role,
        org_id: claims.org_id,
    });

    Ok(next.run(request).await)
}

/// Role guard: only teachers pass
///
/// Layered inside `auth_middleware` on the teacher route group.
pub async fn require_teacher(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(request, next, Role::Teacher).await
}

/// Role guard: only students pass
pub async fn require_student(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(request, next, Role::Student).await
}

async fn require_role(request: Request, next: Next, role: Role) -> Result<Response, ApiError> {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.role == role => Ok(next.run(request).await),
        Some(user) => {
            tracing::warn!(
                "[Auth] Access denied: {} has role {}, route requires {}",
                user.user_id,
                user.role,
                role
            );
            Err(ApiError::forbidden("Access denied"))
        }
        None => Err(ApiError::unauthorized("No token provided")),
    }
}

/// Axum extractor for the authenticated user
///
/// This can be used as a parameter in handlers to automatically extract
/// the authenticated user from request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                ApiError::unauthorized("No token provided")
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_authenticated_user_retrievable_from_extensions() {
        let mut request = Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();

        let user = AuthenticatedUser {
            user_id: "user-1".to_string(),
            name: "Asha".to_string(),
            role: Role::Teacher,
            org_id: "org-1".to_string(),
        };
        request.extensions_mut().insert(user.clone());

        let stored = request.extensions().get::<AuthenticatedUser>();
        assert!(stored.is_some());
        assert_eq!(stored.unwrap().user_id, user.user_id);
    }
}
