/**
 * JWT Token Verification
 *
 * This module handles the JWT tokens that carry user identity into the
 * service. Tokens are minted by the platform's auth service; here they
 * are verified and decoded for both the HTTP middleware and the
 * WebSocket upgrade handshake. `create_token` exists for tests and
 * local tooling.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::Role;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Display name
    pub name: String,
    /// Participant role (teacher or student)
    pub role: Role,
    /// Organization the user belongs to
    #[serde(rename = "orgId")]
    pub org_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Get JWT secret from environment
fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        eprintln!("Missing JWT_SECRET. Error: {}", err);
        "your-secret-key-change-in-production".to_string()
    })
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `user_id` - User ID
/// * `name` - Display name
/// * `role` - Participant role
/// * `org_id` - Organization ID
///
/// # Returns
/// JWT token string
pub fn create_token(
    user_id: &str,
    name: &str,
    role: Role,
    org_id: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    // Token expires in 30 days
    let exp = now + (30 * 24 * 60 * 60);

    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        role,
        org_id: org_id.to_string(),
        exp,
        iat: now,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Arguments
/// * `token` - JWT token string
///
/// # Returns
/// Decoded claims or error
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_token() {
        let result = create_token("user-1", "Asha", Role::Teacher, "org-1");
        assert!(result.is_ok());
        let token = result.unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_token() {
        let token = create_token("user-1", "Asha", Role::Teacher, "org-1").unwrap();

        let result = verify_token(&token);
        assert!(result.is_ok());
        let claims = result.unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.name, "Asha");
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.org_id, "org-1");
    }

    #[test]
    fn test_verify_invalid_token() {
        let invalid_token = "invalid.token.here";
        let result = verify_token(invalid_token);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_expiry_after_issue() {
        let token = create_token("user-2", "Ravi", Role::Student, "org-1").unwrap();
        let claims = verify_token(&token).unwrap();
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_org_claim_uses_wire_name() {
        let claims = Claims {
            sub: "user-3".to_string(),
            name: "Meera".to_string(),
            role: Role::Student,
            org_id: "org-9".to_string(),
            exp: 2,
            iat: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json.get("orgId").unwrap(), "org-9");
        assert!(json.get("org_id").is_none());
    }
}
