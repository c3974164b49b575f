//! Authentication test helpers
//!
//! Provides utilities for minting test identities and the JWT tokens
//! that carry them into the service.

use uuid::Uuid;

use classlive::auth::create_token;
use classlive::model::Role;

/// Test user identity with a valid signed token
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub org_id: String,
    pub token: String,
}

/// Create a test user with a freshly minted token
pub fn test_user(name: &str, role: Role, org_id: &str) -> TestUser {
    let id = format!("{}-{}", role.as_str(), Uuid::new_v4());
    let token = create_token(&id, name, role, org_id).expect("Failed to create test token");

    TestUser {
        id,
        name: name.to_string(),
        role,
        org_id: org_id.to_string(),
        token,
    }
}

/// Create a teacher identity in the given org
pub fn test_teacher(org_id: &str) -> TestUser {
    test_user("Asha Verma", Role::Teacher, org_id)
}

/// Create a student identity in the given org
pub fn test_student(org_id: &str) -> TestUser {
    test_user("Ravi Kumar", Role::Student, org_id)
}
