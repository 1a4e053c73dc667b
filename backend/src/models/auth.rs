use serde::{Deserialize, Serialize};

use super::user::UserRole;

/// Claims embedded in the JWT access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // caller identity (username or email)
    pub role: String, // "student" | "teacher" | "admin"
    pub exp: usize,
    pub iat: usize,
}

/// Identity resolved from the validated JWT, available as an Axum extractor
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub role: UserRole,
}
