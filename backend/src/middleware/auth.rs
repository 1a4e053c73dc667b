use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::error::AppError;
use crate::models::auth::{AuthenticatedUser, Claims};
use crate::models::user::UserRole;

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized("Invalid Authorization header format"))?;

        let secret = parts
            .extensions
            .get::<JwtSecret>()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("JWT secret not configured")))?;

        decode_access_token(token, &secret.0)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token"))
    }
}

/// Extension type to carry the JWT secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

pub fn decode_access_token(token: &str, secret: &str) -> Result<AuthenticatedUser, anyhow::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation)?;
    let claims = data.claims;

    Ok(AuthenticatedUser {
        subject: claims.sub,
        role: UserRole::from(claims.role.as_str()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::AuthService;

    #[test]
    fn decodes_token_issued_with_same_secret() {
        let token = AuthService::create_access_token("ms.frizzle", "teacher", "s3cret", 60).unwrap();
        let user = decode_access_token(&token, "s3cret").unwrap();
        assert_eq!(user.subject, "ms.frizzle");
        assert_eq!(user.role, UserRole::Teacher);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = AuthService::create_access_token("arnold", "student", "s3cret", 60).unwrap();
        assert!(decode_access_token(&token, "different").is_err());
    }

    #[test]
    fn unknown_role_survives_decoding() {
        let token = AuthService::create_access_token("visitor", "parent", "s3cret", 60).unwrap();
        let user = decode_access_token(&token, "s3cret").unwrap();
        assert_eq!(user.role, UserRole::Other("parent".into()));
        assert!(!user.role.is_staff());
    }
}
