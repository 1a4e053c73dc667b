use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::models::auth::Claims;

pub struct AuthService;

impl AuthService {
    /// Sign an HS256 access token for `subject` carrying `role`, valid for `ttl_secs`.
    pub fn create_access_token(
        subject: &str,
        role: &str,
        secret: &str,
        ttl_secs: u64,
    ) -> anyhow::Result<String> {
        let now = chrono::Utc::now().timestamp() as usize;
        let exp = usize::try_from(ttl_secs)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| anyhow::anyhow!("Token lifetime of {ttl_secs}s is too large"))?;
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now,
            exp,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_lifetime_is_an_error() {
        assert!(AuthService::create_access_token("ops", "admin", "s3cret", u64::MAX).is_err());
    }

    #[test]
    fn ordinary_lifetime_is_accepted() {
        assert!(AuthService::create_access_token("ops", "admin", "s3cret", 3600).is_ok());
    }
}
