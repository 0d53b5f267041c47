use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    error::{AppError, AppResult},
    models::Booking,
};

/// Signs and verifies bearer tokens. Built once from configuration and carried in state.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str, name: &str) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub fn verify(&self, token: &str) -> AppResult<AuthUser> {
        let decoded = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

        Ok(AuthUser {
            user_id,
            email: decoded.claims.email,
            name: decoded.claims.name,
        })
    }
}

/// The verified caller of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

/// Only the account that created a booking may change or remove it.
pub fn ensure_owner(user: &AuthUser, booking: &Booking) -> Result<(), AppError> {
    if !booking.owner_email.eq_ignore_ascii_case(&user.email) {
        return Err(AppError::Forbidden(
            "You do not have permission to modify this booking".into(),
        ));
    }
    Ok(())
}

impl<S> FromRequestParts<S> for AuthUser
where
    JwtKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Access token required".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        JwtKeys::from_ref(state).verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn keys() -> JwtKeys {
        JwtKeys::new("test-secret", 1)
    }

    #[test]
    fn issued_token_verifies_to_same_identity() {
        let keys = keys();
        let id = Uuid::new_v4();
        let token = keys.issue(id, "ana@example.com", "Ana").unwrap();

        let user = keys.verify(&token).unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.name, "Ana");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtKeys::new("other-secret", 1)
            .issue(Uuid::new_v4(), "ana@example.com", "Ana")
            .unwrap();
        assert!(matches!(keys().verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60s leeway.
        let token = JwtKeys::new("test-secret", -1)
            .issue(Uuid::new_v4(), "ana@example.com", "Ana")
            .unwrap();
        assert!(matches!(keys().verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn extractor_requires_bearer_header() {
        let keys = keys();
        let (mut parts, _) = Request::builder()
            .uri("/api/bookings")
            .body(())
            .unwrap()
            .into_parts();
        let missing = AuthUser::from_request_parts(&mut parts, &keys).await;
        assert!(matches!(missing, Err(AppError::Unauthorized(_))));

        let token = keys.issue(Uuid::new_v4(), "ana@example.com", "Ana").unwrap();
        let (mut parts, _) = Request::builder()
            .uri("/api/bookings")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts();
        let user = AuthUser::from_request_parts(&mut parts, &keys).await.unwrap();
        assert_eq!(user.email, "ana@example.com");
    }
}
