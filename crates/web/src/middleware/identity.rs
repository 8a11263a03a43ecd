use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::WebError;

/// Stable opaque user identifier supplied by the identity provider in front
/// of this service, carried on every request as an `X-User-Id` header. The
/// ranking engine never interprets it beyond equality.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .ok_or(WebError::Unauthorized)?;

        let user_id = Uuid::parse_str(value).map_err(|_| {
            tracing::warn!("Malformed X-User-Id header");
            WebError::Unauthorized
        })?;

        Ok(UserId(user_id))
    }
}
