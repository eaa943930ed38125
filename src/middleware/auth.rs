use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, JwtVerifier};
use crate::error::ApiError;
use crate::services::RequestError;

/// Claims of a token that passed signature, issuer, audience and expiry checks
#[derive(Clone, Debug)]
pub struct VerifiedClaims(pub Claims);

/// Authenticated principal's username, extracted from verified claims
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity_from(parts.extensions.get::<VerifiedClaims>())
            .map(AuthUser)
            .map_err(|e| {
                tracing::error!("No username found in token");
                e.into()
            })
    }
}

fn identity_from(claims: Option<&VerifiedClaims>) -> Result<String, RequestError> {
    claims
        .and_then(|VerifiedClaims(claims)| claims.identity())
        .map(str::to_string)
        .ok_or_else(|| RequestError::Unauthenticated("Invalid token".to_string()))
}

/// JWT authentication middleware that validates tokens and stores the claims
/// in request extensions
pub async fn jwt_auth_middleware(
    State(verifier): State<JwtVerifier>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    tracing::info!(
        "JWT token received for request {} {}",
        request.method(),
        request.uri().path()
    );

    let claims = verifier.verify(&token).map_err(|e| {
        tracing::warn!("Bearer token rejected: {}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    request.extensions_mut().insert(VerifiedClaims(claims));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
