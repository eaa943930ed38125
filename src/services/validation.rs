use serde::Deserialize;
use tracing::{debug, warn};

use super::error::RequestError;

/// Body of `POST /api/home/SendDataToDB`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Check a registration payload against the token identity.
///
/// Missing fields are reported before an identity mismatch. The password only
/// has to be present; it is not checked against anything because the bearer
/// token already authenticated the caller.
pub fn validate_registration<'a>(identity: &str, request: &'a UserRequest) -> Result<&'a str, RequestError> {
    let username = request.username.as_deref().filter(|s| !s.is_empty());
    let password = request.password.as_deref().filter(|s| !s.is_empty());

    let (Some(username), Some(_)) = (username, password) else {
        warn!("Empty username or password submitted");
        return Err(RequestError::BadRequest("Username and password are required".to_string()));
    };

    ensure_identity_matches(identity, username)?;
    debug!("Password for '{}' accepted without verification", username);

    Ok(username)
}

/// The token identity must name the same user, ignoring case
pub fn ensure_identity_matches(identity: &str, username: &str) -> Result<(), RequestError> {
    if identity.to_lowercase() != username.to_lowercase() {
        warn!("Username mismatch. Token: {}, Request: {}", identity, username);
        return Err(RequestError::Unauthorized("Username mismatch with token".to_string()));
    }
    Ok(())
}
