//! Reads the payload of an access token.
//!
//! The signature is not checked: the backend verifies every request anyway,
//! the client only peeks at the claims to gate commands and to notice expiry
//! without a round trip.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("token is not a three part JWT")]
    Malformed,

    #[error("payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default, alias = "role")]
    pub rol: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub empresa_id: Option<i64>,
}

impl Claims {
    /// Tokens without `exp` never expire from the client's point of view.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }

    /// Role names carried by the token: `rol`/`role` first, then `groups`.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.rol
            .iter()
            .map(String::as_str)
            .chain(self.groups.iter().map(String::as_str))
    }
}

pub fn decode_claims(token: &str) -> Result<Claims, JwtError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(JwtError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}
