use padron_common::models::Usuario;
use serde::{Deserialize, Serialize};

/// Name of the HTTP-only cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of a successful login or refresh. The refresh token never shows up
/// here, it travels as a cookie.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(alias = "access_token", alias = "token")]
    pub access: String,

    #[serde(default, alias = "usuario")]
    pub user: Option<Usuario>,
}
