use padron_common::config::ConfigError;

use crate::auth::{Area, UserType};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx answer. `message` is the flattened error body; `silent` marks
    /// expected failures (authentication-shaped 401s, "not found" 404s).
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        silent: bool,
    },

    /// The refresh cookie was rejected; the access token has been dropped.
    #[error("session expired, log in again")]
    SessionExpired,

    #[error("not logged in")]
    NotAuthenticated,

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("encode: {0}")]
    Encode(String),

    /// Client-side checks failed; nothing was sent.
    #[error("invalid or missing fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("{role} accounts cannot access {area}")]
    Forbidden { area: Area, role: UserType },

    #[error("this account is not linked to a company")]
    NoEmpresa,

    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("session store: {0}")]
    Store(#[from] ConfigError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Expected failures the caller may swallow without reporting.
    pub fn is_silent(&self) -> bool {
        matches!(self, ApiError::Http { silent: true, .. })
    }

    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ApiError::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}
