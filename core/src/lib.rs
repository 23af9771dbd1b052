//! # Padron Core
//!
//! Client side of the business registry.
//!
//! * **[`client`]**: the request wrapper. Attaches the bearer token, decodes JSON
//!   (empty bodies become `None`), turns failures into [`ApiError`]s and, on a 401,
//!   refreshes the session once and retries once.
//! * **[`session`]**: the in-memory access token and the cookie jar holding the
//!   refresh cookie.
//! * **[`auth`]**: decodes the account's role into a coarse [`UserType`] and gates
//!   [`Area`]s of the application.
//! * **[`services`]**: use cases built on the client (companies, catalogs, exports).

pub mod auth;
pub mod client;
pub mod error;
pub mod services;
pub mod session;

pub use auth::{Area, AuthContext, UserType};
pub use client::{ApiClient, Blob, RequestSpec};
pub use error::ApiError;
pub use session::Session;
