//! # API Client
//!
//! Every call to the registry goes through [`ApiClient::execute`]:
//!
//! 1. The current access token, if any, is attached as a bearer token.
//! 2. A 401 answered to a request that carried a token triggers a refresh
//!    through the cookie-authenticated refresh endpoint, then the original
//!    request is sent again exactly once with the new token.
//! 3. A failed refresh drops the token and surfaces [`ApiError::SessionExpired`].
//!
//! Refreshes are single-flight: concurrent requests that hit a 401 with the same
//! stale token queue on one gate, the first performs the refresh and the rest
//! reuse its outcome instead of issuing their own.

mod request;

use std::sync::Arc;

use padron_common::config::Config;
use padron_common::models::Usuario;
use padron_common::session::SessionStore;
use padron_protocols::auth::{LoginRequest, TokenResponse};
use padron_protocols::{body, endpoints, errors};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::session::Session;

pub use request::{Blob, RequestSpec};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    refresh_gate: Mutex<()>,
    store: Option<Arc<dyn SessionStore>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.server.trim_end_matches('/').to_string();
        let refresh_url = Url::parse(&endpoints::join(&base_url, endpoints::REFRESH))
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let session = Session::new(refresh_url);
        let http = reqwest::Client::builder()
            .cookie_provider(session.jar())
            .timeout(config.timeout)
            .user_agent(concat!("padron/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
            refresh_gate: Mutex::new(()),
            store: None,
        })
    }

    /// Persists the session to `store` after every login, refresh and logout.
    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Seeds the session from the store. Returns whether an access token was restored.
    pub async fn resume(&self) -> Result<bool, ApiError> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        match store.load().await? {
            Some(snapshot) => {
                self.session.seed(&snapshot);
                debug!(email = ?snapshot.email, "session restored");
                Ok(self.session.is_authenticated())
            }
            None => Ok(false),
        }
    }

    // ── Session handshake ───────────────────────────────────────────

    /// Exchanges credentials for an access token; the refresh cookie lands in the jar.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Usuario>, ApiError> {
        let req = RequestSpec::post(endpoints::LOGIN).json(&LoginRequest { email, password })?;
        let resp = self.dispatch(&req, None).await?;
        let resp = self.checked(&req, resp).await?;

        let token: TokenResponse = Self::decode_token(&req, resp).await?;
        self.session.set_access_token(token.access);
        self.session.set_email(Some(email.to_string()));
        self.persist().await;

        info!(email, "logged in");
        Ok(token.user)
    }

    /// Tells the backend to drop the refresh cookie, then forgets the session
    /// locally whatever the backend answered.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let req = RequestSpec::post(endpoints::LOGOUT);
        let token = self.session.access_token();
        match self.dispatch(&req, token.as_deref()).await {
            Ok(resp) if resp.status().is_success() => debug!("backend session closed"),
            Ok(resp) => debug!(status = resp.status().as_u16(), "logout rejected by backend"),
            Err(e) => debug!("logout request failed: {e}"),
        }

        self.session.clear();
        if let Some(store) = &self.store {
            store.clear().await?;
        }
        Ok(())
    }

    pub async fn me(&self) -> Result<Usuario, ApiError> {
        self.get(endpoints::ME)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("empty body from {}", endpoints::ME)))
    }

    // ── JSON helpers ────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        self.send(RequestSpec::get(path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(RequestSpec::post(path).json(body)?).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(RequestSpec::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<Value>(RequestSpec::delete(path)).await.map(|_| ())
    }

    /// Sends `req` and decodes the body; empty and 204 bodies become `None`.
    pub async fn send<T: DeserializeOwned>(&self, req: RequestSpec) -> Result<Option<T>, ApiError> {
        let resp = self.execute(&req).await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;

        body::parse_json(status, &bytes).map_err(|e| ApiError::Decode(format!("{req}: {e}")))
    }

    /// Sends `req` and returns the raw body with its content type and file name.
    pub async fn download(&self, req: RequestSpec) -> Result<Blob, ApiError> {
        let resp = self.execute(&req).await?;
        let headers = resp.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(body::disposition_filename);
        let bytes = resp.bytes().await?.to_vec();

        debug!(%req, size = bytes.len(), "download complete");
        Ok(Blob {
            bytes,
            content_type,
            filename,
        })
    }

    // ── Core request path ───────────────────────────────────────────

    /// Sends `req`, refreshing and retrying once on a 401. Non-2xx answers become errors.
    pub async fn execute(&self, req: &RequestSpec) -> Result<Response, ApiError> {
        let token = self.session.access_token();
        let resp = self.dispatch(req, token.as_deref()).await?;

        if resp.status() != StatusCode::UNAUTHORIZED {
            return self.checked(req, resp).await;
        }
        let Some(stale) = token else {
            return self.checked(req, resp).await;
        };

        debug!(%req, "access token rejected, refreshing");
        let fresh = self.refresh_access(&stale).await?;
        let retry = self.dispatch(req, Some(&fresh)).await?;
        self.checked(req, retry).await
    }

    async fn dispatch(&self, req: &RequestSpec, token: Option<&str>) -> Result<Response, ApiError> {
        let url = endpoints::join(&self.base_url, &req.path);
        let mut builder = self.http.request(req.method.clone(), &url);

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        debug!(method = %req.method, %url, authenticated = token.is_some(), "request");
        Ok(builder.send().await?)
    }

    /// Single-flight refresh. `stale` is the token the caller saw rejected.
    async fn refresh_access(&self, stale: &str) -> Result<String, ApiError> {
        let _gate = self.refresh_gate.lock().await;

        match self.session.access_token() {
            Some(current) if current != stale => {
                debug!("token already rotated by a concurrent request");
                return Ok(current);
            }
            None => return Err(ApiError::SessionExpired),
            Some(_) => {}
        }

        match self.request_new_token().await {
            Ok(token) => {
                self.session.set_access_token(token.clone());
                self.persist().await;
                info!("access token refreshed");
                Ok(token)
            }
            Err(e) => {
                warn!("session refresh failed: {e}");
                self.session.clear_access_token();
                self.persist().await;
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn request_new_token(&self) -> Result<String, ApiError> {
        let req = RequestSpec::post(endpoints::REFRESH);
        let resp = self.dispatch(&req, None).await?;
        let resp = self.checked(&req, resp).await?;
        let token = Self::decode_token(&req, resp).await?;
        Ok(token.access)
    }

    async fn decode_token(req: &RequestSpec, resp: Response) -> Result<TokenResponse, ApiError> {
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("{req}: {e}")))
    }

    async fn checked(&self, req: &RequestSpec, resp: Response) -> Result<Response, ApiError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        Err(Self::failure(req, resp).await)
    }

    async fn failure(req: &RequestSpec, resp: Response) -> ApiError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        let message = errors::combined_message(&text);
        let silent = errors::is_silent(status.as_u16(), message.as_deref());
        let message = message.unwrap_or_else(|| {
            format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("error")
            )
        });

        if silent {
            debug!(status = status.as_u16(), %req, "{message}");
        } else {
            warn!(status = status.as_u16(), %req, "{message}");
        }

        ApiError::Http {
            status: status.as_u16(),
            message,
            silent,
        }
    }

    async fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.session.snapshot()).await {
            warn!("could not persist session: {e}");
        }
    }
}
