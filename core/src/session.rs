//! # Session
//!
//! Two pieces of state survive between requests: the short-lived access token,
//! kept in memory, and the refresh token, an HTTP-only cookie the backend sets on
//! login. The cookie lives in a [`Jar`] shared with the HTTP client so it is sent
//! automatically to the refresh endpoint; callers never handle it as a token.

use std::sync::{Arc, RwLock};

use padron_common::session::SessionSnapshot;
use padron_protocols::jwt::{self, Claims};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

pub struct Session {
    access: RwLock<Option<String>>,
    email: RwLock<Option<String>>,
    jar: Arc<Jar>,
    cookie_url: Url,
}

impl Session {
    /// `cookie_url` is the refresh endpoint: the cookies that matter are the ones sent there.
    pub fn new(cookie_url: Url) -> Self {
        Self {
            access: RwLock::new(None),
            email: RwLock::new(None),
            jar: Arc::new(Jar::default()),
            cookie_url,
        }
    }

    pub fn jar(&self) -> Arc<Jar> {
        self.jar.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.access.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.access.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear_access_token(&self) {
        if let Ok(mut guard) = self.access.write() {
            *guard = None;
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn email(&self) -> Option<String> {
        self.email.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set_email(&self, email: Option<String>) {
        if let Ok(mut guard) = self.email.write() {
            *guard = email;
        }
    }

    /// Claims of the current access token, when there is one and it decodes.
    pub fn claims(&self) -> Option<Claims> {
        self.access_token()
            .and_then(|token| jwt::decode_claims(&token).ok())
    }

    /// The `Cookie` header the jar would send to the refresh endpoint.
    pub fn refresh_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.cookie_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .filter(|value| !value.is_empty())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            access_token: self.access_token(),
            refresh_cookie: self.refresh_cookie(),
            email: self.email(),
        }
    }

    /// Restores a previously saved session into memory and the jar.
    pub fn seed(&self, snapshot: &SessionSnapshot) {
        match &snapshot.access_token {
            Some(token) => self.set_access_token(token.clone()),
            None => self.clear_access_token(),
        }
        self.set_email(snapshot.email.clone());

        if let Some(header) = &snapshot.refresh_cookie {
            for pair in cookie_pairs(header) {
                self.jar
                    .add_cookie_str(&format!("{pair}; Path=/; HttpOnly"), &self.cookie_url);
            }
        }
    }

    /// Expires every cookie the jar holds for the refresh endpoint.
    ///
    /// The jar has no removal API, so this stores expired copies; cookies the
    /// server scoped to a narrower path may survive until the process exits.
    pub fn forget_cookies(&self) {
        let Some(header) = self.refresh_cookie() else {
            return;
        };
        for pair in cookie_pairs(&header) {
            if let Some((name, _)) = pair.split_once('=') {
                self.jar
                    .add_cookie_str(&format!("{name}=; Max-Age=0; Path=/"), &self.cookie_url);
            }
        }
    }

    /// Drops the token, the email and the cookies.
    pub fn clear(&self) {
        self.clear_access_token();
        self.set_email(None);
        self.forget_cookies();
    }
}

fn cookie_pairs(header: &str) -> impl Iterator<Item = &str> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| pair.contains('='))
}
