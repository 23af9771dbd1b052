//! In-process stand-in for the registry backend.
//!
//! Tokens are opaque (`tok-1`, `tok-2`, ...); only the last one issued is
//! accepted. [`Backend::expire_token`] invalidates it so the next authenticated
//! request is answered 401, exactly like an expired access token.
//!
//! Company fixtures:
//! * `3`: lives on the unified endpoint; PATCH, DELETE and restore answer 204.
//! * `5`: soft-deleted; restore answers with the record.
//! * `7`: only on the legacy `empresas-servicio` endpoint.
//! * `9`: the unified endpoint fails with an HTML 500 page.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use padron_common::config::Config;
use padron_core::ApiClient;
use serde_json::{Value, json};

pub const ADMIN_EMAIL: &str = "admin@padron.gob.ar";
pub const STAFF_EMAIL: &str = "mesa@padron.gob.ar";
pub const EMPRESA_EMAIL: &str = "compras@andina.com.ar";
pub const PASSWORD: &str = "secreto";
pub const REFRESH_COOKIE: &str = "refresh_token=rt-1";
pub const DUPLICATE_CUIT: &str = "20123456786";

#[derive(Default)]
pub struct Backend {
    valid_token: Mutex<Option<String>>,
    issued: AtomicUsize,
    account: Mutex<Value>,
    refresh_calls: AtomicUsize,
    pub fail_refresh: AtomicBool,
    pub fail_logout: AtomicBool,
    hits: Mutex<Vec<String>>,
    patches: Mutex<Vec<Value>>,
}

impl Backend {
    fn issue(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let token = format!("tok-{n}");
        *self.valid_token.lock().unwrap() = Some(token.clone());
        token
    }

    pub fn expire_token(&self) {
        *self.valid_token.lock().unwrap() = None;
    }

    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// Bodies of the PATCH requests that reached a company record.
    pub fn patches(&self) -> Vec<Value> {
        self.patches.lock().unwrap().clone()
    }

    /// Every request outside login and refresh, as `METHOD path?query` relative
    /// to `/api/`. Requests rejected with 401 are included.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn clear_hits(&self) {
        self.hits.lock().unwrap().clear();
    }

    fn record(&self, method: &Method, uri: &Uri) {
        let path = uri.path().trim_start_matches("/api/");
        let entry = match uri.query() {
            Some(query) => format!("{method} {path}?{query}"),
            None => format!("{method} {path}"),
        };
        self.hits.lock().unwrap().push(entry);
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        let valid = self.valid_token.lock().unwrap().clone();

        match bearer {
            None => Err(unauthorized("Las credenciales de autenticación no se proveyeron.")),
            Some(token) if Some(token) == valid.as_deref() => Ok(()),
            Some(_) => Err(unauthorized("El token dado no es válido para ningún tipo de token")),
        }
    }
}

pub struct MockServer {
    pub backend: Arc<Backend>,
    pub base_url: String,
}

impl MockServer {
    pub async fn start() -> Self {
        let backend = Arc::new(Backend::default());
        let app = router(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            backend,
            base_url: format!("http://{addr}/api"),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            server: self.base_url.clone(),
            ..Config::default()
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).unwrap()
    }

    /// A client logged in as `email`, with the login itself left out of [`Backend::hits`].
    pub async fn logged_in(&self, email: &str) -> Arc<ApiClient> {
        let client = self.client();
        client.login(email, PASSWORD).await.unwrap();
        self.backend.clear_hits();
        Arc::new(client)
    }
}

fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/api/core/auth/login/", post(login))
        .route("/api/core/auth/refresh/", post(refresh))
        .route("/api/core/auth/logout/", post(logout))
        .route("/api/core/usuarios/me/", get(me))
        .route("/api/bloqueado/", get(bloqueado))
        .route("/api/empresas/", get(list_empresas).post(create_empresa))
        .route("/api/empresas-producto/", post(create_empresa))
        .route("/api/empresas-servicio/", post(create_empresa))
        .route("/api/empresas-mixta/", post(create_empresa))
        .route("/api/empresas/exportar/csv/", get(export_csv))
        .route("/api/empresas/:id/", get(empresa).patch(empresa).delete(empresa))
        .route("/api/empresas-producto/:id/", get(empresa).patch(empresa))
        .route("/api/empresas-servicio/:id/", get(empresa).patch(empresa))
        .route("/api/empresas-mixta/:id/", get(empresa).patch(empresa))
        .route("/api/empresas/:id/restore/", post(restore))
        .route("/api/empresas/:id/pdf/", get(ficha))
        .route("/api/geografia/municipios/", get(municipios))
        .route("/api/rubros/", get(rubros))
        .with_state(backend)
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "No encontrado." }))).into_response()
}

fn account(email: &str) -> Option<Value> {
    match email {
        ADMIN_EMAIL => Some(json!({
            "id": 1,
            "email": ADMIN_EMAIL,
            "nombre": "Laura",
            "apellido": "Gómez",
            "is_superuser": true,
            "is_staff": true,
            "rol": { "id": 1, "nombre": "Administrador" }
        })),
        STAFF_EMAIL => Some(json!({
            "id": 2,
            "email": STAFF_EMAIL,
            "is_staff": true,
            "rol": { "id": 2, "nombre": "Funcionario" }
        })),
        EMPRESA_EMAIL => Some(json!({
            "id": 12,
            "email": EMPRESA_EMAIL,
            "nombre": "Ana",
            "rol": { "id": 3, "nombre": "Empresa" },
            "empresa": { "id": 3, "razon_social": "Empresa 3 SA" }
        })),
        _ => None,
    }
}

pub fn empresa_json(id: i64, tipo: &str) -> Value {
    json!({
        "id": id,
        "razon_social": format!("Empresa {id} SA"),
        "cuit": "30712345671",
        "tipo_empresa": tipo,
        "email": "info@andina.com.ar",
        "departamento": 2,
        "rubro": { "id": 4, "nombre": "Metalmecánica" },
        "categoria_matriz": "Potencial Exportadora",
        "puntaje_matriz": 61.5,
        "eliminado": false,
        "contactos": [
            { "nombre": "Ana Pérez", "email": "ana@andina.com.ar", "es_principal": true }
        ]
    })
}

async fn login(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let Some(user) = account(email).filter(|_| password == PASSWORD) else {
        return unauthorized("Credenciales inválidas.");
    };
    *backend.account.lock().unwrap() = user.clone();
    let token = backend.issue();

    (
        [(header::SET_COOKIE, format!("{REFRESH_COOKIE}; Path=/; HttpOnly"))],
        Json(json!({ "access": token, "user": user })),
    )
        .into_response()
}

async fn refresh(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let has_cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(REFRESH_COOKIE));

    if !has_cookie || backend.fail_refresh.load(Ordering::SeqCst) {
        return unauthorized("El token dado no es válido o ha expirado");
    }
    Json(json!({ "access": backend.issue() })).into_response()
}

async fn logout(State(backend): State<Arc<Backend>>, method: Method, uri: Uri) -> Response {
    backend.record(&method, &uri);
    if backend.fail_logout.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Server Error (500)</h1>")).into_response();
    }
    backend.expire_token();
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, "refresh_token=; Max-Age=0; Path=/")],
    )
        .into_response()
}

async fn me(State(backend): State<Arc<Backend>>, method: Method, uri: Uri, headers: HeaderMap) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }
    Json(backend.account.lock().unwrap().clone()).into_response()
}

async fn bloqueado(State(backend): State<Arc<Backend>>, method: Method, uri: Uri) -> Response {
    backend.record(&method, &uri);
    unauthorized("El token dado no es válido para ningún tipo de token")
}

async fn list_empresas(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }

    let mut eliminada = empresa_json(5, "mixta");
    eliminada["eliminado"] = json!(true);
    Json(json!({
        "count": 12,
        "next": "http://testserver/api/empresas/?page=2",
        "previous": null,
        "results": [empresa_json(3, "producto"), eliminada]
    }))
    .into_response()
}

async fn create_empresa(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }

    let Some(tipo) = uri.path().trim_end_matches('/').strip_prefix("/api/empresas-") else {
        return not_found();
    };
    if body["cuit"] == DUPLICATE_CUIT {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "cuit": ["Ya existe una empresa con este CUIT."] })),
        )
            .into_response();
    }

    let mut created = body.clone();
    created["id"] = json!(50);
    created["tipo_empresa"] = json!(tipo);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn empresa(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<i64>,
    body: String,
) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }

    let coleccion = uri
        .path()
        .trim_start_matches("/api/")
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();

    if method == Method::PATCH {
        let cambios: Value = serde_json::from_str(&body).unwrap_or_default();
        backend.patches.lock().unwrap().push(cambios);
    }

    match (coleccion.as_str(), id) {
        ("empresas", 9) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<html><body><h1>Server Error (500)</h1></body></html>"),
        )
            .into_response(),
        ("empresas", 3) if method == Method::GET => Json(empresa_json(3, "producto")).into_response(),
        ("empresas", 3) => StatusCode::NO_CONTENT.into_response(),
        ("empresas-servicio", 7) => {
            let mut empresa = empresa_json(7, "servicio");
            if method == Method::PATCH {
                let cambios: Value = serde_json::from_str(&body).unwrap_or_default();
                if let (Some(target), Some(cambios)) = (empresa.as_object_mut(), cambios.as_object()) {
                    target.extend(cambios.clone());
                }
            }
            Json(empresa).into_response()
        }
        _ => not_found(),
    }
}

async fn restore(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }
    match id {
        3 => StatusCode::NO_CONTENT.into_response(),
        5 => Json(empresa_json(5, "mixta")).into_response(),
        _ => not_found(),
    }
}

async fn ficha(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"empresa-{id}.pdf\"")),
        ],
        b"%PDF-1.4\n%mock\n".to_vec(),
    )
        .into_response()
}

async fn export_csv(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"empresas.csv\"; filename*=UTF-8''padr%C3%B3n-empresas.csv",
            ),
        ],
        "id,razon_social,cuit\n3,Empresa 3 SA,30712345671\n",
    )
        .into_response()
}

async fn municipios(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }

    let all = vec![
        json!({ "id": 10, "nombre": "Capital", "departamento": 2 }),
        json!({ "id": 11, "nombre": "Godoy Cruz", "departamento": 3 }),
    ];
    let filtered: Vec<Value> = match params.get("departamento") {
        Some(dep) => all
            .into_iter()
            .filter(|m| m["departamento"].to_string() == *dep)
            .collect(),
        None => all,
    };
    Json(filtered).into_response()
}

async fn rubros(State(backend): State<Arc<Backend>>, method: Method, uri: Uri, headers: HeaderMap) -> Response {
    backend.record(&method, &uri);
    if let Err(rejection) = backend.authorize(&headers) {
        return rejection;
    }
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{ "id": 4, "nombre": "Metalmecánica", "tipo": "producto" }]
    }))
    .into_response()
}
