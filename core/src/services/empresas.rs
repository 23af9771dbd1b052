//! # Company Service
//!
//! The backend is migrating from one endpoint per company kind to a unified
//! `empresas` endpoint. Lookups, updates and creations therefore walk an ordered
//! list of endpoint variants: the first success wins and ends the walk, a 404
//! moves on to the next variant, and any other failure ends the walk with that
//! failure.

use std::sync::Arc;

use padron_common::cuit;
use padron_common::models::{CategoriaMatriz, Empresa, NuevaEmpresa, TipoEmpresa};
use padron_protocols::endpoints;
use padron_protocols::listing::Listing;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::auth::{Area, AuthContext};
use crate::client::{ApiClient, RequestSpec};
use crate::error::ApiError;

/// Fields a company account may not change on its own profile.
const PROTECTED_FIELDS: [&str; 6] = [
    "id",
    "cuit",
    "eliminado",
    "categoria_matriz",
    "puntaje_matriz",
    "fecha_creacion",
];

#[derive(Debug, Clone, Default)]
pub struct EmpresaFiltro {
    pub buscar: Option<String>,
    pub rubro: Option<i64>,
    pub departamento: Option<i64>,
    pub tipo: Option<TipoEmpresa>,
    pub categoria: Option<CategoriaMatriz>,
    pub incluir_eliminadas: bool,
    pub pagina: Option<u32>,
}

impl EmpresaFiltro {
    pub fn apply(&self, req: RequestSpec) -> RequestSpec {
        let req = req
            .query_opt("search", self.buscar.as_deref().filter(|s| !s.trim().is_empty()))
            .query_opt("rubro", self.rubro)
            .query_opt("departamento", self.departamento)
            .query_opt("tipo_empresa", self.tipo)
            .query_opt("categoria_matriz", self.categoria.map(|c| c.label()))
            .query_opt("page", self.pagina);

        if self.incluir_eliminadas {
            req.query("incluir_eliminadas", "true")
        } else {
            req
        }
    }
}

pub struct EmpresaService {
    client: Arc<ApiClient>,
}

impl EmpresaService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filtro: &EmpresaFiltro) -> Result<Listing<Empresa>, ApiError> {
        let req = filtro.apply(RequestSpec::get(endpoints::EMPRESAS));
        Ok(self.client.send(req).await?.unwrap_or_default())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Empresa, ApiError> {
        let (path, empresa) = self
            .first_available(endpoints::empresa_variants(id), |path| RequestSpec::get(path))
            .await?;
        empresa.ok_or_else(|| ApiError::Decode(format!("empty body from {path}")))
    }

    /// Validates locally first; an invalid payload never reaches the backend.
    pub async fn create(&self, nueva: NuevaEmpresa) -> Result<Empresa, ApiError> {
        nueva.validate().map_err(ApiError::validation)?;
        let nueva = nueva.normalized();
        let tipo = nueva.tipo_empresa.ok_or_else(|| ApiError::validation(["tipo_empresa"]))?;
        let body = serde_json::to_value(&nueva).map_err(|e| ApiError::Encode(e.to_string()))?;

        let (path, created) = self
            .first_available(endpoints::collection_variants(tipo), |path| {
                RequestSpec::post(path).with_body(body.clone())
            })
            .await?;

        let empresa: Empresa = created.ok_or_else(|| ApiError::Decode(format!("empty body from {path}")))?;
        info!(id = empresa.id, cuit = %empresa.cuit, "company registered");
        Ok(empresa)
    }

    /// Applies a partial update. A 204 answer is followed by a fetch from the
    /// endpoint that accepted the change.
    pub async fn update(&self, id: i64, cambios: Map<String, Value>) -> Result<Empresa, ApiError> {
        if cambios.is_empty() {
            return self.get_by_id(id).await;
        }
        let cambios = normalize_cuit(cambios)?;
        let body = Value::Object(cambios);

        let (path, updated) = self
            .first_available(endpoints::empresa_variants(id), |path| {
                RequestSpec::patch(path).with_body(body.clone())
            })
            .await?;

        let empresa = match updated {
            Some(empresa) => empresa,
            None => self
                .client
                .get(&path)
                .await?
                .ok_or_else(|| ApiError::Decode(format!("empty body from {path}")))?,
        };
        info!(id, endpoint = %path, "company updated");
        Ok(empresa)
    }

    /// Soft delete: the record is flagged `eliminado` and stays restorable.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&endpoints::empresa(id)).await?;
        info!(id, "company deleted");
        Ok(())
    }

    pub async fn restore(&self, id: i64) -> Result<Empresa, ApiError> {
        let restored: Option<Empresa> = self
            .client
            .send(RequestSpec::post(endpoints::restore(id)))
            .await?;
        info!(id, "company restored");
        match restored {
            Some(empresa) => Ok(empresa),
            None => self.get_by_id(id).await,
        }
    }

    /// The profile of the company the logged-in account belongs to.
    pub async fn mi_empresa(&self, ctx: &AuthContext) -> Result<Empresa, ApiError> {
        ctx.require(Area::Perfil)?;
        let id = ctx.empresa_id().ok_or(ApiError::NoEmpresa)?;
        self.get_by_id(id).await
    }

    /// Edits the caller's own company. Identity and classification fields are
    /// rejected before anything is sent.
    pub async fn update_mi_empresa(
        &self,
        ctx: &AuthContext,
        cambios: Map<String, Value>,
    ) -> Result<Empresa, ApiError> {
        ctx.require(Area::Perfil)?;
        let id = ctx.empresa_id().ok_or(ApiError::NoEmpresa)?;

        let protected: Vec<&str> = PROTECTED_FIELDS
            .iter()
            .copied()
            .filter(|field| cambios.contains_key(*field))
            .collect();
        if !protected.is_empty() {
            return Err(ApiError::validation(protected));
        }

        self.update(id, cambios).await
    }

    async fn first_available<T, F>(
        &self,
        paths: Vec<String>,
        build: F,
    ) -> Result<(String, Option<T>), ApiError>
    where
        T: DeserializeOwned,
        F: Fn(String) -> RequestSpec,
    {
        let mut last: Option<ApiError> = None;

        for path in paths {
            match self.client.send::<T>(build(path.clone())).await {
                Ok(body) => return Ok((path, body)),
                Err(e) if e.is_not_found() => {
                    debug!(%path, "endpoint answered 404, trying next variant");
                    last = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last.unwrap_or(ApiError::Http {
            status: 404,
            message: "No encontrado.".to_string(),
            silent: true,
        }))
    }
}

/// Rejects a malformed CUIT and reduces a valid one to bare digits.
fn normalize_cuit(mut cambios: Map<String, Value>) -> Result<Map<String, Value>, ApiError> {
    if let Some(Value::String(raw)) = cambios.get("cuit") {
        let Some(digits) = cuit::normalize(raw) else {
            return Err(ApiError::validation(["cuit"]));
        };
        cambios.insert("cuit".to_string(), Value::String(digits));
    }
    Ok(cambios)
}
