//! Reference data: the geographic hierarchy and the industry classification.

use std::sync::Arc;

use padron_common::models::{Departamento, Localidad, Municipio, Rubro, SubRubro};
use padron_protocols::endpoints;
use padron_protocols::listing::Listing;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, RequestSpec};
use crate::error::ApiError;

pub struct CatalogService {
    client: Arc<ApiClient>,
}

impl CatalogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn departamentos(&self) -> Result<Vec<Departamento>, ApiError> {
        self.fetch(RequestSpec::get(endpoints::DEPARTAMENTOS)).await
    }

    pub async fn municipios(&self, departamento: Option<i64>) -> Result<Vec<Municipio>, ApiError> {
        self.fetch(RequestSpec::get(endpoints::MUNICIPIOS).query_opt("departamento", departamento))
            .await
    }

    pub async fn localidades(&self, municipio: Option<i64>) -> Result<Vec<Localidad>, ApiError> {
        self.fetch(RequestSpec::get(endpoints::LOCALIDADES).query_opt("municipio", municipio))
            .await
    }

    pub async fn rubros(&self) -> Result<Vec<Rubro>, ApiError> {
        self.fetch(RequestSpec::get(endpoints::RUBROS)).await
    }

    pub async fn subrubros(&self, rubro: Option<i64>) -> Result<Vec<SubRubro>, ApiError> {
        self.fetch(RequestSpec::get(endpoints::SUBRUBROS).query_opt("rubro", rubro))
            .await
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestSpec) -> Result<Vec<T>, ApiError> {
        let listing: Option<Listing<T>> = self.client.send(req).await?;
        Ok(listing.map(Listing::into_items).unwrap_or_default())
    }
}
