//! # Exports
//!
//! Bulk listings as CSV or PDF, and the single-company PDF sheet. The listing
//! filters are the same ones [`EmpresaService::list`](super::EmpresaService::list)
//! accepts, minus pagination.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use padron_protocols::endpoints;
use tracing::info;

use super::EmpresaFiltro;
use crate::client::{ApiClient, Blob, RequestSpec};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formato {
    Csv,
    Pdf,
}

impl Formato {
    pub fn extension(&self) -> &'static str {
        match self {
            Formato::Csv => "csv",
            Formato::Pdf => "pdf",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            Formato::Csv => endpoints::EXPORT_CSV,
            Formato::Pdf => endpoints::EXPORT_PDF,
        }
    }
}

impl fmt::Display for Formato {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Formato {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Formato::Csv),
            "pdf" => Ok(Formato::Pdf),
            other => Err(format!("unknown export format '{other}' (expected csv or pdf)")),
        }
    }
}

pub struct ExportService {
    client: Arc<ApiClient>,
}

impl ExportService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn empresas(&self, formato: Formato, filtro: &EmpresaFiltro) -> Result<Blob, ApiError> {
        let filtro = EmpresaFiltro {
            pagina: None,
            ..filtro.clone()
        };
        let blob = self
            .client
            .download(filtro.apply(RequestSpec::get(formato.endpoint())))
            .await?;
        info!(%formato, size = blob.len(), "export downloaded");
        Ok(blob)
    }

    /// The printable sheet of one company.
    pub async fn ficha(&self, id: i64) -> Result<Blob, ApiError> {
        self.client
            .download(RequestSpec::get(endpoints::ficha_pdf(id)))
            .await
    }

    pub fn default_filename(formato: Formato) -> String {
        format!("empresas.{}", formato.extension())
    }
}
