//! # Application Services
//!
//! Use cases built on [`ApiClient`](crate::client::ApiClient). Each service holds
//! a shared handle to the client, so they are cheap to build per command.
//!
//! * [`empresas::EmpresaService`]: company lifecycle, including the endpoint
//!   fallback chain across the unified and legacy company endpoints.
//! * [`catalogo::CatalogService`]: geography and industry lookups.
//! * [`exportar::ExportService`]: CSV/PDF downloads.

pub mod catalogo;
pub mod empresas;
pub mod exportar;

pub use catalogo::CatalogService;
pub use empresas::{EmpresaFiltro, EmpresaService};
pub use exportar::{ExportService, Formato};
