//! Endpoint paths, relative to the configured base URL.
//!
//! The backend is mid-migration from one endpoint per company kind
//! (`empresas-producto`, `empresas-servicio`, `empresas-mixta`) to a unified
//! `empresas` endpoint, so company paths come in ordered variant lists:
//! unified first, legacy after.

use padron_common::models::TipoEmpresa;

pub const LOGIN: &str = "core/auth/login/";
pub const REFRESH: &str = "core/auth/refresh/";
pub const LOGOUT: &str = "core/auth/logout/";
pub const ME: &str = "core/usuarios/me/";

pub const EMPRESAS: &str = "empresas/";
pub const EXPORT_CSV: &str = "empresas/exportar/csv/";
pub const EXPORT_PDF: &str = "empresas/exportar/pdf/";

pub const DEPARTAMENTOS: &str = "geografia/departamentos/";
pub const MUNICIPIOS: &str = "geografia/municipios/";
pub const LOCALIDADES: &str = "geografia/localidades/";
pub const RUBROS: &str = "rubros/";
pub const SUBRUBROS: &str = "subrubros/";

/// Collection path of the legacy endpoint serving one kind of company.
pub fn legacy_collection(tipo: TipoEmpresa) -> String {
    format!("empresas-{}/", tipo.as_str())
}

pub fn empresa(id: i64) -> String {
    format!("{EMPRESAS}{id}/")
}

pub fn restore(id: i64) -> String {
    format!("{EMPRESAS}{id}/restore/")
}

pub fn ficha_pdf(id: i64) -> String {
    format!("{EMPRESAS}{id}/pdf/")
}

/// Item paths to try, in order, when the kind of company is unknown.
pub fn empresa_variants(id: i64) -> Vec<String> {
    let mut paths = vec![empresa(id)];
    paths.extend(
        TipoEmpresa::ALL
            .iter()
            .map(|tipo| format!("{}{id}/", legacy_collection(*tipo))),
    );
    paths
}

/// Collection paths to try when creating a company of the given kind.
pub fn collection_variants(tipo: TipoEmpresa) -> Vec<String> {
    vec![EMPRESAS.to_string(), legacy_collection(tipo)]
}

/// Joins `path` onto `base`, tolerating slashes on either side.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
