//! # Empresa
//!
//! The company record at the center of the registry. A company is classified as
//! a producer of goods, a service provider or both ([`TipoEmpresa`]); older
//! backend deployments expose a separate endpoint per kind.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cuit;
use crate::models::{
    ActividadPromocion, CategoriaMatriz, Contacto, Producto, Referencia, Servicio,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoEmpresa {
    #[serde(alias = "PRODUCTO", alias = "Producto")]
    Producto,
    #[serde(alias = "SERVICIO", alias = "Servicio")]
    Servicio,
    #[serde(alias = "MIXTA", alias = "Mixta")]
    Mixta,
}

impl TipoEmpresa {
    pub const ALL: [TipoEmpresa; 3] = [
        TipoEmpresa::Producto,
        TipoEmpresa::Servicio,
        TipoEmpresa::Mixta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoEmpresa::Producto => "producto",
            TipoEmpresa::Servicio => "servicio",
            TipoEmpresa::Mixta => "mixta",
        }
    }
}

impl fmt::Display for TipoEmpresa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoEmpresa {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "producto" | "productos" => Ok(TipoEmpresa::Producto),
            "servicio" | "servicios" => Ok(TipoEmpresa::Servicio),
            "mixta" | "mixto" => Ok(TipoEmpresa::Mixta),
            _ => Err(format!("invalid company type: {s} (expected producto, servicio or mixta)")),
        }
    }
}

/// A company as returned by any of the `empresas` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empresa {
    pub id: i64,
    #[serde(default)]
    pub razon_social: String,
    #[serde(default)]
    pub nombre_fantasia: Option<String>,
    #[serde(default)]
    pub cuit: String,
    #[serde(default)]
    pub tipo_empresa: Option<TipoEmpresa>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub sitio_web: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub departamento: Option<Referencia>,
    #[serde(default)]
    pub municipio: Option<Referencia>,
    #[serde(default)]
    pub localidad: Option<Referencia>,
    #[serde(default)]
    pub rubro: Option<Referencia>,
    #[serde(default)]
    pub subrubro: Option<Referencia>,
    #[serde(default)]
    pub categoria_matriz: Option<CategoriaMatriz>,
    #[serde(default)]
    pub puntaje_matriz: Option<f64>,
    #[serde(default)]
    pub exporta: Option<bool>,
    /// Soft-delete flag. Deleted companies stay restorable.
    #[serde(default)]
    pub eliminado: bool,
    #[serde(default)]
    pub fecha_creacion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_actualizacion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub productos: Vec<Producto>,
    #[serde(default)]
    pub servicios: Vec<Servicio>,
    #[serde(default)]
    pub contactos: Vec<Contacto>,
    #[serde(default)]
    pub actividades_promocion: Vec<ActividadPromocion>,
}

impl Empresa {
    /// Trade name when present, legal name otherwise.
    pub fn display_name(&self) -> &str {
        match self.nombre_fantasia.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.razon_social,
        }
    }

    pub fn contacto_principal(&self) -> Option<&Contacto> {
        self.contactos
            .iter()
            .find(|c| c.es_principal)
            .or_else(|| self.contactos.first())
    }
}

/// Creation payload. Only [`NuevaEmpresa::validate`] stands between this and the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NuevaEmpresa {
    pub razon_social: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_fantasia: Option<String>,
    pub cuit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_empresa: Option<TipoEmpresa>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitio_web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departamento: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipio: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localidad: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubro: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subrubro: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub productos: Vec<Producto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servicios: Vec<Servicio>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contactos: Vec<Contacto>,
}

impl NuevaEmpresa {
    /// Names every required field that is blank or malformed.
    ///
    /// Required: `razon_social`, `cuit` (11 digits once `-` is stripped),
    /// `tipo_empresa`, `email` (must contain `@`), `departamento`, `rubro`.
    pub fn validate(&self) -> Result<(), Vec<&'static str>> {
        let mut fields: Vec<&'static str> = Vec::new();

        if self.razon_social.trim().is_empty() {
            fields.push("razon_social");
        }
        if !cuit::is_valid(&self.cuit) {
            fields.push("cuit");
        }
        if self.tipo_empresa.is_none() {
            fields.push("tipo_empresa");
        }
        if !self.email.contains('@') {
            fields.push("email");
        }
        if self.departamento.is_none() {
            fields.push("departamento");
        }
        if self.rubro.is_none() {
            fields.push("rubro");
        }

        if fields.is_empty() { Ok(()) } else { Err(fields) }
    }

    /// Returns the payload with the CUIT reduced to bare digits.
    pub fn normalized(mut self) -> Self {
        if let Some(digits) = cuit::normalize(&self.cuit) {
            self.cuit = digits;
        }
        self.razon_social = self.razon_social.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }
}
