//! Records embedded in an [`Empresa`](super::Empresa): what it sells, who to
//! talk to and which promotion activities it took part in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub posicion_arancelaria: Option<String>,
    #[serde(default)]
    pub capacidad_productiva: Option<String>,
    #[serde(default)]
    pub unidad_medida: Option<String>,
    #[serde(default)]
    pub es_principal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Servicio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub tipo_servicio: Option<String>,
    #[serde(default)]
    pub sectores: Vec<String>,
    #[serde(default)]
    pub es_principal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contacto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub cargo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub es_principal: bool,
}

/// Participation in a trade fair, mission or any other promotion activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActividadPromocion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub tipo: String,
    #[serde(default)]
    pub lugar: Option<String>,
    #[serde(default)]
    pub anio: Option<i32>,
    #[serde(default)]
    pub observaciones: Option<String>,
}
