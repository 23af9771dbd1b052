//! Geography and industry catalogs used to classify a company.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departamento {
    pub id: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipio {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub departamento: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localidad {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub municipio: Option<i64>,
}

/// Industry category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubro {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub tipo: Option<String>,
}

/// Industry sub-category, always scoped to a [`Rubro`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRubro {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub rubro: Option<i64>,
}
