use std::fmt;

use serde::{Deserialize, Serialize};

/// A foreign key as the backend sends it.
///
/// Write serializers return bare ids (`"rubro": 4`) while read serializers nest
/// the related record (`"rubro": {"id": 4, "nombre": "Metalmecánica"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Referencia {
    Id(i64),
    Detalle {
        id: i64,
        #[serde(default)]
        nombre: Option<String>,
    },
}

impl Referencia {
    pub fn id(&self) -> i64 {
        match self {
            Referencia::Id(id) => *id,
            Referencia::Detalle { id, .. } => *id,
        }
    }

    pub fn nombre(&self) -> Option<&str> {
        match self {
            Referencia::Id(_) => None,
            Referencia::Detalle { nombre, .. } => nombre.as_deref(),
        }
    }
}

impl From<i64> for Referencia {
    fn from(id: i64) -> Self {
        Referencia::Id(id)
    }
}

impl fmt::Display for Referencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nombre() {
            Some(nombre) => write!(f, "{} (#{})", nombre, self.id()),
            None => write!(f, "#{}", self.id()),
        }
    }
}
