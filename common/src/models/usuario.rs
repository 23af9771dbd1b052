use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rol {
    #[serde(default)]
    pub id: Option<i64>,
    pub nombre: String,
}

/// The company a user account belongs to, as embedded in `usuarios/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpresaResumen {
    pub id: i64,
    #[serde(default)]
    pub razon_social: Option<String>,
}

/// The authenticated account as returned by `core/usuarios/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub rol: Option<Rol>,
    #[serde(default)]
    pub empresa: Option<EmpresaResumen>,
}

impl Usuario {
    /// "Nombre Apellido", falling back to the email when both are blank.
    pub fn display_name(&self) -> String {
        let full = [self.nombre.as_deref(), self.apellido.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<&str>>()
            .join(" ");

        if full.is_empty() { self.email.clone() } else { full }
    }

    pub fn rol_nombre(&self) -> Option<&str> {
        self.rol.as_ref().map(|rol| rol.nombre.as_str())
    }
}
