//! # Auth Context
//!
//! The registry distinguishes three kinds of accounts. Administrators and staff
//! review every company; company accounts only see their own profile. The kind
//! is decoded from the account record (`core/usuarios/me/`) or, offline, from
//! the access token's claims. First match wins:
//!
//! 1. superuser flag, or a role named admin/administrador/superadmin → [`UserType::Admin`]
//! 2. staff flag, or a role named staff/funcionario/moderador/operador → [`UserType::Staff`]
//! 3. anything else → [`UserType::Empresa`]

use std::fmt;

use padron_common::models::Usuario;
use padron_protocols::jwt::{self, Claims};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::Session;

const ADMIN_ROLES: [&str; 3] = ["admin", "administrador", "superadmin"];
const STAFF_ROLES: [&str; 4] = ["staff", "funcionario", "moderador", "operador"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    Admin,
    Staff,
    Empresa,
}

impl UserType {
    pub fn decode<'a>(
        is_superuser: bool,
        is_staff: bool,
        roles: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let roles: Vec<String> = roles
            .into_iter()
            .map(|role| role.trim().to_lowercase())
            .collect();
        let has_any = |names: &[&str]| roles.iter().any(|role| names.contains(&role.as_str()));

        if is_superuser || has_any(&ADMIN_ROLES[..]) {
            UserType::Admin
        } else if is_staff || has_any(&STAFF_ROLES[..]) {
            UserType::Staff
        } else {
            UserType::Empresa
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Staff => "staff",
            UserType::Empresa => "empresa",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections of the application that are gated by account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Dashboard,
    Empresas,
    EmpresaAlta,
    Exportar,
    Catalogo,
    Perfil,
}

impl Area {
    pub fn allows(&self, user_type: UserType) -> bool {
        match user_type {
            UserType::Admin => true,
            UserType::Staff => !matches!(self, Area::EmpresaAlta),
            UserType::Empresa => matches!(self, Area::Perfil | Area::Catalogo),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Dashboard => "the dashboard",
            Area::Empresas => "company management",
            Area::EmpresaAlta => "company registration",
            Area::Exportar => "exports",
            Area::Catalogo => "catalogs",
            Area::Perfil => "the company profile",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_type: UserType,
    pub usuario: Option<Usuario>,
    pub claims: Option<Claims>,
}

impl AuthContext {
    pub fn from_usuario(usuario: Usuario) -> Self {
        let user_type = UserType::decode(usuario.is_superuser, usuario.is_staff, usuario.rol_nombre());
        Self {
            user_type,
            usuario: Some(usuario),
            claims: None,
        }
    }

    pub fn from_claims(claims: Claims) -> Self {
        let user_type = UserType::decode(
            claims.is_superuser.unwrap_or(false),
            claims.is_staff.unwrap_or(false),
            claims.role_names(),
        );
        Self {
            user_type,
            usuario: None,
            claims: Some(claims),
        }
    }

    /// Decodes the current access token without contacting the backend.
    pub fn from_session(session: &Session) -> Result<Self, ApiError> {
        let token = session.access_token().ok_or(ApiError::NotAuthenticated)?;
        let claims = jwt::decode_claims(&token).map_err(|e| ApiError::Decode(format!("access token: {e}")))?;
        Ok(Self::from_claims(claims))
    }

    /// Asks the backend who is logged in. Authoritative, unlike [`AuthContext::from_session`].
    pub async fn load(client: &ApiClient) -> Result<Self, ApiError> {
        if !client.session().is_authenticated() {
            return Err(ApiError::NotAuthenticated);
        }
        let usuario = client.me().await?;
        let mut ctx = Self::from_usuario(usuario);
        ctx.claims = client.session().claims();
        Ok(ctx)
    }

    pub fn can_access(&self, area: Area) -> bool {
        area.allows(self.user_type)
    }

    pub fn require(&self, area: Area) -> Result<(), ApiError> {
        if self.can_access(area) {
            Ok(())
        } else {
            Err(ApiError::Forbidden {
                area,
                role: self.user_type,
            })
        }
    }

    /// Where an account lands after logging in.
    pub fn home(&self) -> Area {
        match self.user_type {
            UserType::Admin | UserType::Staff => Area::Dashboard,
            UserType::Empresa => Area::Perfil,
        }
    }

    /// The company this account belongs to, from the account record or the token.
    pub fn empresa_id(&self) -> Option<i64> {
        self.usuario
            .as_ref()
            .and_then(|u| u.empresa.as_ref().map(|e| e.id))
            .or_else(|| self.claims.as_ref().and_then(|c| c.empresa_id))
    }
}
