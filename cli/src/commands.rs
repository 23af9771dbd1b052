pub mod catalogo;
pub mod empresas;
pub mod exportar;
pub mod perfil;
pub mod sesion;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use padron_common::config::Config;
use padron_common::models::{CategoriaMatriz, TipoEmpresa};
use padron_common::session::FileSessionStore;
use padron_core::services::{EmpresaFiltro, Formato};
use padron_core::{ApiClient, ApiError, Area, AuthContext};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "padron")]
#[command(about = "Command line client for the business registry.")]
pub struct CommandLine {
    /// Base URL of the registry API (default: $PADRON_SERVER, then ~/.padron/config.toml)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Less decoration; repeat for records only
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Print raw JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and keep the session in ~/.padron/session.toml
    Login {
        email: String,
        /// Prompted for when absent
        #[arg(long, env = "PADRON_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Close the session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Manage registered companies
    #[command(alias = "e")]
    Empresas {
        #[command(subcommand)]
        action: EmpresaAction,
    },
    /// View or edit your own company profile
    #[command(alias = "p")]
    Perfil {
        #[command(subcommand)]
        action: PerfilAction,
    },
    /// Geography and industry lookups
    #[command(alias = "c")]
    Catalogo {
        #[command(subcommand)]
        action: CatalogoAction,
    },
    /// Download the company listing, or one company's sheet
    #[command(alias = "x")]
    Exportar {
        /// csv or pdf
        #[arg(default_value = "csv")]
        formato: Formato,
        /// Export the PDF sheet of a single company instead
        #[arg(long, conflicts_with_all = ["buscar", "rubro", "departamento", "tipo", "categoria", "eliminadas"])]
        ficha: Option<i64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filtros: FiltroArgs,
    },
    /// Save the server URL to ~/.padron/config.toml
    Servidor { url: String },
}

#[derive(Subcommand)]
pub enum EmpresaAction {
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filtros: FiltroArgs,
        #[arg(long)]
        pagina: Option<u32>,
    },
    Show { id: i64 },
    Create(NuevaEmpresaArgs),
    /// Apply `campo=valor` (text) or `campo:=json` changes
    Update {
        id: i64,
        #[arg(required = true)]
        cambios: Vec<String>,
    },
    Delete {
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    Restore { id: i64 },
}

#[derive(Subcommand)]
pub enum PerfilAction {
    Show,
    /// Apply `campo=valor` (text) or `campo:=json` changes
    Set {
        #[arg(required = true)]
        cambios: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum CatalogoAction {
    Departamentos,
    Municipios {
        #[arg(long)]
        departamento: Option<i64>,
    },
    Localidades {
        #[arg(long)]
        municipio: Option<i64>,
    },
    Rubros,
    Subrubros {
        #[arg(long)]
        rubro: Option<i64>,
    },
}

#[derive(Args, Clone, Default)]
pub struct FiltroArgs {
    /// Free-text search over name, trade name and CUIT
    #[arg(long, short = 's')]
    pub buscar: Option<String>,
    #[arg(long)]
    pub rubro: Option<i64>,
    #[arg(long)]
    pub departamento: Option<i64>,
    #[arg(long)]
    pub tipo: Option<TipoEmpresa>,
    /// Exportadora, "Potencial Exportadora" or "Etapa Inicial"
    #[arg(long)]
    pub categoria: Option<CategoriaMatriz>,
    /// Include soft-deleted companies
    #[arg(long)]
    pub eliminadas: bool,
}

impl FiltroArgs {
    pub fn into_filtro(self, pagina: Option<u32>) -> EmpresaFiltro {
        EmpresaFiltro {
            buscar: self.buscar,
            rubro: self.rubro,
            departamento: self.departamento,
            tipo: self.tipo,
            categoria: self.categoria,
            incluir_eliminadas: self.eliminadas,
            pagina,
        }
    }
}

#[derive(Args)]
pub struct NuevaEmpresaArgs {
    #[arg(long)]
    pub razon_social: String,
    #[arg(long)]
    pub cuit: String,
    #[arg(long)]
    pub tipo: Option<TipoEmpresa>,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub departamento: Option<i64>,
    #[arg(long)]
    pub rubro: Option<i64>,
    #[arg(long)]
    pub nombre_fantasia: Option<String>,
    #[arg(long)]
    pub telefono: Option<String>,
    #[arg(long)]
    pub sitio_web: Option<String>,
    #[arg(long)]
    pub direccion: Option<String>,
    #[arg(long)]
    pub municipio: Option<i64>,
    #[arg(long)]
    pub localidad: Option<i64>,
    #[arg(long)]
    pub subrubro: Option<i64>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Builds the client and seeds it with the persisted session, if any.
pub async fn connect(cfg: &Config) -> anyhow::Result<Arc<ApiClient>> {
    let store = Arc::new(FileSessionStore::new(FileSessionStore::default_path()));
    let client = ApiClient::new(cfg)
        .with_context(|| format!("cannot build a client for {}", cfg.server))?
        .with_store(store);
    client.resume().await.context("cannot read the saved session")?;
    Ok(Arc::new(client))
}

/// Resolves who is logged in and checks they may enter `area`.
pub async fn authorize(client: &ApiClient, area: Area) -> anyhow::Result<AuthContext> {
    let ctx = match AuthContext::load(client).await {
        Ok(ctx) => ctx,
        Err(ApiError::NotAuthenticated | ApiError::SessionExpired) => {
            bail!("not logged in, run `padron login <email>` first")
        }
        Err(e) => return Err(e.into()),
    };
    ctx.require(area)?;
    Ok(ctx)
}

/// Parses `campo=valor` as text and `campo:=valor` as raw JSON.
pub fn parse_assignments(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut cambios = Map::new();

    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("expected campo=valor, got '{pair}'");
        };
        let (key, value) = match key.strip_suffix(':') {
            Some(key) => {
                let value: Value = serde_json::from_str(raw)
                    .with_context(|| format!("'{raw}' is not valid JSON for {key}"))?;
                (key, value)
            }
            None => (key, Value::String(raw.to_string())),
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("empty field name in '{pair}'");
        }
        cambios.insert(key.to_string(), value);
    }

    Ok(cambios)
}
