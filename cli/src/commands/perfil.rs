use padron_common::config::Config;
use padron_core::services::EmpresaService;
use padron_core::{ApiError, Area};

use crate::commands::{PerfilAction, authorize, connect, empresas, parse_assignments};
use crate::success;

pub async fn run(action: PerfilAction, cfg: &Config) -> anyhow::Result<()> {
    let client = connect(cfg).await?;
    let ctx = authorize(&client, Area::Perfil).await?;
    let service = EmpresaService::new(client.clone());

    let result = match action {
        PerfilAction::Show => service.mi_empresa(&ctx).await,
        PerfilAction::Set { cambios } => {
            let cambios = parse_assignments(&cambios)?;
            service.update_mi_empresa(&ctx, cambios).await
        }
    };

    match result {
        Ok(empresa) => {
            success!("Profile of {}", empresa.display_name());
            empresas::show(&empresa, cfg)
        }
        Err(ApiError::Validation { fields }) => {
            anyhow::bail!("these fields are managed by the registry: {}", fields.join(", "))
        }
        Err(e) => Err(e.into()),
    }
}
