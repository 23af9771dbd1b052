use std::path::PathBuf;

use anyhow::Context;
use colored::*;
use padron_common::config::Config;
use padron_core::Area;
use padron_core::services::{EmpresaFiltro, ExportService, Formato};

use crate::commands::{authorize, connect};
use crate::success;
use crate::terminal::{colors, print, spinner};

pub async fn run(
    formato: Formato,
    ficha: Option<i64>,
    output: Option<PathBuf>,
    filtro: EmpresaFiltro,
    cfg: &Config,
) -> anyhow::Result<()> {
    let client = connect(cfg).await?;
    authorize(&client, Area::Exportar).await?;
    let service = ExportService::new(client);

    let (blob, fallback) = match ficha {
        Some(id) => {
            let blob = spinner::run("Rendering company sheet...", cfg.quiet, service.ficha(id)).await?;
            (blob, format!("empresa-{id}.pdf"))
        }
        None => {
            let blob = spinner::run("Exporting companies...", cfg.quiet, service.empresas(formato, &filtro)).await?;
            (blob, ExportService::default_filename(formato))
        }
    };

    if blob.is_empty() {
        print::print_status("The server returned an empty file");
    }

    let path = output.unwrap_or_else(|| PathBuf::from(blob.filename_or(&fallback)));
    tokio::fs::write(&path, &blob.bytes)
        .await
        .with_context(|| format!("cannot write {}", path.display()))?;

    success!(
        "Saved {} ({} bytes)",
        path.display().to_string().color(colors::PRIMARY).bold(),
        blob.len()
    );
    Ok(())
}
