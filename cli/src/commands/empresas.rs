use std::time::Instant;

use anyhow::Context;
use colored::*;
use console::Term;
use padron_common::config::Config;
use padron_common::models::{Empresa, NuevaEmpresa};
use padron_core::services::EmpresaService;
use padron_core::{ApiError, Area};

use crate::commands::{EmpresaAction, NuevaEmpresaArgs, authorize, connect, parse_assignments};
use crate::terminal::{colors, format, print, spinner};
use crate::{mprint, success};

pub async fn run(action: EmpresaAction, cfg: &Config) -> anyhow::Result<()> {
    let client = connect(cfg).await?;
    let service = EmpresaService::new(client.clone());

    match action {
        EmpresaAction::List { filtros, pagina } => {
            authorize(&client, Area::Empresas).await?;
            let filtro = filtros.into_filtro(pagina);
            let start = Instant::now();
            let listing = spinner::run("Fetching companies...", cfg.quiet, service.list(&filtro)).await?;
            let total = listing.total();
            let has_more = listing.has_more();
            let empresas = listing.into_items();

            if cfg.json {
                return print::json(&empresas);
            }
            print_listing(&empresas, cfg);
            print_summary(empresas.len(), total, has_more, start, cfg);
        }
        EmpresaAction::Show { id } => {
            authorize(&client, Area::Empresas).await?;
            let empresa = spinner::run("Fetching company...", cfg.quiet, service.get_by_id(id))
                .await
                .map_err(|e| not_found(e, id))?;
            show(&empresa, cfg)?;
        }
        EmpresaAction::Create(args) => {
            authorize(&client, Area::EmpresaAlta).await?;
            let empresa = service.create(args.into_nueva()).await?;
            if cfg.json {
                return print::json(&empresa);
            }
            success!(
                "Registered {} with id {}",
                empresa.display_name().bold(),
                empresa.id.to_string().color(colors::ACCENT)
            );
        }
        EmpresaAction::Update { id, cambios } => {
            authorize(&client, Area::Empresas).await?;
            let cambios = parse_assignments(&cambios)?;
            let empresa = service.update(id, cambios).await.map_err(|e| not_found(e, id))?;
            success!("Updated {}", empresa.display_name().bold());
            show(&empresa, cfg)?;
        }
        EmpresaAction::Delete { id, yes } => {
            authorize(&client, Area::Empresas).await?;
            if !yes && !confirm(&format!("Delete company #{id}?"))? {
                print::print_status("Cancelled");
                return Ok(());
            }
            service.delete(id).await.map_err(|e| not_found(e, id))?;
            success!("Company #{id} deleted, `padron empresas restore {id}` brings it back");
        }
        EmpresaAction::Restore { id } => {
            authorize(&client, Area::Empresas).await?;
            let empresa = service.restore(id).await.map_err(|e| not_found(e, id))?;
            success!("Restored {}", empresa.display_name().bold());
        }
    }
    Ok(())
}

pub fn show(empresa: &Empresa, cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        return print::json(empresa);
    }
    print::header("company", cfg.quiet);
    print::tree_head(empresa.id, empresa.display_name());
    print::as_tree_one_level(format::empresa_details(empresa));
    Ok(())
}

fn print_listing(empresas: &[Empresa], cfg: &Config) {
    if empresas.is_empty() {
        print::header("no companies matched", cfg.quiet);
        print::no_results(cfg.quiet);
        return;
    }

    print::header("companies", cfg.quiet);
    for (idx, empresa) in empresas.iter().enumerate() {
        print::tree_head(empresa.id, empresa.display_name());
        if cfg.quiet < 2 {
            print::as_tree_one_level(format::empresa_summary(empresa));
        }
        if idx + 1 != empresas.len() && cfg.quiet == 0 {
            mprint!();
        }
    }
}

fn print_summary(shown: usize, total: u64, has_more: bool, start: Instant, cfg: &Config) {
    if cfg.quiet > 1 || shown == 0 {
        return;
    }
    let count: ColoredString = format!("{shown} of {total}").bold().green();
    let elapsed: ColoredString = format!("{:.2}s", start.elapsed().as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Listed {count} companies in {elapsed}").color(colors::TEXT_DEFAULT);

    if cfg.quiet == 0 {
        print::fat_separator();
        print::centerln(&output.to_string());
    } else {
        success!("{}", output);
    }
    if has_more {
        print::print_status("More results available, use --pagina");
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!("{question} [y/N]: "))?;
    let answer = term.read_line().context("cannot read the answer")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn not_found(e: ApiError, id: i64) -> anyhow::Error {
    if e.is_not_found() {
        anyhow::anyhow!("company #{id} does not exist on any endpoint")
    } else {
        e.into()
    }
}

impl NuevaEmpresaArgs {
    fn into_nueva(self) -> NuevaEmpresa {
        NuevaEmpresa {
            razon_social: self.razon_social,
            nombre_fantasia: self.nombre_fantasia,
            cuit: self.cuit,
            tipo_empresa: self.tipo,
            email: self.email,
            telefono: self.telefono,
            sitio_web: self.sitio_web,
            direccion: self.direccion,
            departamento: self.departamento,
            municipio: self.municipio,
            localidad: self.localidad,
            rubro: self.rubro,
            subrubro: self.subrubro,
            ..NuevaEmpresa::default()
        }
    }
}
