use colored::*;
use padron_common::config::Config;
use padron_core::Area;
use padron_core::services::CatalogService;
use serde::Serialize;

use crate::commands::{CatalogoAction, authorize, connect};
use crate::terminal::{colors, print, spinner};

pub async fn run(action: CatalogoAction, cfg: &Config) -> anyhow::Result<()> {
    let client = connect(cfg).await?;
    authorize(&client, Area::Catalogo).await?;
    let service = CatalogService::new(client);

    match action {
        CatalogoAction::Departamentos => {
            let items = spinner::run("Fetching departamentos...", cfg.quiet, service.departamentos()).await?;
            let rows = items.iter().map(|d| (d.id, d.nombre.as_str(), None)).collect();
            render("departamentos", &items, rows, cfg)
        }
        CatalogoAction::Municipios { departamento } => {
            let items = spinner::run("Fetching municipios...", cfg.quiet, service.municipios(departamento)).await?;
            let rows = items
                .iter()
                .map(|m| (m.id, m.nombre.as_str(), m.departamento.map(|p| format!("departamento #{p}"))))
                .collect();
            render("municipios", &items, rows, cfg)
        }
        CatalogoAction::Localidades { municipio } => {
            let items = spinner::run("Fetching localidades...", cfg.quiet, service.localidades(municipio)).await?;
            let rows = items
                .iter()
                .map(|l| (l.id, l.nombre.as_str(), l.municipio.map(|p| format!("municipio #{p}"))))
                .collect();
            render("localidades", &items, rows, cfg)
        }
        CatalogoAction::Rubros => {
            let items = spinner::run("Fetching rubros...", cfg.quiet, service.rubros()).await?;
            let rows = items.iter().map(|r| (r.id, r.nombre.as_str(), r.tipo.clone())).collect();
            render("rubros", &items, rows, cfg)
        }
        CatalogoAction::Subrubros { rubro } => {
            let items = spinner::run("Fetching subrubros...", cfg.quiet, service.subrubros(rubro)).await?;
            let rows = items
                .iter()
                .map(|s| (s.id, s.nombre.as_str(), s.rubro.map(|p| format!("rubro #{p}"))))
                .collect();
            render("subrubros", &items, rows, cfg)
        }
    }
}

type Row<'a> = (i64, &'a str, Option<String>);

fn render<T: Serialize>(title: &str, items: &[T], rows: Vec<Row<'_>>, cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        return print::json(items);
    }
    if rows.is_empty() {
        print::no_results(cfg.quiet);
        return Ok(());
    }

    print::header(title, cfg.quiet);
    print::set_key_width(rows.iter().map(|(_, nombre, _)| *nombre));
    for (id, nombre, parent) in &rows {
        let value: ColoredString = match parent {
            Some(parent) if cfg.quiet == 0 => format!("#{id}  {}", parent.dimmed()).color(colors::ACCENT),
            _ => format!("#{id}").color(colors::ACCENT),
        };
        print::aligned_line(nombre, value);
    }
    Ok(())
}
