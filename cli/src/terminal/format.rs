use colored::*;
use padron_common::cuit;
use padron_common::models::{CategoriaMatriz, Empresa, Referencia, Usuario};
use padron_core::UserType;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

pub fn categoria(cat: CategoriaMatriz) -> ColoredString {
    let color = match cat {
        CategoriaMatriz::Exportadora => colors::EXPORTADORA,
        CategoriaMatriz::PotencialExportadora => colors::POTENCIAL,
        CategoriaMatriz::EtapaInicial => colors::ETAPA_INICIAL,
    };
    cat.label().color(color).bold()
}

pub fn user_type(user_type: UserType) -> ColoredString {
    match user_type {
        UserType::Admin => "admin".red().bold(),
        UserType::Staff => "staff".color(colors::SECONDARY).bold(),
        UserType::Empresa => "empresa".color(colors::PRIMARY).bold(),
    }
}

fn referencia(key: &str, value: &Option<Referencia>) -> Option<Detail> {
    value.as_ref().map(|r| detail(key, r.to_string().normal()))
}

fn texto(key: &str, value: &Option<String>, color: Color) -> Option<Detail> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| detail(key, v.color(color)))
}

/// One-line summary used in listings.
pub fn empresa_summary(empresa: &Empresa) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![detail("CUIT", cuit::format(&empresa.cuit).color(colors::CUIT))];

    if let Some(tipo) = empresa.tipo_empresa {
        details.push(detail("Tipo", tipo.as_str().normal()));
    }
    details.extend(referencia("Rubro", &empresa.rubro));
    if let Some(cat) = empresa.categoria_matriz {
        details.push(detail("Matriz", categoria(cat)));
    }
    if empresa.eliminado {
        details.push(detail("Estado", "eliminada".color(colors::DELETED).bold()));
    }
    details
}

/// Every field worth showing for a single company.
pub fn empresa_details(empresa: &Empresa) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        detail("Razón social", empresa.razon_social.normal()),
        detail("CUIT", cuit::format(&empresa.cuit).color(colors::CUIT)),
    ];

    if let Some(tipo) = empresa.tipo_empresa {
        details.push(detail("Tipo", tipo.as_str().normal()));
    }
    details.extend(texto("Email", &empresa.email, colors::EMAIL));
    details.extend(texto("Teléfono", &empresa.telefono, colors::TEXT_DEFAULT));
    details.extend(texto("Sitio web", &empresa.sitio_web, colors::EMAIL));
    details.extend(texto("Dirección", &empresa.direccion, colors::TEXT_DEFAULT));
    details.extend(referencia("Departamento", &empresa.departamento));
    details.extend(referencia("Municipio", &empresa.municipio));
    details.extend(referencia("Localidad", &empresa.localidad));
    details.extend(referencia("Rubro", &empresa.rubro));
    details.extend(referencia("Subrubro", &empresa.subrubro));

    match (empresa.categoria_matriz, empresa.puntaje_matriz) {
        (Some(cat), Some(score)) => details.push(detail("Matriz", format!("{} ({score:.1})", categoria(cat)).normal())),
        (Some(cat), None) => details.push(detail("Matriz", categoria(cat))),
        _ => {}
    }
    if let Some(exporta) = empresa.exporta {
        details.push(detail("Exporta", if exporta { "sí".green() } else { "no".normal() }));
    }
    if let Some(contacto) = empresa.contacto_principal() {
        let mut value = contacto.nombre.clone();
        if let Some(email) = contacto.email.as_deref() {
            value.push_str(&format!(" <{email}>"));
        }
        details.push(detail("Contacto", value.normal()));
    }
    if !empresa.productos.is_empty() {
        details.push(detail("Productos", join_names(empresa.productos.iter().map(|p| p.nombre.as_str()))));
    }
    if !empresa.servicios.is_empty() {
        details.push(detail("Servicios", join_names(empresa.servicios.iter().map(|s| s.nombre.as_str()))));
    }
    if !empresa.actividades_promocion.is_empty() {
        details.push(detail(
            "Promoción",
            format!("{} actividades", empresa.actividades_promocion.len()).normal(),
        ));
    }
    if let Some(fecha) = empresa.fecha_actualizacion.or(empresa.fecha_creacion) {
        details.push(detail("Actualizada", fecha.format("%Y-%m-%d %H:%M").to_string().dimmed()));
    }
    if empresa.eliminado {
        details.push(detail("Estado", "eliminada".color(colors::DELETED).bold()));
    }
    details
}

pub fn usuario_details(usuario: &Usuario, kind: UserType) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        detail("Email", usuario.email.color(colors::EMAIL)),
        detail("Tipo", user_type(kind)),
    ];
    if let Some(rol) = usuario.rol_nombre() {
        details.push(detail("Rol", rol.normal()));
    }
    if let Some(empresa) = &usuario.empresa {
        let name = empresa.razon_social.as_deref().unwrap_or("sin nombre");
        details.push(detail("Empresa", format!("{name} (#{})", empresa.id).normal()));
    }
    details
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> ColoredString {
    names.collect::<Vec<&str>>().join(", ").normal()
}
