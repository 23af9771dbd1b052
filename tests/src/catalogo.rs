use padron_core::services::{CatalogService, EmpresaFiltro, ExportService, Formato};

use crate::mock::{ADMIN_EMAIL, EMPRESA_EMAIL, MockServer};

#[tokio::test]
async fn plain_array_listing_with_parent_filter() {
    let server = MockServer::start().await;
    let catalog = CatalogService::new(server.logged_in(EMPRESA_EMAIL).await);

    let municipios = catalog.municipios(Some(2)).await.unwrap();

    assert_eq!(municipios.len(), 1);
    assert_eq!(municipios[0].nombre, "Capital");
    assert_eq!(municipios[0].departamento, Some(2));
    assert_eq!(server.backend.hits(), vec!["GET geografia/municipios/?departamento=2"]);
}

#[tokio::test]
async fn paginated_listing_is_unwrapped() {
    let server = MockServer::start().await;
    let catalog = CatalogService::new(server.logged_in(EMPRESA_EMAIL).await);

    let rubros = catalog.rubros().await.unwrap();

    assert_eq!(rubros.len(), 1);
    assert_eq!(rubros[0].tipo.as_deref(), Some("producto"));
}

#[tokio::test]
async fn csv_export_keeps_filters_but_not_the_page() {
    let server = MockServer::start().await;
    let exports = ExportService::new(server.logged_in(ADMIN_EMAIL).await);

    let filtro = EmpresaFiltro {
        buscar: Some("andina".to_string()),
        pagina: Some(3),
        ..EmpresaFiltro::default()
    };
    let blob = exports.empresas(Formato::Csv, &filtro).await.unwrap();

    assert_eq!(blob.filename.as_deref(), Some("padrón-empresas.csv"));
    assert!(blob.content_type.as_deref().is_some_and(|ct| ct.starts_with("text/csv")));
    assert!(blob.bytes.starts_with(b"id,razon_social,cuit\n"));
    assert_eq!(server.backend.hits(), vec!["GET empresas/exportar/csv/?search=andina"]);
}

#[tokio::test]
async fn company_sheet_download() {
    let server = MockServer::start().await;
    let exports = ExportService::new(server.logged_in(ADMIN_EMAIL).await);

    let blob = exports.ficha(3).await.unwrap();

    assert_eq!(blob.filename_or("ficha.pdf"), "empresa-3.pdf");
    assert!(blob.bytes.starts_with(b"%PDF"));
    assert_eq!(server.backend.hits(), vec!["GET empresas/3/pdf/"]);
}
