use padron_common::models::{NuevaEmpresa, TipoEmpresa};
use padron_core::services::{EmpresaFiltro, EmpresaService};
use padron_core::{ApiError, AuthContext};
use serde_json::{Map, Value, json};

use crate::mock::{ADMIN_EMAIL, DUPLICATE_CUIT, EMPRESA_EMAIL, MockServer};

fn cambios(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn nueva(cuit: &str) -> NuevaEmpresa {
    NuevaEmpresa {
        razon_social: " Servicios Andinos SRL ".to_string(),
        cuit: cuit.to_string(),
        tipo_empresa: Some(TipoEmpresa::Servicio),
        email: "hola@andinos.com.ar".to_string(),
        departamento: Some(2),
        rubro: Some(4),
        ..NuevaEmpresa::default()
    }
}

#[tokio::test]
async fn lookup_falls_back_to_legacy_endpoints() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let empresa = service.get_by_id(7).await.unwrap();

    assert_eq!(empresa.id, 7);
    assert_eq!(empresa.tipo_empresa, Some(TipoEmpresa::Servicio));
    assert_eq!(
        server.backend.hits(),
        vec!["GET empresas/7/", "GET empresas-producto/7/", "GET empresas-servicio/7/"]
    );
}

#[tokio::test]
async fn server_error_stops_the_chain() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let err = service.get_by_id(9).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!err.is_silent());
    assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");
    assert_eq!(server.backend.hits(), vec!["GET empresas/9/"]);
}

#[tokio::test]
async fn missing_everywhere_is_a_silent_not_found() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let err = service.get_by_id(99).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.is_silent());
    assert_eq!(server.backend.hits().len(), 4);
}

#[tokio::test]
async fn invalid_company_never_reaches_the_backend() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let incompleta = NuevaEmpresa {
        email: String::new(),
        departamento: None,
        ..nueva("30-71234567-1")
    };
    let err = service.create(incompleta).await.unwrap_err();

    match err {
        ApiError::Validation { fields } => assert_eq!(fields, vec!["email", "departamento"]),
        other => panic!("expected a validation error, got {other:?}"),
    }

    let err = service.create(nueva("30-7123456")).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation { ref fields } if fields == &["cuit"]));

    assert!(server.backend.hits().is_empty());
}

#[tokio::test]
async fn creation_falls_back_to_the_legacy_collection() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let empresa = service.create(nueva("30-71234567-1")).await.unwrap();

    assert_eq!(empresa.id, 50);
    assert_eq!(empresa.cuit, "30712345671");
    assert_eq!(empresa.razon_social, "Servicios Andinos SRL");
    assert_eq!(server.backend.hits(), vec!["POST empresas/", "POST empresas-servicio/"]);
}

#[tokio::test]
async fn duplicate_cuit_reports_the_field_error() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let err = service.create(nueva(DUPLICATE_CUIT)).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(!err.is_silent());
    assert_eq!(err.to_string(), "cuit: Ya existe una empresa con este CUIT.");
}

#[tokio::test]
async fn no_content_update_is_followed_by_a_fetch() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let empresa = service
        .update(3, cambios(json!({ "telefono": "261 555-0101" })))
        .await
        .unwrap();

    assert_eq!(empresa.id, 3);
    assert_eq!(server.backend.hits(), vec!["PATCH empresas/3/", "GET empresas/3/"]);
}

#[tokio::test]
async fn update_reaches_the_legacy_endpoint() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let empresa = service
        .update(7, cambios(json!({ "telefono": "261 555-0101", "cuit": "30-71234567-1" })))
        .await
        .unwrap();

    assert_eq!(empresa.telefono.as_deref(), Some("261 555-0101"));
    assert_eq!(empresa.cuit, "30712345671");
    assert_eq!(
        server.backend.hits(),
        vec!["PATCH empresas/7/", "PATCH empresas-producto/7/", "PATCH empresas-servicio/7/"]
    );
}

#[tokio::test]
async fn update_with_bad_cuit_is_rejected_locally() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let err = service
        .update(3, cambios(json!({ "cuit": "30-7123-4567" })))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation { .. }));
    assert!(server.backend.hits().is_empty());
}

#[tokio::test]
async fn delete_then_restore() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    service.delete(3).await.unwrap();
    let restored = service.restore(5).await.unwrap();

    assert_eq!(restored.id, 5);
    assert!(!restored.eliminado);
    assert_eq!(server.backend.hits(), vec!["DELETE empresas/3/", "POST empresas/5/restore/"]);
}

#[tokio::test]
async fn no_content_restore_is_followed_by_a_lookup() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let restored = service.restore(3).await.unwrap();

    assert_eq!(restored.id, 3);
    assert_eq!(server.backend.hits(), vec!["POST empresas/3/restore/", "GET empresas/3/"]);
}

#[tokio::test]
async fn listing_sends_filters_and_reads_the_page() {
    let server = MockServer::start().await;
    let service = EmpresaService::new(server.logged_in(ADMIN_EMAIL).await);

    let filtro = EmpresaFiltro {
        buscar: Some("andina".to_string()),
        tipo: Some(TipoEmpresa::Producto),
        incluir_eliminadas: true,
        ..EmpresaFiltro::default()
    };
    let listing = service.list(&filtro).await.unwrap();

    assert_eq!(listing.total(), 12);
    assert!(listing.has_more());
    let empresas = listing.into_items();
    assert_eq!(empresas.len(), 2);
    assert!(empresas[1].eliminado);
    assert_eq!(
        server.backend.hits(),
        vec!["GET empresas/?search=andina&tipo_empresa=producto&incluir_eliminadas=true"]
    );
}

#[tokio::test]
async fn company_account_edits_only_its_own_profile() {
    let server = MockServer::start().await;
    let client = server.logged_in(EMPRESA_EMAIL).await;
    let ctx = AuthContext::load(&client).await.unwrap();
    let service = EmpresaService::new(client);
    server.backend.clear_hits();

    let propia = service.mi_empresa(&ctx).await.unwrap();
    assert_eq!(propia.id, 3);

    let err = service
        .update_mi_empresa(&ctx, cambios(json!({ "cuit": "30712345671", "categoria_matriz": "Exportadora", "telefono": "1" })))
        .await
        .unwrap_err();
    match err {
        ApiError::Validation { fields } => assert_eq!(fields, vec!["cuit", "categoria_matriz"]),
        other => panic!("expected a validation error, got {other:?}"),
    }

    assert_eq!(server.backend.hits(), vec!["GET empresas/3/"]);
}

#[tokio::test]
async fn company_account_saves_its_contact_details() {
    let server = MockServer::start().await;
    let client = server.logged_in(EMPRESA_EMAIL).await;
    let ctx = AuthContext::load(&client).await.unwrap();
    let service = EmpresaService::new(client);
    server.backend.clear_hits();

    let empresa = service
        .update_mi_empresa(&ctx, cambios(json!({ "telefono": "261 555-0199", "sitio_web": "andina.com.ar" })))
        .await
        .unwrap();

    assert_eq!(empresa.id, 3);
    assert_eq!(
        server.backend.patches(),
        vec![json!({ "telefono": "261 555-0199", "sitio_web": "andina.com.ar" })]
    );
    assert_eq!(server.backend.hits(), vec!["PATCH empresas/3/", "GET empresas/3/"]);
}

#[tokio::test]
async fn account_without_company_has_no_profile() {
    let server = MockServer::start().await;
    let client = server.logged_in(ADMIN_EMAIL).await;
    let ctx = AuthContext::load(&client).await.unwrap();

    let err = EmpresaService::new(client).mi_empresa(&ctx).await.unwrap_err();

    assert!(matches!(err, ApiError::NoEmpresa));
}
