use axum::Json;
use chrono::Utc;
use homeserve_api::middleware::error_handling::AppError;
use homeserve_core::{
    catalog::CatalogFilter,
    errors::MarketError,
    models::service::{Service, ServiceCategory},
};
use homeserve_db::models::DbService;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn db_service(name: &str, category: &str, price: f64) -> DbService {
    let now = Utc::now();
    DbService {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: category.to_string(),
        description: None,
        price,
        duration_hours: 2,
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn service_from_db(db_service: DbService) -> Result<Service, AppError> {
    let category = ServiceCategory::parse(&db_service.category).ok_or_else(|| {
        AppError(MarketError::Database(eyre::eyre!(
            "Unknown category stored: {}",
            db_service.category
        )))
    })?;

    Ok(Service {
        id: db_service.id,
        name: db_service.name,
        category,
        description: db_service.description,
        price: db_service.price,
        duration_hours: db_service.duration_hours,
        image_url: db_service.image_url,
        created_at: db_service.created_at,
        updated_at: db_service.updated_at,
    })
}

// Test wrapper mirroring the get_service handler over the mocks
async fn test_get_service_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
) -> Result<Json<Service>, AppError> {
    let db_service = ctx
        .service_repo
        .get_service_by_id(id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| AppError(MarketError::NotFound(format!("Service with ID {} not found", id))))?;

    Ok(Json(service_from_db(db_service)?))
}

// Test wrapper mirroring the list_services handler over the mocks
async fn test_list_services_wrapper(
    ctx: &mut TestContext,
    filter: CatalogFilter,
) -> Result<Json<Vec<Service>>, AppError> {
    let db_services = ctx
        .service_repo
        .list_services()
        .await
        .map_err(MarketError::Database)?;

    let services = db_services
        .into_iter()
        .map(service_from_db)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(filter.apply(&services)))
}

#[tokio::test]
async fn test_get_service_found() {
    let mut ctx = TestContext::new();
    let fixture = db_service("Pipe Repair & Installation", "plumbing", 85.0);
    let id = fixture.id;

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| Ok(Some(fixture.clone())));

    let Json(service) = test_get_service_wrapper(&mut ctx, id).await.unwrap();

    assert_eq!(service.id, id);
    assert_eq!(service.category, ServiceCategory::Plumbing);
    assert_eq!(service.price, 85.0);
}

#[tokio::test]
async fn test_get_service_not_found() {
    let mut ctx = TestContext::new();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(|_| Ok(None));

    let error = test_get_service_wrapper(&mut ctx, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(error.0, MarketError::NotFound(_)));
}

#[tokio::test]
async fn test_get_service_database_error() {
    let mut ctx = TestContext::new();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(|_| Err(eyre::eyre!("Database error")));

    let error = test_get_service_wrapper(&mut ctx, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(error.0, MarketError::Database(_)));
}

#[tokio::test]
async fn test_list_services_applies_the_catalog_filter() {
    let mut ctx = TestContext::new();

    ctx.service_repo.expect_list_services().returning(|| {
        Ok(vec![
            db_service("Pipe Repair & Installation", "plumbing", 85.0),
            db_service("Electrical Panel Upgrade", "electrical", 250.0),
            db_service("Drain Unclogging", "plumbing", 150.0),
        ])
    });

    let filter = CatalogFilter {
        category: Some(ServiceCategory::Plumbing),
        min_price: Some(50.0),
        max_price: Some(100.0),
        search_term: None,
    };
    let Json(services) = test_list_services_wrapper(&mut ctx, filter).await.unwrap();

    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "Pipe Repair & Installation");
}

#[tokio::test]
async fn test_list_services_rejects_unknown_stored_category() {
    let mut ctx = TestContext::new();

    ctx.service_repo
        .expect_list_services()
        .returning(|| Ok(vec![db_service("Mystery Work", "masonry", 10.0)]));

    let error = test_list_services_wrapper(&mut ctx, CatalogFilter::default())
        .await
        .unwrap_err();

    assert!(matches!(error.0, MarketError::Database(_)));
}
