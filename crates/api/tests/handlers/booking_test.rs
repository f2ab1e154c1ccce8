use axum::Json;
use chrono::{Duration, NaiveDate, Utc};
use homeserve_api::middleware::error_handling::AppError;
use homeserve_core::{
    errors::MarketError,
    listing::{paginate, ListingFilter, Page, PAGE_SIZE},
    models::booking::{BookingStatus, BookingSummary, CreateBookingResponse},
    models::service::{Service, ServiceCategory},
    wizard::{join_field_errors, BookingWizard, ContactDetails},
};
use homeserve_db::models::{DbBooking, DbBookingSummary};
use homeserve_db::repositories::booking::BookingScope;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn pipe_repair() -> Service {
    let now = Utc::now();
    Service {
        id: Uuid::new_v4(),
        name: "Pipe Repair & Installation".to_string(),
        category: ServiceCategory::Plumbing,
        description: None,
        price: 85.0,
        duration_hours: 2,
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn db_booking(status: &str, date: NaiveDate, total: f64) -> DbBooking {
    let now = Utc::now();
    DbBooking {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        date,
        time_slot: "10:00".to_string(),
        status: status.to_string(),
        total,
        address: "1 Main St".to_string(),
        phone: "555-0100".to_string(),
        email: "a@b.com".to_string(),
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn db_summary(index: usize, status: &str) -> DbBookingSummary {
    DbBookingSummary {
        id: Uuid::new_v4(),
        client_name: format!("Client {}", index),
        provider_name: "Sam Rivera".to_string(),
        service_name: "Pipe Repair & Installation".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        time_slot: "10:00".to_string(),
        status: status.to_string(),
        total: 85.0,
    }
}

// Test wrapper mirroring the create_booking handler: resolve the service,
// walk the wizard, check the slot, persist through the mock
async fn test_create_booking_wrapper(
    ctx: &mut TestContext,
    service_id: Uuid,
    provider_id: Uuid,
    date: NaiveDate,
    time_slot: &'static str,
    details: ContactDetails,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let db_service = ctx
        .service_repo
        .get_service_by_id(service_id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| {
            AppError(MarketError::NotFound(format!(
                "Service with ID {} not found",
                service_id
            )))
        })?;

    let category = ServiceCategory::parse(&db_service.category).ok_or_else(|| {
        AppError(MarketError::Database(eyre::eyre!(
            "Unknown category stored: {}",
            db_service.category
        )))
    })?;
    let service = Service {
        id: db_service.id,
        name: db_service.name,
        category,
        description: db_service.description,
        price: db_service.price,
        duration_hours: db_service.duration_hours,
        image_url: db_service.image_url,
        created_at: db_service.created_at,
        updated_at: db_service.updated_at,
    };

    let today = Utc::now().date_naive();
    let mut wizard = BookingWizard::new(Some(service), today);
    wizard
        .select_date(date)
        .map_err(|error| MarketError::Validation(format!("{}: {}", error.field, error.message)))?;
    wizard
        .select_time_slot(time_slot)
        .map_err(|error| MarketError::Validation(format!("{}: {}", error.field, error.message)))?;
    wizard
        .continue_to_details()
        .map_err(|errors| MarketError::Validation(join_field_errors(&errors)))?;
    wizard
        .submit_details(details)
        .map_err(|errors| MarketError::Validation(join_field_errors(&errors)))?;

    let booked = ctx
        .booking_repo
        .slot_is_booked(provider_id, date, time_slot)
        .await
        .map_err(MarketError::Database)?;
    if booked {
        return Err(AppError(MarketError::Validation(
            "This time slot is already booked".to_string(),
        )));
    }

    let total = wizard
        .draft()
        .total
        .ok_or_else(|| AppError(MarketError::Validation("The booking draft is incomplete".to_string())))?;

    let created = ctx
        .booking_repo
        .create_booking(Uuid::new_v4(), provider_id, service_id, date, time_slot, total)
        .await
        .map_err(MarketError::Database)?;

    wizard
        .confirm(created.id)
        .map_err(|error| AppError(MarketError::Validation(error.message)))?;

    let status = BookingStatus::parse(&created.status).ok_or_else(|| {
        AppError(MarketError::Database(eyre::eyre!(
            "Unknown status stored: {}",
            created.status
        )))
    })?;

    Ok(Json(CreateBookingResponse {
        id: created.id,
        status,
        total: created.total,
        created_at: created.created_at,
    }))
}

// Test wrapper mirroring the list_bookings handler over the mocks
async fn test_list_bookings_wrapper(
    ctx: &mut TestContext,
    scope: BookingScope,
    filter: ListingFilter,
    page: usize,
) -> Result<Json<Page<BookingSummary>>, AppError> {
    let db_summaries = ctx
        .booking_repo
        .list_booking_summaries(scope)
        .await
        .map_err(MarketError::Database)?;

    let summaries = db_summaries
        .into_iter()
        .map(|summary| {
            let status = BookingStatus::parse(&summary.status).ok_or_else(|| {
                AppError(MarketError::Database(eyre::eyre!(
                    "Unknown status stored: {}",
                    summary.status
                )))
            })?;
            Ok::<_, AppError>(BookingSummary {
                id: summary.id,
                client_name: summary.client_name,
                provider_name: summary.provider_name,
                service_name: summary.service_name,
                date: summary.date,
                time_slot: summary.time_slot,
                status,
                total: summary.total,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let filtered = filter.apply(&summaries);
    Ok(Json(paginate(&filtered, page, PAGE_SIZE)))
}

// Test wrapper mirroring the update_booking_status handler over the mocks
async fn test_update_status_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    next: BookingStatus,
) -> Result<BookingStatus, AppError> {
    let booking = ctx
        .booking_repo
        .get_booking_by_id(id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| AppError(MarketError::NotFound(format!("Booking with ID {} not found", id))))?;

    let current = BookingStatus::parse(&booking.status).ok_or_else(|| {
        AppError(MarketError::Database(eyre::eyre!(
            "Unknown status stored: {}",
            booking.status
        )))
    })?;

    if !current.can_transition_to(next) {
        return Err(AppError(MarketError::Validation(format!(
            "A {} booking cannot move to {}",
            current.as_str(),
            next.as_str()
        ))));
    }

    let expected: &'static str = current.as_str();
    let target: &'static str = next.as_str();
    let updated = ctx
        .booking_repo
        .update_booking_status(id, expected, target)
        .await
        .map_err(MarketError::Database)?;

    BookingStatus::parse(&updated.status).ok_or_else(|| {
        AppError(MarketError::Database(eyre::eyre!(
            "Unknown status stored: {}",
            updated.status
        )))
    })
}

fn details() -> ContactDetails {
    ContactDetails {
        address: "1 Main St".to_string(),
        phone: "555-0100".to_string(),
        email: "a@b.com".to_string(),
        notes: None,
    }
}

#[tokio::test]
async fn test_create_booking_fixes_total_to_the_service_price() {
    let mut ctx = TestContext::new();
    let service = pipe_repair();
    let service_id = service.id;
    let provider_id = Uuid::new_v4();
    let date = Utc::now().date_naive() + Duration::days(3);

    let db_fixture = DbBooking {
        service_id,
        provider_id,
        date,
        ..db_booking("pending", date, service.price)
    };
    let now = Utc::now();
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| {
            Ok(Some(homeserve_db::models::DbService {
                id: service_id,
                name: "Pipe Repair & Installation".to_string(),
                category: "plumbing".to_string(),
                description: None,
                price: 85.0,
                duration_hours: 2,
                image_url: None,
                created_at: now,
                updated_at: now,
            }))
        });
    ctx.booking_repo
        .expect_slot_is_booked()
        .returning(|_, _, _| Ok(false));
    ctx.booking_repo
        .expect_create_booking()
        .returning(move |_, _, _, _, _, total| {
            Ok(DbBooking {
                total,
                ..db_fixture.clone()
            })
        });

    let Json(response) =
        test_create_booking_wrapper(&mut ctx, service_id, provider_id, date, "10:00", details())
            .await
            .unwrap();

    assert_eq!(response.status, BookingStatus::Pending);
    assert_eq!(response.total, 85.0);
}

#[tokio::test]
async fn test_create_booking_unknown_service_is_not_found() {
    let mut ctx = TestContext::new();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(|_| Ok(None));

    let date = Utc::now().date_naive() + Duration::days(1);
    let error =
        test_create_booking_wrapper(&mut ctx, Uuid::new_v4(), Uuid::new_v4(), date, "10:00", details())
            .await
            .unwrap_err();

    assert!(matches!(error.0, MarketError::NotFound(_)));
}

#[tokio::test]
async fn test_create_booking_rejects_past_dates() {
    let mut ctx = TestContext::new();
    let service = pipe_repair();
    let service_id = service.id;
    let now = Utc::now();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| {
            Ok(Some(homeserve_db::models::DbService {
                id: service_id,
                name: "Pipe Repair & Installation".to_string(),
                category: "plumbing".to_string(),
                description: None,
                price: 85.0,
                duration_hours: 2,
                image_url: None,
                created_at: now,
                updated_at: now,
            }))
        });

    let yesterday = Utc::now().date_naive() - Duration::days(1);
    let error =
        test_create_booking_wrapper(&mut ctx, service_id, Uuid::new_v4(), yesterday, "10:00", details())
            .await
            .unwrap_err();

    match error.0 {
        MarketError::Validation(message) => assert!(message.contains("date")),
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_booking_rejects_a_taken_slot() {
    let mut ctx = TestContext::new();
    let service = pipe_repair();
    let service_id = service.id;
    let now = Utc::now();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| {
            Ok(Some(homeserve_db::models::DbService {
                id: service_id,
                name: "Pipe Repair & Installation".to_string(),
                category: "plumbing".to_string(),
                description: None,
                price: 85.0,
                duration_hours: 2,
                image_url: None,
                created_at: now,
                updated_at: now,
            }))
        });
    ctx.booking_repo
        .expect_slot_is_booked()
        .returning(|_, _, _| Ok(true));

    let date = Utc::now().date_naive() + Duration::days(1);
    let error =
        test_create_booking_wrapper(&mut ctx, service_id, Uuid::new_v4(), date, "10:00", details())
            .await
            .unwrap_err();

    match error.0 {
        MarketError::Validation(message) => assert!(message.contains("already booked")),
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_bookings_filters_and_paginates() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_list_booking_summaries()
        .returning(|_| {
            let mut summaries = Vec::new();
            for i in 0..25 {
                let status = if i < 12 { "pending" } else { "completed" };
                summaries.push(db_summary(i, status));
            }
            Ok(summaries)
        });

    let filter = ListingFilter {
        search: None,
        status: Some(BookingStatus::Pending),
    };
    let Json(page) = test_list_bookings_wrapper(&mut ctx, BookingScope::All, filter, 2)
        .await
        .unwrap();

    assert_eq!(page.total_items, 12);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].client_name, "Client 10");
}

#[tokio::test]
async fn test_update_status_accepts_a_pending_booking() {
    let mut ctx = TestContext::new();
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let fixture = db_booking("pending", date, 85.0);
    let id = fixture.id;

    ctx.booking_repo
        .expect_get_booking_by_id()
        .returning(move |_| Ok(Some(fixture.clone())));
    ctx.booking_repo
        .expect_update_booking_status()
        .returning(move |_, _, next| Ok(db_booking(next, date, 85.0)));

    let status = test_update_status_wrapper(&mut ctx, id, BookingStatus::Confirmed)
        .await
        .unwrap();

    assert_eq!(status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_update_status_rejects_backward_transitions() {
    let mut ctx = TestContext::new();
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let fixture = db_booking("completed", date, 85.0);
    let id = fixture.id;

    ctx.booking_repo
        .expect_get_booking_by_id()
        .returning(move |_| Ok(Some(fixture.clone())));

    let error = test_update_status_wrapper(&mut ctx, id, BookingStatus::Pending)
        .await
        .unwrap_err();

    match error.0 {
        MarketError::Validation(message) => {
            assert!(message.contains("completed"));
            assert!(message.contains("pending"));
        }
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_status_unknown_booking_is_not_found() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_get_booking_by_id()
        .returning(|_| Ok(None));

    let error = test_update_status_wrapper(&mut ctx, Uuid::new_v4(), BookingStatus::Confirmed)
        .await
        .unwrap_err();

    assert!(matches!(error.0, MarketError::NotFound(_)));
}
