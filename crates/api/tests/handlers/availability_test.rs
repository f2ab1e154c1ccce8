use axum::Json;
use homeserve_api::middleware::error_handling::AppError;
use homeserve_core::{
    errors::MarketError,
    models::availability::{Weekday, WeeklyAvailability},
    models::provider::GetAvailabilityResponse,
    slots,
};
use homeserve_db::models::DbAvailabilityDay;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn expand_rows(rows: Vec<DbAvailabilityDay>) -> Result<WeeklyAvailability, AppError> {
    let mut availability = WeeklyAvailability::new();
    for row in rows {
        let day = Weekday::parse(&row.day_of_week).ok_or_else(|| {
            AppError(MarketError::Database(eyre::eyre!(
                "Unknown weekday stored: {}",
                row.day_of_week
            )))
        })?;
        let labels = slots::generate_time_slots(row.open_hour as u32, row.close_hour as u32);
        availability.set_day(day, labels);
    }
    Ok(availability)
}

// Test wrapper mirroring the get_my_availability handler over the mocks
async fn test_get_availability_wrapper(
    ctx: &mut TestContext,
    provider_id: Uuid,
) -> Result<Json<GetAvailabilityResponse>, AppError> {
    let rows = ctx
        .availability_repo
        .get_availability(provider_id)
        .await
        .map_err(MarketError::Database)?;

    Ok(Json(GetAvailabilityResponse {
        availability: expand_rows(rows)?,
    }))
}

// Test wrapper mirroring the upsert handler's validation and persistence
async fn test_upsert_day_wrapper(
    ctx: &mut TestContext,
    provider_id: Uuid,
    day: &str,
    start: u32,
    end: u32,
) -> Result<DbAvailabilityDay, AppError> {
    let day = Weekday::parse(day)
        .ok_or_else(|| AppError(MarketError::Validation(format!("Unknown weekday: {}", day))))?;
    if end > 24 || start >= end {
        return Err(AppError(MarketError::Validation(
            "The opening hour must come before the closing hour, within 0-24".to_string(),
        )));
    }

    let day_name: &'static str = day.as_str();
    let row = ctx
        .availability_repo
        .upsert_day(provider_id, day_name, start as i32, end as i32)
        .await
        .map_err(MarketError::Database)?;

    Ok(row)
}

#[tokio::test]
async fn test_availability_expands_hours_into_slot_labels() {
    let mut ctx = TestContext::new();
    let provider_id = Uuid::new_v4();

    ctx.availability_repo
        .expect_get_availability()
        .returning(move |provider_id| {
            Ok(vec![
                DbAvailabilityDay {
                    provider_id,
                    day_of_week: "Monday".to_string(),
                    open_hour: 9,
                    close_hour: 12,
                },
                DbAvailabilityDay {
                    provider_id,
                    day_of_week: "Friday".to_string(),
                    open_hour: 14,
                    close_hour: 16,
                },
            ])
        });

    let Json(response) = test_get_availability_wrapper(&mut ctx, provider_id)
        .await
        .unwrap();

    assert_eq!(
        response.availability.slots_for(Weekday::Monday),
        &["9:00".to_string(), "10:00".to_string(), "11:00".to_string()]
    );
    assert_eq!(
        response.availability.slots_for(Weekday::Friday),
        &["14:00".to_string(), "15:00".to_string()]
    );
    assert!(response.availability.slots_for(Weekday::Tuesday).is_empty());
}

#[tokio::test]
async fn test_availability_with_no_rows_is_empty() {
    let mut ctx = TestContext::new();

    ctx.availability_repo
        .expect_get_availability()
        .returning(|_| Ok(Vec::new()));

    let Json(response) = test_get_availability_wrapper(&mut ctx, Uuid::new_v4())
        .await
        .unwrap();

    assert!(response.availability.is_empty());
}

#[tokio::test]
async fn test_upsert_day_persists_the_range() {
    let mut ctx = TestContext::new();
    let provider_id = Uuid::new_v4();

    ctx.availability_repo
        .expect_upsert_day()
        .returning(|provider_id, day_of_week, open_hour, close_hour| {
            Ok(DbAvailabilityDay {
                provider_id,
                day_of_week: day_of_week.to_string(),
                open_hour,
                close_hour,
            })
        });

    let row = test_upsert_day_wrapper(&mut ctx, provider_id, "Monday", 9, 17)
        .await
        .unwrap();

    assert_eq!(row.day_of_week, "Monday");
    assert_eq!(row.open_hour, 9);
    assert_eq!(row.close_hour, 17);
}

#[tokio::test]
async fn test_upsert_day_rejects_unknown_weekdays() {
    let mut ctx = TestContext::new();

    let error = test_upsert_day_wrapper(&mut ctx, Uuid::new_v4(), "Someday", 9, 17)
        .await
        .unwrap_err();

    assert!(matches!(error.0, MarketError::Validation(_)));
}

#[tokio::test]
async fn test_upsert_day_rejects_inverted_hours() {
    let mut ctx = TestContext::new();

    let error = test_upsert_day_wrapper(&mut ctx, Uuid::new_v4(), "Monday", 17, 9)
        .await
        .unwrap_err();

    assert!(matches!(error.0, MarketError::Validation(_)));

    let error = test_upsert_day_wrapper(&mut ctx, Uuid::new_v4(), "Monday", 9, 25)
        .await
        .unwrap_err();

    assert!(matches!(error.0, MarketError::Validation(_)));
}
