use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbAvailabilityDay;

pub async fn get_availability(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
) -> Result<Vec<DbAvailabilityDay>> {
    tracing::debug!("Getting availability for provider: {}", provider_id);

    let days = sqlx::query_as::<_, DbAvailabilityDay>(
        r#"
        SELECT provider_id, day_of_week, open_hour, close_hour
        FROM provider_availability
        WHERE provider_id = $1
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(days)
}

pub async fn upsert_day(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    day_of_week: &str,
    open_hour: i32,
    close_hour: i32,
) -> Result<DbAvailabilityDay> {
    tracing::debug!(
        "Upserting availability: provider={}, day={}, hours={}..{}",
        provider_id, day_of_week, open_hour, close_hour
    );

    let day = sqlx::query_as::<_, DbAvailabilityDay>(
        r#"
        INSERT INTO provider_availability (provider_id, day_of_week, open_hour, close_hour)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (provider_id, day_of_week) DO UPDATE
        SET open_hour = $3, close_hour = $4
        RETURNING provider_id, day_of_week, open_hour, close_hour
        "#,
    )
    .bind(provider_id)
    .bind(day_of_week)
    .bind(open_hour)
    .bind(close_hour)
    .fetch_one(pool)
    .await?;

    Ok(day)
}

pub async fn delete_day(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    day_of_week: &str,
) -> Result<()> {
    tracing::debug!("Deleting availability: provider={}, day={}", provider_id, day_of_week);

    sqlx::query(
        r#"
        DELETE FROM provider_availability
        WHERE provider_id = $1 AND day_of_week = $2
        "#,
    )
    .bind(provider_id)
    .bind(day_of_week)
    .execute(pool)
    .await?;

    Ok(())
}
