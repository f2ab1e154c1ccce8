use chrono::{NaiveDate, Utc};
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbBooking, DbBookingSummary};

/// Which slice of the bookings table a listing may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    ForClient(Uuid),
    ForProvider(Uuid),
}

/// Whether an active (pending or confirmed) booking already holds the
/// provider's slot on that date.
pub async fn slot_is_booked(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    date: NaiveDate,
    time_slot: &str,
) -> Result<bool> {
    let booked = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM bookings
            WHERE provider_id = $1
              AND date = $2
              AND time_slot = $3
              AND status IN ('pending', 'confirmed')
        );
        "#,
    )
    .bind(provider_id)
    .bind(date)
    .bind(time_slot)
    .fetch_one(pool)
    .await?;

    Ok(booked)
}

#[allow(clippy::too_many_arguments)]
pub async fn create_booking(
    pool: &Pool<Postgres>,
    client_id: Uuid,
    provider_id: Uuid,
    service_id: Uuid,
    date: NaiveDate,
    time_slot: &str,
    total: f64,
    address: &str,
    phone: &str,
    email: &str,
    notes: Option<&str>,
) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, client={}, provider={}, service={}, date={}, slot={}",
        id, client_id, provider_id, service_id, date, time_slot
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, client_id, provider_id, service_id, date, time_slot,
                              status, total, address, phone, email, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8, $9, $10, $11, $12, $12)
        RETURNING id, client_id, provider_id, service_id, date, time_slot, status, total,
                  address, phone, email, notes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(client_id)
    .bind(provider_id)
    .bind(service_id)
    .bind(date)
    .bind(time_slot)
    .bind(total)
    .bind(address)
    .bind(phone)
    .bind(email)
    .bind(notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    tracing::debug!("Getting booking by id: {}", id);

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, client_id, provider_id, service_id, date, time_slot, status, total,
               address, phone, email, notes, created_at, updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Lists booking rows joined with client and service display names, scoped
/// to what the caller's role may see.
pub async fn list_booking_summaries(
    pool: &Pool<Postgres>,
    scope: BookingScope,
) -> Result<Vec<DbBookingSummary>> {
    tracing::debug!("Listing bookings: scope={:?}", scope);

    let base = r#"
        SELECT b.id, c.name AS client_name, p.name AS provider_name, s.name AS service_name,
               b.date, b.time_slot, b.status, b.total
        FROM bookings b
        JOIN users c ON c.id = b.client_id
        JOIN users p ON p.id = b.provider_id
        JOIN services s ON s.id = b.service_id
    "#;

    let summaries = match scope {
        BookingScope::All => {
            sqlx::query_as::<_, DbBookingSummary>(&format!(
                "{base} ORDER BY b.created_at DESC"
            ))
            .fetch_all(pool)
            .await?
        }
        BookingScope::ForClient(client_id) => {
            sqlx::query_as::<_, DbBookingSummary>(&format!(
                "{base} WHERE b.client_id = $1 ORDER BY b.created_at DESC"
            ))
            .bind(client_id)
            .fetch_all(pool)
            .await?
        }
        BookingScope::ForProvider(provider_id) => {
            sqlx::query_as::<_, DbBookingSummary>(&format!(
                "{base} WHERE b.provider_id = $1 ORDER BY b.created_at DESC"
            ))
            .bind(provider_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(summaries)
}

/// Moves a booking to `next_status`, guarded by the status the caller
/// observed. The guard makes the lifecycle check hold even when two
/// mutations race: the second one no longer matches and fails here.
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected_status: &str,
    next_status: &str,
) -> Result<DbBooking> {
    tracing::debug!(
        "Updating booking status: id={}, {} -> {}",
        id, expected_status, next_status
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $3, updated_at = $4
        WHERE id = $1 AND status = $2
        RETURNING id, client_id, provider_id, service_id, date, time_slot, status, total,
                  address, phone, email, notes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(expected_status)
    .bind(next_status)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Booking status changed while the update was in flight"))?;

    Ok(booking)
}
