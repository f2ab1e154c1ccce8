//! # Booking Handlers
//!
//! This module contains the handlers for creating and managing bookings.
//!
//! ## Creation flow
//!
//! Booking creation runs the whole booking wizard server-side over the
//! submitted payload:
//!
//! 1. Resolve the service; an unknown identifier is a terminal not-found,
//!    never a validation error.
//! 2. Resolve the provider and check the requested slot is offered on that
//!    weekday.
//! 3. Walk the wizard: select the date and slot, advance, submit the contact
//!    details. Any field-level failure surfaces as one validation response
//!    and nothing is persisted.
//! 4. Reject the request if an active booking already holds the slot.
//! 5. Insert the row (status always starts at pending, the total copied from
//!    the service price) and confirm the wizard with the assigned id.
//!
//! Status changes go through the forward-only lifecycle check twice: once
//! here for a friendly 400, and once in the repository as a guard against
//! racing mutations.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use homeserve_core::{
    errors::MarketError,
    listing::{paginate, ListingFilter, Page, PAGE_SIZE},
    models::availability::Weekday,
    models::booking::{
        Booking, BookingStatus, BookingSummary, CreateBookingRequest, CreateBookingResponse,
        UpdateBookingStatusRequest, UpdateBookingStatusResponse,
    },
    models::user::{Session, UserRole},
    wizard::{join_field_errors, BookingWizard, ContactDetails},
};
use homeserve_db::models::{DbBooking, DbBookingSummary};
use homeserve_db::repositories::booking::BookingScope;

use crate::{
    handlers::service::service_from_db,
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Query parameters for the booking listing. `status` accepts the four
/// lifecycle values or "all"; `page` is clamped into range rather than
/// rejected.
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

fn weekday_of(date: chrono::NaiveDate) -> Weekday {
    match date.weekday() {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
        chrono::Weekday::Sun => Weekday::Sunday,
    }
}

fn status_from_db(raw: &str) -> Result<BookingStatus, MarketError> {
    BookingStatus::parse(raw)
        .ok_or_else(|| MarketError::Database(eyre::eyre!("Unknown status stored: {}", raw)))
}

fn booking_from_db(db_booking: DbBooking) -> Result<Booking, MarketError> {
    let status = status_from_db(&db_booking.status)?;

    Ok(Booking {
        id: db_booking.id,
        client_id: db_booking.client_id,
        provider_id: db_booking.provider_id,
        service_id: db_booking.service_id,
        date: db_booking.date,
        time_slot: db_booking.time_slot,
        status,
        total: db_booking.total,
        address: db_booking.address,
        phone: db_booking.phone,
        email: db_booking.email,
        notes: db_booking.notes,
        created_at: db_booking.created_at,
        updated_at: db_booking.updated_at,
    })
}

fn summary_from_db(db_summary: DbBookingSummary) -> Result<BookingSummary, MarketError> {
    let status = status_from_db(&db_summary.status)?;

    Ok(BookingSummary {
        id: db_summary.id,
        client_name: db_summary.client_name,
        provider_name: db_summary.provider_name,
        service_name: db_summary.service_name,
        date: db_summary.date,
        time_slot: db_summary.time_slot,
        status,
        total: db_summary.total,
    })
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    // Resolve the service; an unknown id ends the flow before step one
    let db_service =
        homeserve_db::repositories::service::get_service_by_id(&state.db_pool, payload.service_id)
            .await
            .map_err(MarketError::Database)?
            .ok_or_else(|| {
                MarketError::NotFound(format!("Service with ID {} not found", payload.service_id))
            })?;
    let service = service_from_db(db_service)?;

    let provider =
        homeserve_db::repositories::provider::get_provider_by_id(&state.db_pool, payload.provider_id)
            .await
            .map_err(MarketError::Database)?
            .ok_or_else(|| {
                MarketError::NotFound(format!("Provider with ID {} not found", payload.provider_id))
            })?;

    // Walk the wizard over the submitted schedule and contact details
    let today = Utc::now().date_naive();
    let mut wizard = BookingWizard::new(Some(service.clone()), today);

    wizard
        .select_date(payload.date)
        .map_err(|error| MarketError::Validation(format!("{}: {}", error.field, error.message)))?;
    wizard
        .select_time_slot(&payload.time_slot)
        .map_err(|error| MarketError::Validation(format!("{}: {}", error.field, error.message)))?;
    wizard
        .continue_to_details()
        .map_err(|errors| MarketError::Validation(join_field_errors(&errors)))?;
    wizard
        .submit_details(ContactDetails {
            address: payload.address.clone(),
            phone: payload.phone.clone(),
            email: payload.email.clone(),
            notes: payload.notes.clone(),
        })
        .map_err(|errors| MarketError::Validation(join_field_errors(&errors)))?;

    // The provider must offer the slot on that weekday
    let rows =
        homeserve_db::repositories::availability::get_availability(&state.db_pool, provider.id)
            .await
            .map_err(MarketError::Database)?;
    let availability = crate::handlers::availability::weekly_availability_from_rows(rows)?;
    let weekday = weekday_of(payload.date);
    if !availability.is_offered(weekday, &payload.time_slot) {
        return Err(AppError(MarketError::Validation(format!(
            "{} does not offer {} on {}",
            provider.name,
            payload.time_slot,
            weekday.as_str()
        ))));
    }

    // One active booking per provider, date, and slot
    let booked = homeserve_db::repositories::booking::slot_is_booked(
        &state.db_pool,
        provider.id,
        payload.date,
        &payload.time_slot,
    )
    .await
    .map_err(MarketError::Database)?;
    if booked {
        return Err(AppError(MarketError::Validation(
            "This time slot is already booked".to_string(),
        )));
    }

    let draft = wizard.draft().clone();
    let total = draft
        .total
        .ok_or_else(|| MarketError::Validation("The booking draft is incomplete".to_string()))?;

    let db_booking = homeserve_db::repositories::booking::create_booking(
        &state.db_pool,
        session.user_id,
        provider.id,
        service.id,
        payload.date,
        &payload.time_slot,
        total,
        payload.address.trim(),
        payload.phone.trim(),
        &payload.email,
        payload.notes.as_deref(),
    )
    .await
    .map_err(MarketError::Database)?;

    // The persisted identifier is the only one the client ever sees
    wizard
        .confirm(db_booking.id)
        .map_err(|error| MarketError::Validation(error.message))?;

    let status = status_from_db(&db_booking.status)?;

    Ok(Json(CreateBookingResponse {
        id: db_booking.id,
        status,
        total: db_booking.total,
        created_at: db_booking.created_at,
    }))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BookingListQuery>,
    headers: HeaderMap,
) -> Result<Json<Page<BookingSummary>>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let scope = match session.role {
        UserRole::Admin => BookingScope::All,
        UserRole::Provider => BookingScope::ForProvider(session.user_id),
        UserRole::Client => BookingScope::ForClient(session.user_id),
    };

    let status = match query.status.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            BookingStatus::parse(raw)
                .ok_or_else(|| MarketError::Validation(format!("Unknown status: {}", raw)))?,
        ),
    };

    let db_summaries =
        homeserve_db::repositories::booking::list_booking_summaries(&state.db_pool, scope)
            .await
            .map_err(MarketError::Database)?;

    let summaries = db_summaries
        .into_iter()
        .map(summary_from_db)
        .collect::<Result<Vec<_>, _>>()?;

    let filter = ListingFilter {
        search: query.search,
        status,
    };
    let filtered = filter.apply(&summaries);
    let page = paginate(&filtered, query.page.unwrap_or(1), PAGE_SIZE);

    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<Booking>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let db_booking = homeserve_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::NotFound(format!("Booking with ID {} not found", id)))?;

    let is_owner =
        db_booking.client_id == session.user_id || db_booking.provider_id == session.user_id;
    if session.role != UserRole::Admin && !is_owner {
        return Err(AppError(MarketError::Authorization(
            "This booking belongs to another account".to_string(),
        )));
    }

    Ok(Json(booking_from_db(db_booking)?))
}

/// Which status changes a caller may request for a booking. Admins may drive
/// any lifecycle-legal transition; providers accept, decline, or complete
/// their own bookings; clients may only cancel their own pending ones.
fn may_change_status(
    session: &Session,
    booking: &DbBooking,
    current: BookingStatus,
    next: BookingStatus,
) -> bool {
    match session.role {
        UserRole::Admin => true,
        UserRole::Provider => booking.provider_id == session.user_id,
        UserRole::Client => {
            booking.client_id == session.user_id
                && current == BookingStatus::Pending
                && next == BookingStatus::Cancelled
        }
    }
}

#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<UpdateBookingStatusResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let db_booking = homeserve_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(MarketError::Database)?
        .ok_or_else(|| MarketError::NotFound(format!("Booking with ID {} not found", id)))?;

    let current = status_from_db(&db_booking.status)?;
    let next = payload.status;

    if !may_change_status(&session, &db_booking, current, next) {
        return Err(AppError(MarketError::Authorization(
            "This booking cannot be modified by this account".to_string(),
        )));
    }

    if !current.can_transition_to(next) {
        return Err(AppError(MarketError::Validation(format!(
            "A {} booking cannot move to {}",
            current.as_str(),
            next.as_str()
        ))));
    }

    let updated = homeserve_db::repositories::booking::update_booking_status(
        &state.db_pool,
        id,
        current.as_str(),
        next.as_str(),
    )
    .await
    .map_err(MarketError::Database)?;

    let status = status_from_db(&updated.status)?;

    Ok(Json(UpdateBookingStatusResponse {
        id: updated.id,
        status,
        updated_at: updated.updated_at,
    }))
}
