use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_hours: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProviderProfile {
    pub id: Uuid,
    pub bio: Option<String>,
    pub hourly_rate: f64,
    pub rating: f64,
    pub completed_jobs: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Provider profile joined with the owning user's display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProviderListing {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub hourly_rate: f64,
    pub rating: f64,
    pub completed_jobs: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityDay {
    pub provider_id: Uuid,
    pub day_of_week: String,
    pub open_hour: i32,
    pub close_hour: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: String,
    pub total: f64,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking row joined with the display names the listing search matches on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookingSummary {
    pub id: Uuid,
    pub client_name: String,
    pub provider_name: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: String,
    pub total: f64,
}
