use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::availability::WeeklyAvailability;
use crate::models::service::ServiceCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: Uuid,
    pub bio: Option<String>,
    pub hourly_rate: f64,
    /// Maintained by the marketplace from reviews; read-only here.
    pub rating: f64,
    /// Maintained by the marketplace; read-only here.
    pub completed_jobs: i32,
    pub categories: Vec<ServiceCategory>,
    pub availability: WeeklyAvailability,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub hourly_rate: f64,
    pub rating: f64,
    pub completed_jobs: i32,
    pub categories: Vec<ServiceCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProviderResponse {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub hourly_rate: f64,
    pub rating: f64,
    pub completed_jobs: i32,
    pub categories: Vec<ServiceCategory>,
    pub availability: WeeklyAvailability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProviderProfileRequest {
    pub bio: Option<String>,
    pub hourly_rate: Option<f64>,
    pub categories: Option<Vec<ServiceCategory>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertAvailabilityRequest {
    pub day: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAvailabilityResponse {
    pub availability: WeeklyAvailability,
}
