use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether the lifecycle permits moving from `self` to `next`. The
    /// lifecycle is strictly forward: pending may be confirmed or cancelled,
    /// confirmed may be completed or cancelled, and completed and cancelled
    /// are terminal.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Display badge for the status column in listing views.
    pub fn badge(&self) -> StatusBadge {
        match self {
            BookingStatus::Pending => StatusBadge { color: "amber", icon: "clock" },
            BookingStatus::Confirmed => StatusBadge { color: "blue", icon: "calendar" },
            BookingStatus::Completed => StatusBadge { color: "green", icon: "check" },
            BookingStatus::Cancelled => StatusBadge { color: "red", icon: "cross" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub color: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: BookingStatus,
    pub total: f64,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub id: Uuid,
    pub status: BookingStatus,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Row shape for the booking listing views, with the joined display names
/// the search box matches against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub id: Uuid,
    pub client_name: String,
    pub provider_name: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: BookingStatus,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusResponse {
    pub id: Uuid,
    pub status: BookingStatus,
    pub updated_at: DateTime<Utc>,
}
