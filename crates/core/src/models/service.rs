use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Plumbing,
    Electrical,
    Cleaning,
    Carpentry,
    Painting,
    Gardening,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::Plumbing,
        ServiceCategory::Electrical,
        ServiceCategory::Cleaning,
        ServiceCategory::Carpentry,
        ServiceCategory::Painting,
        ServiceCategory::Gardening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Electrical => "electrical",
            ServiceCategory::Cleaning => "cleaning",
            ServiceCategory::Carpentry => "carpentry",
            ServiceCategory::Painting => "painting",
            ServiceCategory::Gardening => "gardening",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plumbing" => Some(ServiceCategory::Plumbing),
            "electrical" => Some(ServiceCategory::Electrical),
            "cleaning" => Some(ServiceCategory::Cleaning),
            "carpentry" => Some(ServiceCategory::Carpentry),
            "painting" => Some(ServiceCategory::Painting),
            "gardening" => Some(ServiceCategory::Gardening),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub category: ServiceCategory,
    pub description: Option<String>,
    pub price: f64,
    pub duration_hours: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub category: ServiceCategory,
    pub description: Option<String>,
    pub price: f64,
    pub duration_hours: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub category: Option<ServiceCategory>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_hours: Option<i32>,
    pub image_url: Option<String>,
}
