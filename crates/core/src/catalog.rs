//! Filtering over the service catalog.

use serde::{Deserialize, Serialize};

use crate::models::service::{Service, ServiceCategory};

/// Filter configuration for the catalog. Every set field must match for a
/// service to pass; an empty configuration is the identity filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: Option<ServiceCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search_term: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, service: &Service) -> bool {
        if let Some(category) = self.category {
            if service.category != category {
                return false;
            }
        }

        if let Some(min_price) = self.min_price {
            if service.price < min_price {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if service.price > max_price {
                return false;
            }
        }

        if let Some(term) = &self.search_term {
            let term = term.trim().to_lowercase();
            if !term.is_empty() {
                let in_name = service.name.to_lowercase().contains(&term);
                let in_description = service
                    .description
                    .as_ref()
                    .is_some_and(|description| description.to_lowercase().contains(&term));
                if !in_name && !in_description {
                    return false;
                }
            }
        }

        true
    }

    /// Produces the filtered subsequence, preserving the source order and
    /// leaving the source list untouched.
    pub fn apply(&self, services: &[Service]) -> Vec<Service> {
        services
            .iter()
            .filter(|service| self.matches(service))
            .cloned()
            .collect()
    }
}
