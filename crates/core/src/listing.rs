//! Search, status filtering, and pagination for booking listings.

use serde::Serialize;

use crate::models::booking::{BookingStatus, BookingSummary};

/// Fixed page size for booking listings.
pub const PAGE_SIZE: usize = 10;

/// Search and status criteria for a booking listing. `status: None` means
/// "all"; the search term matches the booking id, client name, or service
/// name, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
}

impl ListingFilter {
    pub fn matches(&self, booking: &BookingSummary) -> bool {
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let term = term.trim().to_lowercase();
            if !term.is_empty() {
                let in_id = booking.id.to_string().to_lowercase().contains(&term);
                let in_client = booking.client_name.to_lowercase().contains(&term);
                let in_service = booking.service_name.to_lowercase().contains(&term);
                if !in_id && !in_client && !in_service {
                    return false;
                }
            }
        }

        true
    }

    pub fn apply(&self, bookings: &[BookingSummary]) -> Vec<BookingSummary> {
        bookings
            .iter()
            .filter(|booking| self.matches(booking))
            .cloned()
            .collect()
    }
}

/// One page of a listing, with enough shape for the pager controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices `items` into the requested page. The page number is clamped to
/// `[1, total_pages]`; an out-of-range request returns the nearest page
/// rather than an error. An empty list yields page 1 with no items.
pub fn paginate<T: Clone>(items: &[T], requested_page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size.max(1));
    let page = requested_page.clamp(1, total_pages.max(1));

    let first = (page - 1) * page_size;
    let last = (first + page_size).min(total_items);
    let page_items = if first < total_items {
        items[first..last].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items: page_items,
        page,
        total_pages,
        total_items,
    }
}
