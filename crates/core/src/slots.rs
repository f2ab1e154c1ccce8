//! Canonical grid of bookable time labels for a working day.

/// Opening hour of the standard service day.
pub const SERVICE_DAY_OPEN_HOUR: u32 = 8;
/// Closing hour of the standard service day.
pub const SERVICE_DAY_CLOSE_HOUR: u32 = 18;

/// Produces the bookable time labels between `open_hour` (inclusive) and
/// `close_hour` (exclusive) at one-hour stride, formatted as "H:00".
///
/// Returns an empty grid when `open_hour >= close_hour`.
pub fn generate_time_slots(open_hour: u32, close_hour: u32) -> Vec<String> {
    if open_hour >= close_hour {
        return Vec::new();
    }

    (open_hour..close_hour.min(24))
        .map(|hour| format!("{}:00", hour))
        .collect()
}

/// The grid for the standard service day.
pub fn service_day_slots() -> Vec<String> {
    generate_time_slots(SERVICE_DAY_OPEN_HOUR, SERVICE_DAY_CLOSE_HOUR)
}

/// Parses the hour out of a slot label of the form "H:00".
pub fn slot_hour(label: &str) -> Option<u32> {
    let (hour, minutes) = label.split_once(':')?;
    if minutes != "00" {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    (hour < 24).then_some(hour)
}
