use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slots;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "monday" => Some(Weekday::Monday),
            "tuesday" => Some(Weekday::Tuesday),
            "wednesday" => Some(Weekday::Wednesday),
            "thursday" => Some(Weekday::Thursday),
            "friday" => Some(Weekday::Friday),
            "saturday" => Some(Weekday::Saturday),
            "sunday" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

/// Per-weekday set of offered time slots for a provider.
///
/// Each day's labels stay deduplicated and sorted ascending by hour. Mutation
/// only touches the in-memory map; persisting a day is a separate, explicit
/// repository write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    days: BTreeMap<Weekday, Vec<String>>,
}

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// The offered labels for `day`, empty when none are configured.
    pub fn slots_for(&self, day: Weekday) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_offered(&self, day: Weekday, time: &str) -> bool {
        self.slots_for(day).iter().any(|slot| slot == time)
    }

    /// Removes `time` from `day` if present, otherwise inserts it and
    /// re-sorts. Applying the same toggle twice restores the original map.
    pub fn toggle(&mut self, day: Weekday, time: &str) {
        let slots = self.days.entry(day).or_default();
        match slots.iter().position(|slot| slot == time) {
            Some(index) => {
                slots.remove(index);
            }
            None => {
                slots.push(time.to_string());
                sort_labels(slots);
            }
        }
        if self.days.get(&day).is_some_and(|slots| slots.is_empty()) {
            self.days.remove(&day);
        }
    }

    /// Replaces the labels for `day`, deduplicating and sorting them.
    pub fn set_day(&mut self, day: Weekday, labels: Vec<String>) {
        let mut labels = labels;
        sort_labels(&mut labels);
        labels.dedup();
        if labels.is_empty() {
            self.days.remove(&day);
        } else {
            self.days.insert(day, labels);
        }
    }

    pub fn clear_day(&mut self, day: Weekday) {
        self.days.remove(&day);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[String])> {
        self.days.iter().map(|(day, slots)| (*day, slots.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn sort_labels(labels: &mut [String]) {
    labels.sort_by_key(|label| slots::slot_hour(label).unwrap_or(u32::MAX));
}
