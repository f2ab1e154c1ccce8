//! Three-step booking flow: pick a schedule, enter contact details, confirm.
//!
//! The wizard owns the in-memory draft until the booking is persisted. Steps
//! advance strictly forward; navigating back keeps everything already
//! entered. A wizard started for an unresolvable service lands in a
//! dedicated terminal state instead of step one.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::service::Service;
use crate::slots;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectingSchedule,
    EnteringDetails,
    Confirmed,
    ServiceNotFound,
}

/// A single field-level validation failure. These block a step transition
/// but never discard sibling fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

/// Joins field errors into a single message for page-level surfaces.
pub fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The client-held accumulation of booking fields across the wizard's steps.
/// It has no identity until submission succeeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ContactDetails {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    service: Option<Service>,
    today: NaiveDate,
    offered_slots: Vec<String>,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<String>,
    draft: BookingDraft,
    confirmation_id: Option<Uuid>,
}

impl BookingWizard {
    /// Starts a fresh wizard. `service: None` (an unknown identifier) lands
    /// directly in the terminal not-found state. `today` is the caller's
    /// current date; earlier dates are never selectable.
    pub fn new(service: Option<Service>, today: NaiveDate) -> Self {
        let step = if service.is_some() {
            WizardStep::SelectingSchedule
        } else {
            WizardStep::ServiceNotFound
        };

        BookingWizard {
            step,
            service,
            today,
            offered_slots: slots::service_day_slots(),
            selected_date: None,
            selected_slot: None,
            draft: BookingDraft::default(),
            confirmation_id: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn offered_slots(&self) -> &[String] {
        &self.offered_slots
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot.as_deref()
    }

    pub fn confirmation_id(&self) -> Option<Uuid> {
        self.confirmation_id
    }

    /// Selects the calendar date for step one. Picking a new date clears any
    /// previously chosen time slot.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), FieldError> {
        if self.step != WizardStep::SelectingSchedule {
            return Err(FieldError::new("date", "the schedule step is closed"));
        }
        if date < self.today {
            return Err(FieldError::new("date", "past dates are not selectable"));
        }

        self.selected_date = Some(date);
        self.selected_slot = None;
        Ok(())
    }

    /// Selects a time slot for step one. The label must come from the
    /// offered grid.
    pub fn select_time_slot(&mut self, label: &str) -> Result<(), FieldError> {
        if self.step != WizardStep::SelectingSchedule {
            return Err(FieldError::new("time_slot", "the schedule step is closed"));
        }
        if !self.offered_slots.iter().any(|slot| slot == label) {
            return Err(FieldError::new(
                "time_slot",
                format!("{} is not an offered time slot", label),
            ));
        }

        self.selected_slot = Some(label.to_string());
        Ok(())
    }

    /// Advances from schedule selection to detail entry. Both a date and a
    /// time slot must be chosen; otherwise the step and the draft are left
    /// untouched and the missing fields are reported.
    pub fn continue_to_details(&mut self) -> Result<(), Vec<FieldError>> {
        if self.step != WizardStep::SelectingSchedule {
            return Err(vec![FieldError::new("step", "not at the schedule step")]);
        }

        let mut errors = Vec::new();
        if self.selected_date.is_none() {
            errors.push(FieldError::new("date", "a date must be selected"));
        }
        if self.selected_slot.is_none() {
            errors.push(FieldError::new("time_slot", "a time slot must be selected"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        self.draft.date = self.selected_date;
        self.draft.time_slot = self.selected_slot.clone();
        self.step = WizardStep::EnteringDetails;
        Ok(())
    }

    /// Records the contact details and completes the draft, fixing the total
    /// to the service's listed price. Everything entered is kept on the
    /// draft even when validation fails.
    pub fn submit_details(&mut self, details: ContactDetails) -> Result<(), Vec<FieldError>> {
        if self.step != WizardStep::EnteringDetails {
            return Err(vec![FieldError::new("step", "not at the details step")]);
        }

        self.draft.address = Some(details.address.clone());
        self.draft.phone = Some(details.phone.clone());
        self.draft.email = Some(details.email.clone());
        self.draft.notes = details.notes.clone();

        let mut errors = Vec::new();
        if details.address.trim().is_empty() {
            errors.push(FieldError::new("address", "a service address is required"));
        }
        if details.phone.trim().is_empty() {
            errors.push(FieldError::new("phone", "a phone number is required"));
        }
        if !is_valid_email(&details.email) {
            errors.push(FieldError::new("email", "a valid email address is required"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        // The details step is unreachable without a resolved service
        let Some(service) = self.service.as_ref() else {
            return Err(vec![FieldError::new("step", "not at the details step")]);
        };
        self.draft.total = Some(service.price);
        Ok(())
    }

    /// Whether the draft holds everything needed for submission.
    pub fn is_ready_to_submit(&self) -> bool {
        self.step == WizardStep::EnteringDetails && self.draft.total.is_some()
    }

    /// Enters the terminal confirmed state with the identifier assigned by
    /// the persistence layer. No further edits are possible afterwards.
    pub fn confirm(&mut self, booking_id: Uuid) -> Result<(), FieldError> {
        if !self.is_ready_to_submit() {
            return Err(FieldError::new("step", "the draft is not ready to submit"));
        }

        self.confirmation_id = Some(booking_id);
        self.step = WizardStep::Confirmed;
        Ok(())
    }

    /// Navigates back from detail entry to schedule selection. Previously
    /// entered values are restored, not discarded.
    pub fn back(&mut self) {
        if self.step == WizardStep::EnteringDetails {
            self.step = WizardStep::SelectingSchedule;
        }
    }
}

/// Address-shape check: ASCII, a local part, an "@", and a domain containing
/// a dot. Case does not matter.
pub fn is_valid_email(email: &str) -> bool {
    if !email.is_ascii() || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
