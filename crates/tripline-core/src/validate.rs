//! Validation rules for trips, activities, and packing lists.
//!
//! Validation is collect-all: every rule is checked and every violation is
//! recorded before anything is reported, so a single failed call carries the
//! complete list of problems as one [`TripError::Validation`].
//!
//! Create-validation checks every field. Update-validation checks only the
//! fields actually provided; an absent field is never an error. Successful
//! validation yields a cleaned value (leading/trailing whitespace trimmed,
//! empty optionals normalized to `None`) ready for storage.
//!
//! Note the asymmetry between the primitives and the trip rule: a trip
//! requires its end date to be strictly after its start date, while the
//! generic range checks in [`crate::datetime`] accept a single-day range.

use crate::datetime;
use crate::error::{Result, TripError, ValidationError};
use crate::models::{Activity, DateRange};
use crate::params::{
    AddPackingItem, CreateActivity, CreatePackingList, CreateTrip, UpdateActivity,
    UpdatePackingItem, UpdateTrip,
};

/// Field length limits, shared between create and update validation.
pub mod limits {
    pub const NAME_MAX: usize = 100;
    pub const DESTINATION_MAX: usize = 100;
    pub const LOCATION_MAX: usize = 100;
    pub const DESCRIPTION_MAX: usize = 1000;
    pub const NOTES_MAX: usize = 1000;
}

/// Checks that a string is present and non-blank after trimming.
fn required_string(value: &str, field: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::new(field, format!("{field} is required")))
    } else {
        None
    }
}

/// Checks an upper length bound on the trimmed value.
///
/// Blank values pass; presence is [`required_string`]'s concern.
fn string_length(value: &str, field: &str, max: usize) -> Option<ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() > max {
        return Some(ValidationError::new(
            field,
            format!("{field} must be no more than {max} characters long"),
        ));
    }
    None
}

fn positive_quantity(value: u32, field: &str) -> Option<ValidationError> {
    if value == 0 {
        Some(ValidationError::new(
            field,
            format!("{field} must be a positive integer"),
        ))
    } else {
        None
    }
}

/// Trims a string, mapping a blank result to `None`.
fn clean_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Appends range-containment errors for an activity date already known to
/// be well-formed.
fn check_date_in_trip_range(date: &str, range: &DateRange, errors: &mut Vec<ValidationError>) {
    if datetime::compare_dates(date, &range.start) == std::cmp::Ordering::Less {
        errors.push(ValidationError::new(
            "date",
            format!(
                "Activity date cannot be before trip start date ({})",
                datetime::format_date_for_display(&range.start)
            ),
        ));
    }
    if datetime::compare_dates(date, &range.end) == std::cmp::Ordering::Greater {
        errors.push(ValidationError::new(
            "date",
            format!(
                "Activity date cannot be after trip end date ({})",
                datetime::format_date_for_display(&range.end)
            ),
        ));
    }
}

/// A fully validated and cleaned trip creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreateTrip {
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Option<String>,
}

/// A validated partial trip update. Only provided fields are set.
///
/// `description` is doubly optional: the outer layer records whether the
/// field was provided, the inner layer whether it carries a value or clears
/// the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidUpdateTrip {
    pub name: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<Option<String>>,
}

/// Validates a trip creation request, checking every field.
///
/// # Errors
///
/// Returns [`TripError::Validation`] with one entry per violated rule.
pub fn validate_create_trip(params: &CreateTrip) -> Result<ValidCreateTrip> {
    let mut errors = Vec::new();

    if let Some(e) = required_string(&params.name, "name") {
        errors.push(e);
    }
    if let Some(e) = required_string(&params.destination, "destination") {
        errors.push(e);
    }
    if let Some(e) = string_length(&params.name, "name", limits::NAME_MAX) {
        errors.push(e);
    }
    if let Some(e) = string_length(&params.destination, "destination", limits::DESTINATION_MAX) {
        errors.push(e);
    }
    if let Some(desc) = &params.description {
        if let Some(e) = string_length(desc, "description", limits::DESCRIPTION_MAX) {
            errors.push(e);
        }
    }

    let start_valid = datetime::is_valid_date_string(&params.start_date);
    let end_valid = datetime::is_valid_date_string(&params.end_date);
    if !start_valid {
        errors.push(ValidationError::new(
            "start_date",
            "Start date must be in YYYY-MM-DD format",
        ));
    }
    if !end_valid {
        errors.push(ValidationError::new(
            "end_date",
            "End date must be in YYYY-MM-DD format",
        ));
    }

    // Trips must span at least one night: strictly after, not at-or-after.
    if start_valid
        && end_valid
        && datetime::compare_dates(&params.end_date, &params.start_date)
            != std::cmp::Ordering::Greater
    {
        errors.push(ValidationError::new(
            "end_date",
            "End date must be after start date",
        ));
    }

    if !errors.is_empty() {
        return Err(TripError::validation(errors));
    }

    Ok(ValidCreateTrip {
        name: params.name.trim().to_string(),
        destination: params.destination.trim().to_string(),
        start_date: params.start_date.clone(),
        end_date: params.end_date.clone(),
        description: params.description.as_deref().and_then(clean_optional),
    })
}

/// Validates a partial trip update; only provided fields are checked.
///
/// The strict date-range rule applies only when both dates are provided
/// together. A single provided date is checked for format only, not against
/// the stored counterpart.
///
/// # Errors
///
/// Returns [`TripError::Validation`] with one entry per violated rule.
pub fn validate_update_trip(params: &UpdateTrip) -> Result<ValidUpdateTrip> {
    let mut errors = Vec::new();

    if let Some(name) = &params.name {
        if let Some(e) = required_string(name, "name") {
            errors.push(e);
        }
        if let Some(e) = string_length(name, "name", limits::NAME_MAX) {
            errors.push(e);
        }
    }
    if let Some(destination) = &params.destination {
        if let Some(e) = required_string(destination, "destination") {
            errors.push(e);
        }
        if let Some(e) = string_length(destination, "destination", limits::DESTINATION_MAX) {
            errors.push(e);
        }
    }
    if let Some(desc) = &params.description {
        if let Some(e) = string_length(desc, "description", limits::DESCRIPTION_MAX) {
            errors.push(e);
        }
    }

    if let Some(start) = &params.start_date {
        if !datetime::is_valid_date_string(start) {
            errors.push(ValidationError::new(
                "start_date",
                "Start date must be in YYYY-MM-DD format",
            ));
        }
    }
    if let Some(end) = &params.end_date {
        if !datetime::is_valid_date_string(end) {
            errors.push(ValidationError::new(
                "end_date",
                "End date must be in YYYY-MM-DD format",
            ));
        }
    }

    if let (Some(start), Some(end)) = (&params.start_date, &params.end_date) {
        if datetime::is_valid_date_string(start)
            && datetime::is_valid_date_string(end)
            && datetime::compare_dates(end, start) != std::cmp::Ordering::Greater
        {
            errors.push(ValidationError::new(
                "end_date",
                "End date must be after start date",
            ));
        }
    }

    if !errors.is_empty() {
        return Err(TripError::validation(errors));
    }

    Ok(ValidUpdateTrip {
        name: params.name.as_ref().map(|n| n.trim().to_string()),
        destination: params.destination.as_ref().map(|d| d.trim().to_string()),
        start_date: params.start_date.clone(),
        end_date: params.end_date.clone(),
        description: params.description.as_deref().map(clean_optional),
    })
}

/// A fully validated and cleaned activity creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreateActivity {
    pub trip_id: u64,
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// A validated partial activity update. Only provided fields are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidUpdateActivity {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

/// Validates an activity creation request against its parent trip's dates.
///
/// The caller supplies the trip's date range; this function does no lookups
/// of its own. The activity date must fall within the range, inclusive on
/// both ends.
///
/// # Errors
///
/// Returns [`TripError::Validation`] with one entry per violated rule.
pub fn validate_create_activity(
    params: &CreateActivity,
    trip_range: &DateRange,
) -> Result<ValidCreateActivity> {
    let mut errors = Vec::new();

    if let Some(e) = required_string(&params.name, "name") {
        errors.push(e);
    }
    if let Some(e) = string_length(&params.name, "name", limits::NAME_MAX) {
        errors.push(e);
    }
    if let Some(location) = &params.location {
        if let Some(e) = string_length(location, "location", limits::LOCATION_MAX) {
            errors.push(e);
        }
    }
    if let Some(notes) = &params.notes {
        if let Some(e) = string_length(notes, "notes", limits::NOTES_MAX) {
            errors.push(e);
        }
    }

    if !datetime::is_valid_date_string(&params.date) {
        errors.push(ValidationError::new(
            "date",
            "Date must be in YYYY-MM-DD format",
        ));
    } else {
        check_date_in_trip_range(&params.date, trip_range, &mut errors);
    }

    if let Some(time) = params.time.as_deref() {
        if !datetime::is_valid_time_string(time) {
            errors.push(ValidationError::new("time", "Time must be in HH:MM format"));
        }
    }

    if !errors.is_empty() {
        return Err(TripError::validation(errors));
    }

    Ok(ValidCreateActivity {
        trip_id: params.trip_id,
        name: params.name.trim().to_string(),
        date: params.date.clone(),
        time: params.time.as_deref().and_then(clean_optional),
        location: params.location.as_deref().and_then(clean_optional),
        notes: params.notes.as_deref().and_then(clean_optional),
    })
}

/// Validates a partial activity update; only provided fields are checked.
///
/// A provided date must still fall within the parent trip's range. A
/// provided empty string for `time`, `location`, or `notes` clears the
/// stored value.
///
/// # Errors
///
/// Returns [`TripError::Validation`] with one entry per violated rule.
pub fn validate_update_activity(
    params: &UpdateActivity,
    trip_range: &DateRange,
) -> Result<ValidUpdateActivity> {
    let mut errors = Vec::new();

    if let Some(name) = &params.name {
        if let Some(e) = required_string(name, "name") {
            errors.push(e);
        }
        if let Some(e) = string_length(name, "name", limits::NAME_MAX) {
            errors.push(e);
        }
    }
    if let Some(location) = &params.location {
        if let Some(e) = string_length(location, "location", limits::LOCATION_MAX) {
            errors.push(e);
        }
    }
    if let Some(notes) = &params.notes {
        if let Some(e) = string_length(notes, "notes", limits::NOTES_MAX) {
            errors.push(e);
        }
    }

    if let Some(date) = &params.date {
        if !datetime::is_valid_date_string(date) {
            errors.push(ValidationError::new(
                "date",
                "Date must be in YYYY-MM-DD format",
            ));
        } else {
            check_date_in_trip_range(date, trip_range, &mut errors);
        }
    }

    if let Some(time) = params.time.as_deref() {
        if !datetime::is_valid_time_string(time) {
            errors.push(ValidationError::new("time", "Time must be in HH:MM format"));
        }
    }

    if !errors.is_empty() {
        return Err(TripError::validation(errors));
    }

    Ok(ValidUpdateActivity {
        name: params.name.as_ref().map(|n| n.trim().to_string()),
        date: params.date.clone(),
        time: params.time.as_deref().map(clean_optional),
        location: params.location.as_deref().map(clean_optional),
        notes: params.notes.as_deref().map(clean_optional),
    })
}

/// Checks a proposed date/time slot against a trip's existing activities.
///
/// Two activities conflict when they share both an exact date and an exact
/// time string. Activities without a time never conflict. When updating an
/// existing activity, pass its ID as `exclude` so it does not conflict with
/// itself.
///
/// Returns the violation rather than an error so callers can treat the
/// check as advisory or enforced as they see fit.
pub fn check_time_conflict(
    date: &str,
    time: Option<&str>,
    existing: &[Activity],
    exclude: Option<u64>,
) -> Option<ValidationError> {
    let time = time.filter(|t| !t.is_empty())?;

    let conflict = existing.iter().find(|activity| {
        if exclude == Some(activity.id) {
            return false;
        }
        activity.date == date && activity.time.as_deref() == Some(time)
    })?;

    Some(ValidationError::new(
        "time",
        format!("Time conflicts with existing activity: {}", conflict.name),
    ))
}

/// Validates a packing list creation request.
///
/// # Errors
///
/// Returns [`TripError::Validation`] with one entry per violated rule.
pub fn validate_create_packing_list(params: &CreatePackingList) -> Result<String> {
    let mut errors = Vec::new();

    if let Some(e) = required_string(&params.name, "name") {
        errors.push(e);
    }
    if let Some(e) = string_length(&params.name, "name", limits::NAME_MAX) {
        errors.push(e);
    }

    if !errors.is_empty() {
        return Err(TripError::validation(errors));
    }

    Ok(params.name.trim().to_string())
}

/// A validated packing item addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAddPackingItem {
    pub packing_list_id: u64,
    pub name: String,
    pub quantity: u32,
}

/// Validates a packing item addition.
///
/// # Errors
///
/// Returns [`TripError::Validation`] with one entry per violated rule.
pub fn validate_add_packing_item(params: &AddPackingItem) -> Result<ValidAddPackingItem> {
    let mut errors = Vec::new();

    if let Some(e) = required_string(&params.name, "name") {
        errors.push(e);
    }
    if let Some(e) = string_length(&params.name, "name", limits::NAME_MAX) {
        errors.push(e);
    }
    if let Some(e) = positive_quantity(params.quantity, "quantity") {
        errors.push(e);
    }

    if !errors.is_empty() {
        return Err(TripError::validation(errors));
    }

    Ok(ValidAddPackingItem {
        packing_list_id: params.packing_list_id,
        name: params.name.trim().to_string(),
        quantity: params.quantity,
    })
}

/// Validates a partial packing item update; only provided fields are checked.
///
/// # Errors
///
/// Returns [`TripError::Validation`] with one entry per violated rule.
pub fn validate_update_packing_item(params: &UpdatePackingItem) -> Result<()> {
    let mut errors = Vec::new();

    if let Some(name) = &params.name {
        if let Some(e) = required_string(name, "name") {
            errors.push(e);
        }
        if let Some(e) = string_length(name, "name", limits::NAME_MAX) {
            errors.push(e);
        }
    }
    if let Some(quantity) = params.quantity {
        if let Some(e) = positive_quantity(quantity, "quantity") {
            errors.push(e);
        }
    }

    if !errors.is_empty() {
        return Err(TripError::validation(errors));
    }

    Ok(())
}
