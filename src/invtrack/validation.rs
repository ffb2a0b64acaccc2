//! Field-level checks for the entry form.
//!
//! The store only enforces id uniqueness. Everything else about a record's
//! shape is checked here, before the store is called, and reported as a
//! [`ValidationError`] naming the offending field.

use crate::model::{InventoryRecord, SENTINEL};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,6}$").unwrap());
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{2})$").unwrap());

pub const MAX_QUANTITY: u32 = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Item ID must contain digits only (1-6 characters)")]
    InvalidId,
    #[error("Item Name must be between 2 and 50 characters")]
    NameLength,
    #[error("Please select a Category")]
    MissingCategory,
    #[error("Quantity must be a whole number")]
    QuantityNotNumber,
    #[error("Quantity must be between 1 and 10000")]
    QuantityOutOfRange,
    #[error("Please select a Unit")]
    MissingUnit,
    #[error("Location must be between 2 and 30 characters")]
    LocationLength,
    #[error("Please select a Condition")]
    MissingCondition,
    #[error("Date Acquired must use the DD/MM/YY format")]
    DateFormat,
    #[error("Date Acquired has an invalid day or month")]
    DateOutOfRange,
}

/// Raw text of the eight entry fields, as typed or picked by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub unit: String,
    pub location: String,
    pub condition: String,
    pub date_acquired: String,
}

impl From<&InventoryRecord> for RecordForm {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            category: record.category.clone(),
            quantity: record.quantity.to_string(),
            unit: record.unit.clone(),
            location: record.location.clone(),
            condition: record.condition.clone(),
            date_acquired: record.date_acquired.clone(),
        }
    }
}

fn char_len_within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

fn is_chosen(value: &str) -> bool {
    !value.is_empty() && value != SENTINEL
}

fn check_date(value: &str) -> Result<(), ValidationError> {
    let caps = DATE_PATTERN
        .captures(value)
        .ok_or(ValidationError::DateFormat)?;
    let day: u32 = caps[1].parse().map_err(|_| ValidationError::DateFormat)?;
    let month: u32 = caps[2].parse().map_err(|_| ValidationError::DateFormat)?;
    // Day and month ranges only; 31/02 passes.
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(ValidationError::DateOutOfRange);
    }
    Ok(())
}

/// Checks every field in form order and returns the first failure.
///
/// Text fields are trimmed before checking and the trimmed value is what
/// ends up in the record.
pub fn validate(form: &RecordForm) -> Result<InventoryRecord, ValidationError> {
    let id = form.id.trim();
    if !ID_PATTERN.is_match(id) {
        return Err(ValidationError::InvalidId);
    }

    let name = form.name.trim();
    if !char_len_within(name, 2, 50) {
        return Err(ValidationError::NameLength);
    }

    let category = form.category.trim();
    if !is_chosen(category) {
        return Err(ValidationError::MissingCategory);
    }

    let quantity: u32 = form
        .quantity
        .trim()
        .parse()
        .map_err(|_| ValidationError::QuantityNotNumber)?;
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(ValidationError::QuantityOutOfRange);
    }

    let unit = form.unit.trim();
    if !is_chosen(unit) {
        return Err(ValidationError::MissingUnit);
    }

    let location = form.location.trim();
    if !char_len_within(location, 2, 30) {
        return Err(ValidationError::LocationLength);
    }

    let condition = form.condition.trim();
    if !is_chosen(condition) {
        return Err(ValidationError::MissingCondition);
    }

    let date_acquired = form.date_acquired.trim();
    check_date(date_acquired)?;

    Ok(InventoryRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        unit: unit.to_string(),
        location: location.to_string(),
        condition: condition.to_string(),
        date_acquired: date_acquired.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RecordForm {
        RecordForm {
            id: "42".into(),
            name: "Desk".into(),
            category: "Furniture".into(),
            quantity: "3".into(),
            unit: "pcs".into(),
            location: "Lab".into(),
            condition: "New".into(),
            date_acquired: "15/06/23".into(),
        }
    }

    #[test]
    fn accepts_valid_form() {
        let record = validate(&form()).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.quantity, 3);
    }

    #[test]
    fn trims_text_fields() {
        let mut f = form();
        f.name = "  Desk  ".into();
        assert_eq!(validate(&f).unwrap().name, "Desk");
    }

    #[test]
    fn rejects_bad_ids() {
        for id in ["", "abc", "1234567", "12a"] {
            let mut f = form();
            f.id = id.into();
            assert_eq!(validate(&f), Err(ValidationError::InvalidId), "id {:?}", id);
        }
    }

    #[test]
    fn rejects_sentinel_choices() {
        let mut f = form();
        f.category = SENTINEL.into();
        assert_eq!(validate(&f), Err(ValidationError::MissingCategory));

        let mut f = form();
        f.unit = String::new();
        assert_eq!(validate(&f), Err(ValidationError::MissingUnit));

        let mut f = form();
        f.condition = SENTINEL.into();
        assert_eq!(validate(&f), Err(ValidationError::MissingCondition));
    }

    #[test]
    fn checks_quantity() {
        let mut f = form();
        f.quantity = "many".into();
        assert_eq!(validate(&f), Err(ValidationError::QuantityNotNumber));

        f.quantity = "0".into();
        assert_eq!(validate(&f), Err(ValidationError::QuantityOutOfRange));

        f.quantity = "10001".into();
        assert_eq!(validate(&f), Err(ValidationError::QuantityOutOfRange));

        f.quantity = "10000".into();
        assert!(validate(&f).is_ok());
    }

    #[test]
    fn checks_lengths() {
        let mut f = form();
        f.name = "D".into();
        assert_eq!(validate(&f), Err(ValidationError::NameLength));

        let mut f = form();
        f.location = "x".repeat(31);
        assert_eq!(validate(&f), Err(ValidationError::LocationLength));
    }

    #[test]
    fn date_checks_ranges_but_not_calendar() {
        let mut f = form();
        f.date_acquired = "31/02/24".into();
        assert!(validate(&f).is_ok());

        f.date_acquired = "32/01/24".into();
        assert_eq!(validate(&f), Err(ValidationError::DateOutOfRange));

        f.date_acquired = "00/01/24".into();
        assert_eq!(validate(&f), Err(ValidationError::DateOutOfRange));

        f.date_acquired = "1/1/24".into();
        assert_eq!(validate(&f), Err(ValidationError::DateFormat));

        f.date_acquired = "2024-01-01".into();
        assert_eq!(validate(&f), Err(ValidationError::DateFormat));
    }

    #[test]
    fn first_failing_field_wins() {
        let mut f = form();
        f.name = "x".into();
        f.location = "y".into();
        assert_eq!(validate(&f), Err(ValidationError::NameLength));
    }
}
