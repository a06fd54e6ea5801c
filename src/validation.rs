use crate::models::SampleUpdate;
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

const EARLIEST_YEAR: i32 = 1900;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Date is required")]
    MissingDate,
    #[error("Date must be a calendar date in YYYY-MM-DD form")]
    InvalidDate,
    #[error("Date must be in the past or present")]
    FutureDate,
    #[error("Date must not be before 1900-01-01")]
    DateTooEarly,
    #[error("Weight is required")]
    MissingWeight,
    #[error("Weight must be a number")]
    InvalidWeight,
    #[error("Weight must be greater than 0")]
    NonPositiveWeight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidEntry {
    pub date: NaiveDate,
    pub weight: f64,
    pub notes: Option<String>,
}

pub fn validate_entry(
    date: Option<NaiveDate>,
    weight: Option<f64>,
    notes: Option<String>,
    today: NaiveDate,
) -> Result<ValidEntry, ValidationError> {
    let date = check_date(date.ok_or(ValidationError::MissingDate)?, today)?;
    let weight = check_weight(weight.ok_or(ValidationError::MissingWeight)?)?;
    Ok(ValidEntry {
        date,
        weight,
        notes: clean_notes(notes),
    })
}

/// Parses the raw text of the index page form, then validates it like any other entry.
pub fn validate_form(
    date: &str,
    weight: &str,
    notes: &str,
    today: NaiveDate,
) -> Result<ValidEntry, ValidationError> {
    let date = match date.trim() {
        "" => None,
        raw => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?,
        ),
    };
    let weight = match weight.trim() {
        "" => None,
        raw => Some(
            raw.parse::<f64>()
                .map_err(|_| ValidationError::InvalidWeight)?,
        ),
    };
    validate_entry(date, weight, Some(notes.to_string()), today)
}

/// Checks only the fields an edit actually supplies. Blank notes stay as an
/// empty string, which clears the stored notes.
pub fn validate_update(
    changes: SampleUpdate,
    today: NaiveDate,
) -> Result<SampleUpdate, ValidationError> {
    Ok(SampleUpdate {
        date: changes.date.map(|date| check_date(date, today)).transpose()?,
        weight: changes.weight.map(check_weight).transpose()?,
        notes: changes.notes.map(|notes| notes.trim().to_string()),
    })
}

fn check_date(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if date > today {
        return Err(ValidationError::FutureDate);
    }
    if date.year() < EARLIEST_YEAR {
        return Err(ValidationError::DateTooEarly);
    }
    Ok(date)
}

fn check_weight(weight: f64) -> Result<f64, ValidationError> {
    if !weight.is_finite() {
        return Err(ValidationError::InvalidWeight);
    }
    if weight <= 0.0 {
        return Err(ValidationError::NonPositiveWeight);
    }
    Ok(weight)
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty())
}
