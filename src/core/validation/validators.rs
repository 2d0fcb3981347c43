//! Reusable field validators
//!
//! Each validator is a closure taking the field name and the value under
//! test, returning the violation it detects.

use crate::core::error::{FieldViolation, ViolationKind};
use chrono::NaiveDate;

/// Validator: text must contain something other than whitespace
pub fn required_text(
    message: &'static str,
) -> impl Fn(&str, &str) -> Result<(), FieldViolation> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if value.trim().is_empty() {
            Err(FieldViolation::new(field, ViolationKind::RequiredField, message))
        } else {
            Ok(())
        }
    }
}

/// Validator: a choice must have been made
pub fn required_choice<T>(
    message: &'static str,
) -> impl Fn(&str, Option<&T>) -> Result<(), FieldViolation> + Send + Sync + Clone {
    move |field: &str, value: Option<&T>| match value {
        Some(_) => Ok(()),
        None => Err(FieldViolation::new(field, ViolationKind::RequiredField, message)),
    }
}

/// Validator: number must be present and strictly positive
pub fn positive(
    message: &'static str,
) -> impl Fn(&str, Option<f64>) -> Result<(), FieldViolation> + Send + Sync + Clone {
    move |field: &str, value: Option<f64>| match value {
        Some(num) if num > 0.0 => Ok(()),
        _ => Err(FieldViolation::new(field, ViolationKind::InvalidRange, message)),
    }
}

/// Validator: number, if present, must lie in `[min, max]`
pub fn within(
    min: f64,
    max: f64,
    message: &'static str,
) -> impl Fn(&str, Option<f64>) -> Result<(), FieldViolation> + Send + Sync + Clone {
    move |field: &str, value: Option<f64>| match value {
        Some(num) if num < min || num > max => {
            Err(FieldViolation::new(field, ViolationKind::InvalidRange, message))
        }
        _ => Ok(()),
    }
}

/// Validator: date, if present, must not be earlier than `earliest`
pub fn not_before(
    earliest: NaiveDate,
    message: &'static str,
) -> impl Fn(&str, Option<NaiveDate>) -> Result<(), FieldViolation> + Send + Sync + Clone {
    move |field: &str, value: Option<NaiveDate>| match value {
        Some(date) if date < earliest => {
            Err(FieldViolation::new(field, ViolationKind::InvalidDate, message))
        }
        _ => Ok(()),
    }
}
