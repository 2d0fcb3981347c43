//! Draft validation
//!
//! Rules are evaluated as a whole on every draft change and again on submit.
//! A draft is submittable iff its [`ValidationReport`] is empty.

pub mod rules;
pub mod validators;

pub use rules::validate;

use crate::core::draft::DraftField;
use crate::core::error::{FieldViolation, InventoryError, ValidationError};
use indexmap::IndexMap;

/// Violations found in a draft, keyed by field in rule order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: IndexMap<DraftField, FieldViolation>,
}

impl ValidationReport {
    fn record(&mut self, field: DraftField, outcome: Result<(), FieldViolation>) {
        if let Err(violation) = outcome {
            self.violations.insert(field, violation);
        }
    }

    /// True when no rule failed
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation for one field, if it failed
    pub fn get(&self, field: DraftField) -> Option<&FieldViolation> {
        self.violations.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DraftField, &FieldViolation)> {
        self.violations.iter()
    }

    /// Every violation, in rule order
    pub fn violations(&self) -> Vec<FieldViolation> {
        self.violations.values().cloned().collect()
    }

    /// Convert into a validation error carrying every violation
    pub fn into_error(self) -> InventoryError {
        ValidationError::FieldErrors(self.violations.into_values().collect()).into()
    }

    /// `Ok(())` when the draft is valid, the validation error otherwise
    pub fn into_result(self) -> Result<(), InventoryError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}
