//! The create/edit form controller
//!
//! Holds one draft and its live validation report. The controller moves
//! through a small state machine:
//!
//! ```text
//! Create ─┐                    ┌─> Done
//!         ├─ submit ─> Submitting
//! Edit ───┘                    └─> back to Create/Edit on a store error
//! ```
//!
//! `submit` gates and starts a submission; `commit` performs it against the
//! store. Between the two the draft is frozen and further submits report
//! [`SubmitOutcome::InFlight`].

use crate::controllers::navigation::Navigation;
use crate::core::clock::Clock;
use crate::core::draft::{DraftField, ProductDraft};
use crate::core::entity::ProductRecord;
use crate::core::error::{EntityError, InventoryResult, ValidationError};
use crate::core::store::ProductStore;
use crate::core::validation::{self, ValidationReport};
use std::sync::Arc;

pub const SAVED_MESSAGE: &str = "Product saved";
pub const UPDATED_MESSAGE: &str = "Product updated";

/// Where the form is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Blank form; no id bound
    Create,
    /// Pre-populated from an existing record
    Edit { id: String },
    /// A valid draft is being committed; `id` is set when editing
    Submitting { id: Option<String> },
    /// Commit succeeded
    Done,
}

impl FormMode {
    fn is_editable(&self) -> bool {
        matches!(self, FormMode::Create | FormMode::Edit { .. })
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft was valid and the form is now submitting
    Started,
    /// One or more rules failed; the form stays where it was
    Blocked(ValidationReport),
    /// A submission is already in progress
    InFlight,
    /// The form already completed
    Finished,
}

/// Feedback after a successful commit
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitFeedback {
    pub message: &'static str,
    pub record: ProductRecord,
    pub navigate: Navigation,
}

/// Result of opening the form for a route
pub enum FormEntry {
    Ready(ProductFormController),
    /// The edit target does not exist
    Redirect(Navigation),
}

pub struct ProductFormController {
    draft: ProductDraft,
    report: ValidationReport,
    mode: FormMode,
    clock: Arc<dyn Clock>,
}

impl ProductFormController {
    /// A blank create form
    pub fn create(clock: Arc<dyn Clock>) -> Self {
        Self::with_draft(ProductDraft::default(), FormMode::Create, clock)
    }

    /// An edit form pre-populated from the record with `id`
    pub fn edit(store: &ProductStore, id: &str) -> InventoryResult<Self> {
        let record = store
            .get(id)
            .ok_or_else(|| EntityError::NotFound { id: id.to_string() })?;
        Ok(Self::with_draft(
            ProductDraft::from(record),
            FormMode::Edit { id: id.to_string() },
            store.clock(),
        ))
    }

    /// Open the form for a route: create when `id` is `None`, edit otherwise
    pub fn enter(store: &ProductStore, id: Option<&str>) -> FormEntry {
        match id {
            None => FormEntry::Ready(Self::create(store.clock())),
            Some(id) => match Self::edit(store, id) {
                Ok(form) => FormEntry::Ready(form),
                Err(e) => {
                    tracing::debug!(id = %id, error = %e, "Edit target missing, redirecting");
                    FormEntry::Redirect(Navigation::List)
                }
            },
        }
    }

    fn with_draft(draft: ProductDraft, mode: FormMode, clock: Arc<dyn Clock>) -> Self {
        let report = validation::validate(&draft, clock.today());
        Self {
            draft,
            report,
            mode,
            clock,
        }
    }

    fn revalidate(&mut self) {
        self.report = validation::validate(&self.draft, self.clock.today());
    }

    // === Editing ===

    /// Apply raw input to a field and revalidate the whole draft.
    ///
    /// Returns `false` and changes nothing while submitting or done.
    pub fn set_field(&mut self, field: DraftField, raw: &str) -> bool {
        if !self.mode.is_editable() {
            return false;
        }
        self.draft.apply(field, raw);
        self.revalidate();
        if field.affects_pricing() {
            tracing::trace!(final_price = ?self.draft.final_price(), "Recomputed final price");
        }
        true
    }

    /// Return to a blank create form from Create or Edit
    pub fn reset(&mut self) -> bool {
        if !self.mode.is_editable() {
            return false;
        }
        self.draft = ProductDraft::default();
        self.mode = FormMode::Create;
        self.revalidate();
        tracing::debug!("Form reset");
        true
    }

    // === Reads ===

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        match &self.mode {
            FormMode::Edit { .. } => true,
            FormMode::Submitting { id } => id.is_some(),
            _ => false,
        }
    }

    pub fn violations(&self) -> &ValidationReport {
        &self.report
    }

    /// Inline error message for one field
    pub fn error_for(&self, field: DraftField) -> Option<&str> {
        self.report.get(field).map(|v| v.message.as_str())
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.mode.is_editable() && self.report.is_valid()
    }

    /// Live final price; `None` until a sell price is entered
    pub fn final_price(&self) -> Option<f64> {
        self.draft.final_price()
    }

    // === Submission ===

    /// Re-check the draft and, if valid, enter `Submitting`
    pub fn submit(&mut self) -> SubmitOutcome {
        let id = match &self.mode {
            FormMode::Submitting { .. } => return SubmitOutcome::InFlight,
            FormMode::Done => return SubmitOutcome::Finished,
            FormMode::Create => None,
            FormMode::Edit { id } => Some(id.clone()),
        };

        self.revalidate();
        if !self.report.is_valid() {
            tracing::debug!(violations = self.report.len(), "Submit blocked");
            return SubmitOutcome::Blocked(self.report.clone());
        }

        self.mode = FormMode::Submitting { id };
        tracing::debug!(mode = ?self.mode, "Submit started");
        SubmitOutcome::Started
    }

    /// Dispatch the submitted draft to the store.
    ///
    /// On success the form is `Done`; on any error it returns to the state it
    /// was submitted from with the draft intact.
    pub fn commit(&mut self, store: &mut ProductStore) -> InventoryResult<SubmitFeedback> {
        let FormMode::Submitting { id } = &self.mode else {
            return Err(ValidationError::NotSubmitting.into());
        };
        let id = id.clone();

        let result = match &id {
            None => store
                .add(self.draft.clone())
                .map(|record| (SAVED_MESSAGE, record)),
            Some(id) => self.updated_record(id).and_then(|record| {
                store
                    .update(record)
                    .map(|record| (UPDATED_MESSAGE, record))
            }),
        };

        match result {
            Ok((message, record)) => {
                self.mode = FormMode::Done;
                tracing::debug!(id = %record.id, message, "Submit finished");
                Ok(SubmitFeedback {
                    message,
                    record,
                    navigate: Navigation::List,
                })
            }
            Err(e) => {
                self.mode = match id {
                    Some(id) => FormMode::Edit { id },
                    None => FormMode::Create,
                };
                self.revalidate();
                tracing::debug!(error = %e, code = e.error_code(), "Submit failed");
                Err(e)
            }
        }
    }

    fn updated_record(&self, id: &str) -> InventoryResult<ProductRecord> {
        self.draft
            .to_record(id)
            .ok_or_else(|| self.report.clone().into_error())
    }
}
