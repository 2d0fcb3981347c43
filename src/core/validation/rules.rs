//! The product rule set

use super::ValidationReport;
use super::validators::{not_before, positive, required_choice, required_text, within};
use crate::core::draft::{DraftField, ProductDraft};
use chrono::NaiveDate;

/// Largest discount a product may carry, in percent
pub const MAX_DISCOUNT: f64 = 90.0;

/// Evaluate every rule against a draft.
///
/// `today` is the current calendar date; an expiry date equal to today is
/// still accepted.
pub fn validate(draft: &ProductDraft, today: NaiveDate) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.record(
        DraftField::Name,
        required_text("Name is required")(DraftField::Name.as_str(), &draft.name),
    );
    report.record(
        DraftField::Category,
        required_choice("Category is required")(
            DraftField::Category.as_str(),
            draft.category.as_ref(),
        ),
    );
    report.record(
        DraftField::CostPrice,
        positive("Cost price must be positive")(DraftField::CostPrice.as_str(), draft.cost_price),
    );
    report.record(
        DraftField::SellPrice,
        positive("Sell price must be positive")(DraftField::SellPrice.as_str(), draft.sell_price),
    );
    report.record(
        DraftField::Discount,
        within(0.0, MAX_DISCOUNT, "Discount must be between 0-90%")(
            DraftField::Discount.as_str(),
            draft.discount,
        ),
    );
    report.record(
        DraftField::ExpiryDate,
        not_before(today, "Expiry date cannot be in the past")(
            DraftField::ExpiryDate.as_str(),
            draft.expiry_date,
        ),
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Category;
    use crate::core::error::ViolationKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "Milk".into(),
            category: Some(Category::Dairy),
            description: String::new(),
            expiry_date: None,
            cost_price: Some(10.0),
            sell_price: Some(20.0),
            discount: Some(10.0),
        }
    }

    #[test]
    fn test_valid_draft_has_no_violations() {
        assert!(validate(&valid_draft(), today()).is_valid());
    }

    #[test]
    fn test_blank_draft_reports_required_fields() {
        let report = validate(&ProductDraft::default(), today());

        assert_eq!(
            report.get(DraftField::Name).map(|v| v.kind),
            Some(ViolationKind::RequiredField)
        );
        assert_eq!(
            report.get(DraftField::Category).map(|v| v.kind),
            Some(ViolationKind::RequiredField)
        );
        assert_eq!(
            report.get(DraftField::CostPrice).map(|v| v.kind),
            Some(ViolationKind::InvalidRange)
        );
        assert_eq!(
            report.get(DraftField::SellPrice).map(|v| v.kind),
            Some(ViolationKind::InvalidRange)
        );
        // an absent discount and expiry date are fine
        assert!(report.get(DraftField::Discount).is_none());
        assert!(report.get(DraftField::ExpiryDate).is_none());
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn test_discount_above_limit() {
        let mut draft = valid_draft();
        draft.discount = Some(91.0);
        let report = validate(&draft, today());
        assert_eq!(
            report.get(DraftField::Discount).map(|v| v.message.as_str()),
            Some("Discount must be between 0-90%")
        );
    }

    #[test]
    fn test_expiry_in_the_past() {
        let mut draft = valid_draft();
        draft.expiry_date = today().pred_opt();
        let report = validate(&draft, today());
        assert_eq!(
            report.get(DraftField::ExpiryDate).map(|v| v.kind),
            Some(ViolationKind::InvalidDate)
        );

        draft.expiry_date = Some(today());
        assert!(validate(&draft, today()).is_valid());
    }
}
