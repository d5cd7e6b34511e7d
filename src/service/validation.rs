//! Request validation for product bodies.

use crate::error::{AppError, FieldErrors};
use crate::model::{ProductInput, ProductPatch};
use regex::Regex;
use std::sync::OnceLock;

const NAME_MAX_LEN: usize = 255;

/// Non-negative decimal, up to 10 digits total, up to 2 decimal places
/// (NUMERIC(10,2) in the table).
fn price_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,8}(\.\d{1,2})?$").unwrap())
}

/// Validate a create or full-update body: both fields are required.
pub fn validate_input(input: &ProductInput) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();
    check_name(&input.name, &mut errors);
    check_price(input.price.as_str(), &mut errors);
    errors.into_result()
}

/// Validate a partial-update body: only supplied fields are checked.
pub fn validate_patch(patch: &ProductPatch) -> Result<(), AppError> {
    let mut errors = FieldErrors::default();
    if let Some(name) = &patch.name {
        check_name(name, &mut errors);
    }
    if let Some(price) = &patch.price {
        check_price(price.as_str(), &mut errors);
    }
    errors.into_result()
}

/// The `price` query filter is cast to NUMERIC in SQL, so reject values the
/// cast would choke on up front.
pub fn validate_price_filter(price: &str) -> Result<(), AppError> {
    if price_pattern().is_match(price) {
        Ok(())
    } else {
        Err(AppError::BadRequest("invalid price filter".into()))
    }
}

fn check_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.push("name", "must not be blank");
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push("name", format!("must be at most {} characters", NAME_MAX_LEN));
    }
}

fn check_price(price: &str, errors: &mut FieldErrors) {
    if !price_pattern().is_match(price) {
        errors.push(
            "price",
            "must be a non-negative decimal with at most 10 digits and 2 decimal places",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Price;

    fn input(name: &str, price: &str) -> ProductInput {
        ProductInput {
            name: name.into(),
            price: Price::new(price),
        }
    }

    #[test]
    fn accepts_typical_input() {
        assert!(validate_input(&input("Pencil", "1.99")).is_ok());
        assert!(validate_input(&input("Pencil", "0")).is_ok());
        assert!(validate_input(&input("Pencil", "12345678.99")).is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let err = validate_input(&input("   ", "1.99")).unwrap_err();
        let AppError::Validation(fields) = err else { panic!("expected validation error") };
        assert!(fields.0.contains_key("name"));
    }

    #[test]
    fn rejects_overlong_name() {
        let long = "x".repeat(256);
        assert!(validate_input(&input(&long, "1.99")).is_err());
        let ok = "x".repeat(255);
        assert!(validate_input(&input(&ok, "1.99")).is_ok());
    }

    #[test]
    fn rejects_bad_prices() {
        for bad in ["", "-1.99", "1.999", "abc", "1,99", "123456789", "1.99.1"] {
            assert!(validate_input(&input("Pencil", bad)).is_err(), "price {:?} should fail", bad);
        }
    }

    #[test]
    fn collects_errors_for_both_fields() {
        let err = validate_input(&input("", "oops")).unwrap_err();
        let AppError::Validation(fields) = err else { panic!("expected validation error") };
        assert!(fields.0.contains_key("name"));
        assert!(fields.0.contains_key("price"));
    }

    #[test]
    fn price_filter_guard() {
        assert!(validate_price_filter("1.99").is_ok());
        assert!(validate_price_filter("abc").is_err());
        assert!(validate_price_filter("-1").is_err());
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = ProductPatch {
            name: None,
            price: Some(Price::new("2.49")),
        };
        assert!(validate_patch(&patch).is_ok());
        let patch = ProductPatch {
            name: Some("".into()),
            price: None,
        };
        assert!(validate_patch(&patch).is_err());
        assert!(validate_patch(&ProductPatch::default()).is_ok());
    }
}
