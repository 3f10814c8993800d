//! Building blocks shared by the endpoint rule sets.

use super::{Check, Rule, RuleSet, Sanitizer};

/// `page ≥ 1` and `limit ∈ [1, max_limit]`. Both parameters may be omitted.
pub fn pagination(max_limit: i64) -> RuleSet {
    RuleSet::new()
        .rule(
            Rule::new(
                "page",
                Check::IntRange { min: 1, max: i64::MAX },
                "page must be a positive integer",
            )
            .optional(),
        )
        .rule(
            Rule::new(
                "limit",
                Check::IntRange { min: 1, max: max_limit },
                format!("limit must be between 1 and {max_limit}"),
            )
            .optional(),
        )
}

pub fn object_id(field: &str) -> Rule {
    Rule::new(field, Check::ObjectId, format!("{field} must be a valid id"))
}

pub fn email(field: &str) -> Rule {
    Rule::new(field, Check::Email, format!("{field} must be a valid email address"))
        .sanitize(Sanitizer::NormalizeEmail)
}

pub fn required(field: &str) -> Rule {
    Rule::new(field, Check::Required, format!("{field} is required"))
}

/// Minimum length plus at least one letter and one digit, reported separately.
pub fn password(field: &str, min_length: usize) -> RuleSet {
    RuleSet::new()
        .rule(Rule::new(
            field,
            Check::MinLength(min_length),
            format!("{field} must be at least {min_length} characters"),
        ))
        .rule(Rule::new(
            field,
            Check::LetterAndDigit,
            format!("{field} must contain a letter and a number"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_bounds() {
        let set = pagination(100);
        assert!(set.validate(&json!({"page": 0})).is_err());
        assert!(set.validate(&json!({"page": 1})).is_ok());
        assert!(set.validate(&json!({"page": "1"})).is_ok());
        assert!(set.validate(&json!({"page": -3})).is_err());
        assert!(set.validate(&json!({"page": "first"})).is_err());
    }

    #[test]
    fn limit_bounds() {
        let set = pagination(100);
        assert!(set.validate(&json!({"limit": 101})).is_err());
        assert!(set.validate(&json!({"limit": 100})).is_ok());
        assert!(set.validate(&json!({"limit": 1})).is_ok());
        assert!(set.validate(&json!({"limit": 0})).is_err());
        assert!(set.validate(&json!({})).is_ok());
    }

    #[test]
    fn both_pagination_failures_reported() {
        let errors = pagination(100)
            .validate(&json!({"page": 0, "limit": 500}))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("page"));
        assert!(errors.has_field("limit"));
    }

    #[test]
    fn password_strength() {
        let set = password("password", 6);
        assert!(set.validate(&json!({"password": "abc123"})).is_ok());

        let errors = set.validate(&json!({"password": "abcdef"})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.0[0].message, "password must contain a letter and a number");

        let errors = set.validate(&json!({"password": "12345"})).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn email_rule_normalizes() {
        let set = RuleSet::new().rule(email("email"));
        let clean = set.validate(&json!({"email": "Foo+Bar@EXAMPLE.com"})).unwrap();
        assert_eq!(clean["email"], "foo+bar@example.com");

        let errors = set.validate(&json!({"email": "not-an-email"})).unwrap_err();
        assert_eq!(errors.0[0].message, "email must be a valid email address");
    }

    #[test]
    fn object_id_rule() {
        let set = RuleSet::new().rule(object_id("orderId"));
        assert!(set.validate(&json!({"orderId": "65a1b2c3d4e5f60718293a4b"})).is_ok());
        assert!(set.validate(&json!({"orderId": "12"})).is_err());
        assert!(set.validate(&json!({"orderId": 12})).is_err());
    }
}
