//! Rule sets for the admin API endpoints.

use super::rules::{email, object_id, pagination, password, required};
use super::{Check, Rule, RuleSet, Sanitizer};
use crate::config::ValidationSettings;
use crate::types::Role;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "login",
    "register",
    "change-password",
    "list-query",
    "id-param",
    "create-order",
    "create-claim",
];

pub fn login() -> RuleSet {
    RuleSet::new()
        .rule(email("email"))
        .rule(required("password"))
}

pub fn register(settings: &ValidationSettings) -> RuleSet {
    let roles = Role::ALL.iter().map(|r| r.as_str().to_string()).collect();
    RuleSet::new()
        .rule(required("name").sanitize(Sanitizer::Trim))
        .rule(email("email"))
        .merge(password("password", settings.min_password_length))
        .rule(Rule::new("role", Check::OneOf(roles), "role is not recognised").optional())
}

pub fn change_password(settings: &ValidationSettings) -> RuleSet {
    RuleSet::new()
        .rule(required("currentPassword"))
        .merge(password("newPassword", settings.min_password_length))
}

pub fn list_query(settings: &ValidationSettings) -> RuleSet {
    pagination(settings.max_page_size)
}

pub fn id_param() -> RuleSet {
    RuleSet::new().rule(object_id("id"))
}

pub fn create_order() -> RuleSet {
    RuleSet::new()
        .rule(object_id("dealerId"))
        .rule(Rule::new("items", Check::Required, "order must contain at least one item"))
}

pub fn create_claim() -> RuleSet {
    RuleSet::new()
        .rule(object_id("orderId"))
        .rule(required("reason").sanitize(Sanitizer::Trim))
        .rule(Rule::new(
            "reason",
            Check::MinLength(10),
            "reason must be at least 10 characters",
        ))
}

/// Look up an endpoint rule set by name.
pub fn by_name(name: &str, settings: &ValidationSettings) -> Option<RuleSet> {
    let set = match name {
        "login" => login(),
        "register" => register(settings),
        "change-password" => change_password(settings),
        "list-query" => list_query(settings),
        "id-param" => id_param(),
        "create-order" => create_order(),
        "create-claim" => create_claim(),
        _ => return None,
    };
    Some(set)
}
