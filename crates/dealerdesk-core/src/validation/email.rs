use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("email pattern")
});

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];
const OUTLOOK_DOMAINS: &[&str] = &["outlook.com", "hotmail.com", "live.com", "msn.com"];
const YAHOO_DOMAINS: &[&str] = &["yahoo.com", "ymail.com", "rocketmail.com", "yahoo.co.uk"];
const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "me.com", "mac.com"];

pub fn is_email(s: &str) -> bool {
    s.len() <= 254 && EMAIL.is_match(s)
}

/// Canonical storage form of an email address.
///
/// Lowercases the whole address, then folds provider-specific aliases:
/// Gmail drops dots and `+tag` and uses `gmail.com`; Outlook and iCloud drop
/// `+tag`; Yahoo drops `-tag`. Returns `None` when there is no `@`.
pub fn normalize_email(raw: &str) -> Option<String> {
    let (local, domain) = raw.trim().rsplit_once('@')?;
    let local = local.to_lowercase();
    let mut domain = domain.to_lowercase();

    let folded = if GMAIL_DOMAINS.contains(&domain.as_str()) {
        domain = "gmail.com".to_string();
        strip_tag(&local, '+').replace('.', "")
    } else if OUTLOOK_DOMAINS.contains(&domain.as_str()) || ICLOUD_DOMAINS.contains(&domain.as_str()) {
        strip_tag(&local, '+').to_string()
    } else if YAHOO_DOMAINS.contains(&domain.as_str()) {
        strip_tag(&local, '-').to_string()
    } else {
        local.clone()
    };

    let local = if folded.is_empty() { local } else { folded };
    Some(format!("{local}@{domain}"))
}

fn strip_tag(local: &str, separator: char) -> &str {
    local.split(separator).next().unwrap_or(local)
}
