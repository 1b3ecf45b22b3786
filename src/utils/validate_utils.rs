use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{5,}$").unwrap());

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Usernames never contain `@`, so login can tell them apart from emails.
pub fn validate_username(u: &String) -> Result<(), ValidationError> {
    if !USERNAME_RE.is_match(u) {
        return Err(ValidationError::new("username")
            .with_message("Letters, numbers and '_'. Minimum 5 characters".into()));
    }
    Ok(())
}

pub fn is_email_identifier(identifier: &str) -> bool {
    identifier.contains('@')
}
