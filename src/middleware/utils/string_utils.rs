use surrealdb::sql::Thing;

use crate::middleware::error::{AppError, AppResult};

/// Accepts either a bare user/record key or a full `table:key` id of `table`.
pub fn get_record_key(value: &str, table: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Generic {
            description: "Record id is empty".to_string(),
        });
    }
    if !value.contains(':') {
        return Ok(value.to_string());
    }
    let thing = Thing::try_from(value).map_err(|_| AppError::Generic {
        description: format!("{value} is not a valid record id"),
    })?;
    if thing.tb != table {
        return Err(AppError::Generic {
            description: format!("{value} is not a {table} id"),
        });
    }
    Ok(thing.id.to_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_full_ids() {
        assert_eq!(get_record_key("abc123", "profile").unwrap(), "abc123");
        assert_eq!(get_record_key("profile:abc123", "profile").unwrap(), "abc123");
    }

    #[test]
    fn rejects_other_tables_and_empty() {
        assert!(get_record_key("balance:abc123", "profile").is_err());
        assert!(get_record_key("  ", "profile").is_err());
    }
}
