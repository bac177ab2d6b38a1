use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a path segment into a [`DbId`].
///
/// Only non-negative integers that fit in a BIGSERIAL are accepted.
pub fn parse_db_id(raw: &str) -> Result<DbId, CoreError> {
    let value: u64 = raw
        .parse()
        .map_err(|e| CoreError::Validation(format!("invalid id '{raw}': {e}")))?;
    DbId::try_from(value).map_err(|_| {
        CoreError::Validation(format!("id {value} is out of range"))
    })
}
