pub mod profiles;
pub mod progress;
pub mod vocabulary;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::store::StoreError;

pub(crate) fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| StoreError::Corrupt(format!("{column}: unparseable timestamp {raw:?}")))
}
