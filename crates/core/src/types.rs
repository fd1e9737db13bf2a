/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates bounding fee validity carry no time zone.
pub type EffectiveDate = chrono::NaiveDate;
