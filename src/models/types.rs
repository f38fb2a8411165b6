use chrono::{DateTime, Local};
use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use serde::Serialize;
use std::fmt;
use std::ops::Sub;

/// Declares an integer row-id newtype that binds and reads as SQLite INTEGER.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

row_id!(
    /// Primary key of a subject
    SubjectId
);
row_id!(
    /// Primary key of a study session
    SessionId
);
row_id!(
    /// Primary key of a daily plan
    PlanId
);
row_id!(
    /// Primary key of a note
    NoteId
);

/// Unix timestamp in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn new(secs: i64) -> Self {
        Self(secs)
    }

    pub fn from_datetime(dt: DateTime<Local>) -> Self {
        Self(dt.timestamp())
    }

    /// Convert to local time, falling back to the epoch for out-of-range values
    pub fn to_local(self) -> DateTime<Local> {
        DateTime::from_timestamp(self.0, 0)
            .unwrap_or_default()
            .with_timezone(&Local)
    }
}

impl Sub for Timestamp {
    type Output = DurationSecs;

    fn sub(self, rhs: Self) -> DurationSecs {
        DurationSecs(self.0 - rhs.0)
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}

/// A duration in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct DurationSecs(pub i64);

impl DurationSecs {
    pub fn new(secs: i64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> i64 {
        self.0
    }
}

impl ToSql for DurationSecs {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for DurationSecs {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}
