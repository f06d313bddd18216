/// Error taxonomy for schema and row operations
///
/// Every failure reported by PostgreSQL is surfaced to the caller unchanged.
/// Rejections the schema is expected to produce are classified by their
/// SQLSTATE code so callers can match on an [`ErrorKind`] instead of parsing
/// messages. Nothing here retries or compensates.
///
/// # SQLSTATE mapping
///
/// | Code    | Kind                          |
/// |---------|-------------------------------|
/// | `42P07` | `DuplicateObject` (table)     |
/// | `42710` | `DuplicateObject`             |
/// | `42P01` | `UndefinedTable`              |
/// | `23503` | `ForeignKeyViolation`         |
/// | `2BP01` | `DependentObjectsStillExist`  |
/// | `23502` | `NotNullViolation`            |
/// | `23505` | `UniqueViolation`             |
/// | `22001` | `StringLengthExceeded`        |

use std::fmt;

/// Class of a storage-engine rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A table (or other object) being created already exists
    DuplicateObject,

    /// A referenced or dropped table does not exist
    UndefinedTable,

    /// A row references a parent row that does not exist
    ForeignKeyViolation,

    /// A table is dropped while another table still references it
    DependentObjectsStillExist,

    /// A required column was written as NULL
    NotNullViolation,

    /// A unique column received a duplicate value
    UniqueViolation,

    /// A value exceeds the declared VARCHAR length
    StringLengthExceeded,
}

impl ErrorKind {
    /// Maps a PostgreSQL SQLSTATE code to its kind, if it is one the schema produces
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            "42P07" | "42710" => Some(Self::DuplicateObject),
            "42P01" => Some(Self::UndefinedTable),
            "23503" => Some(Self::ForeignKeyViolation),
            "2BP01" => Some(Self::DependentObjectsStillExist),
            "23502" => Some(Self::NotNullViolation),
            "23505" => Some(Self::UniqueViolation),
            "22001" => Some(Self::StringLengthExceeded),
            _ => None,
        }
    }

    /// Returns the snake_case name used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateObject => "duplicate_object",
            Self::UndefinedTable => "undefined_table",
            Self::ForeignKeyViolation => "foreign_key_violation",
            Self::DependentObjectsStillExist => "dependent_objects_still_exist",
            Self::NotNullViolation => "not_null_violation",
            Self::UniqueViolation => "unique_violation",
            Self::StringLengthExceeded => "string_length_exceeded",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for schema and row operations
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The storage engine rejected the statement with a known SQLSTATE
    #[error("{kind}")]
    Rejected {
        kind: ErrorKind,
        #[source]
        source: sqlx::Error,
    },

    /// Any other database failure (connection, protocol, unmapped SQLSTATE)
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl SchemaError {
    /// Returns the rejection class, or None for unclassified failures
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected { kind, .. } => Some(*kind),
            Self::Database(_) => None,
        }
    }
}

impl From<sqlx::Error> for SchemaError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db_err) => db_err
                .code()
                .and_then(|code| ErrorKind::from_sqlstate(&code)),
            _ => None,
        };

        match kind {
            Some(kind) => Self::Rejected { kind, source: err },
            None => Self::Database(err),
        }
    }
}
