//! Conversions from external infrastructure errors into domain errors.
//!
//! Storage failures surface as `SlotwiseError::Persistence` with the
//! underlying message preserved, so callers can log the real cause without
//! depending on rusqlite or r2d2 types.

use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use slotwise_domain::SlotwiseError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlotwiseError);

impl From<InfraError> for SlotwiseError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlotwiseError> for InfraError {
    fn from(value: SlotwiseError) -> Self {
        InfraError(value)
    }
}

trait IntoSlotwiseError {
    fn into_slotwise(self) -> SlotwiseError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → SlotwiseError */
/* -------------------------------------------------------------------------- */

impl IntoSlotwiseError for SqlError {
    fn into_slotwise(self) -> SlotwiseError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        SlotwiseError::Persistence("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        SlotwiseError::Persistence("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        let detail = format!("unique constraint violation: {message}");
                        SlotwiseError::Persistence(detail)
                    }
                    (ErrorCode::ConstraintViolation, _) => {
                        SlotwiseError::Persistence(format!("constraint violation: {message}"))
                    }
                    _ => SlotwiseError::Persistence(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => SlotwiseError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                SlotwiseError::Persistence(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                SlotwiseError::Persistence(format!("invalid column type for {name}: {ty}"))
            }
            RE::InvalidPath(path) => SlotwiseError::Persistence(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => SlotwiseError::Persistence(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_slotwise())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → SlotwiseError */
/* -------------------------------------------------------------------------- */

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(SlotwiseError::Persistence(format!("pool error: {value}")))
    }
}

/// A blocking database task that panicked or was cancelled.
pub fn map_join_error(err: JoinError) -> SlotwiseError {
    SlotwiseError::Internal(format!("database task failed: {err}"))
}
