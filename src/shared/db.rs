use sea_orm::{DbErr, RuntimeErr, SqlErr};

/// Coarse classification of a database failure, shared by every repository's error mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbFailure {
    UniqueViolation,
    /// Lock wait, deadlock or serialization failure; the transaction may be retried.
    Contention,
    /// The pool or the connection could not be obtained.
    Unavailable,
    Other,
}

pub fn classify_db_err(err: &DbErr) -> DbFailure {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return DbFailure::UniqueViolation;
    }

    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => return DbFailure::Unavailable,
        DbErr::Exec(RuntimeErr::SqlxError(inner)) | DbErr::Query(RuntimeErr::SqlxError(inner)) => {
            if matches!(
                inner,
                sea_orm::sqlx::Error::PoolTimedOut
                    | sea_orm::sqlx::Error::PoolClosed
                    | sea_orm::sqlx::Error::Io(_)
            ) {
                return DbFailure::Unavailable;
            }
        }
        _ => {}
    }

    classify_message(&err.to_string())
}

/// SQLSTATE codes and driver wording, for errors that reach us only as text.
fn classify_message(message: &str) -> DbFailure {
    let message = message.to_lowercase();

    if message.contains("23505") || message.contains("duplicate key") || message.contains("unique constraint") {
        DbFailure::UniqueViolation
    } else if message.contains("40001")
        || message.contains("40p01")
        || message.contains("55p03")
        || message.contains("could not serialize")
        || message.contains("deadlock detected")
        || message.contains("could not obtain lock")
    {
        DbFailure::Contention
    } else if message.contains("connection refused")
        || message.contains("pool timed out")
        || message.contains("connection closed")
    {
        DbFailure::Unavailable
    } else {
        DbFailure::Other
    }
}
