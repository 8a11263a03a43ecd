use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Voter {voter_id} already compared submissions {submission_a} and {submission_b}")]
    DuplicatePair {
        voter_id: Uuid,
        submission_a: Uuid,
        submission_b: Uuid,
    },

    #[error(
        "Voter {voter_id} was paired against their own submission {submission_id} on {challenge_date}"
    )]
    SelfPairing {
        voter_id: Uuid,
        submission_id: Uuid,
        challenge_date: NaiveDate,
    },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }
}
