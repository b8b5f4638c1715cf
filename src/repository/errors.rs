use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found")]
    NotFound,
    #[error("Duplicate record")]
    Duplicate,
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Duplicate,
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            _ => RepositoryError::DatabaseError(e.to_string()),
        }
    }
}
