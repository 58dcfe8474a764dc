#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transaction serialization failure")]
    SerializationFailure,

    #[error("unknown notification verb: {0}")]
    UnknownVerb(String),

    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

const SERIALIZATION_FAILURE_CODE: &str = "40001";
const UNIQUE_VIOLATION_CODE: &str = "23505";

impl Error {
    ///
    /// Maps postgres serialization failures to [Error::SerializationFailure],
    /// so the transaction can be retried by the caller
    ///
    pub fn from_transaction(err: sqlx::Error) -> Self {
        match sqlstate(&err).as_deref() == Some(SERIALIZATION_FAILURE_CODE) {
            true => Error::SerializationFailure,
            false => Error::Sqlx(err),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::Sqlx(err) => sqlstate(err).as_deref() == Some(UNIQUE_VIOLATION_CODE),
            _ => false,
        }
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    let sqlx::Error::Database(database_error) = err else {
        return None;
    };

    database_error.code().map(|code| code.into_owned())
}
