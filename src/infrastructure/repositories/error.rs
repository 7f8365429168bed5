use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

const USERNAME_UNIQUE: &str = "users.username";
const APPEND_ONLY: &str = "append-only";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            match db_err.kind() {
                ErrorKind::UniqueViolation if message.contains(USERNAME_UNIQUE) => {
                    DomainError::Conflict("username already exists".into())
                }
                ErrorKind::UniqueViolation => {
                    DomainError::Conflict("unique constraint violated".into())
                }
                ErrorKind::ForeignKeyViolation => {
                    DomainError::NotFound("referenced record not found".into())
                }
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    DomainError::Validation(format!("constraint violated: {message}"))
                }
                _ if message.contains(APPEND_ONLY) => {
                    DomainError::Conflict("audit entries cannot be modified".into())
                }
                _ => DomainError::Persistence(message.to_string()),
            }
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
