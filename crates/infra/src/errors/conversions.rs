//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use skoo_domain::SkooError;
use tokio_postgres::error::SqlState;
use tokio_postgres::Error as PgError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SkooError);

impl From<InfraError> for SkooError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SkooError> for InfraError {
    fn from(value: SkooError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSkooError {
    fn into_skoo(self) -> SkooError;
}

/* -------------------------------------------------------------------------- */
/* tokio_postgres::Error → SkooError */
/* -------------------------------------------------------------------------- */

impl IntoSkooError for PgError {
    fn into_skoo(self) -> SkooError {
        if self.is_closed() {
            return SkooError::Database("postgres connection closed".into());
        }

        let Some(db) = self.as_db_error() else {
            return SkooError::Database(self.to_string());
        };

        let code = db.code();
        if *code == SqlState::UNIQUE_VIOLATION {
            SkooError::Database(format!("unique constraint violation: {}", db.message()))
        } else if *code == SqlState::FOREIGN_KEY_VIOLATION {
            SkooError::Database(format!("foreign key constraint violation: {}", db.message()))
        } else if *code == SqlState::CHECK_VIOLATION
            || *code == SqlState::INVALID_TEXT_REPRESENTATION
            || *code == SqlState::NOT_NULL_VIOLATION
        {
            SkooError::InvalidInput(db.message().to_string())
        } else if *code == SqlState::INSUFFICIENT_PRIVILEGE {
            SkooError::Auth(db.message().to_string())
        } else {
            SkooError::Database(format!("postgres error {}: {}", code.code(), db.message()))
        }
    }
}

impl From<PgError> for InfraError {
    fn from(value: PgError) -> Self {
        InfraError(value.into_skoo())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SkooError */
/* -------------------------------------------------------------------------- */

impl IntoSkooError for HttpError {
    fn into_skoo(self) -> SkooError {
        if self.is_timeout() {
            return SkooError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SkooError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return SkooError::Upstream(format!("failed to decode HTTP response: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => SkooError::Auth(message),
                404 => SkooError::NotFound(message),
                400..=499 => SkooError::InvalidInput(message),
                _ => SkooError::Upstream(message),
            };
        }

        SkooError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_skoo())
    }
}

/// Shorthand used by the repositories: `.map_err(db_error)?`.
pub(crate) fn db_error(err: PgError) -> SkooError {
    InfraError::from(err).into()
}

/// Same for the HTTP clients: `.map_err(http_error)?`.
pub(crate) fn http_error(err: HttpError) -> SkooError {
    InfraError::from(err).into()
}
