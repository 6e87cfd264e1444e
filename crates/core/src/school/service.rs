//! Access-code validation service

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use skoo_domain::constants::{MAX_ACCESS_CODE_LENGTH, MAX_EMAIL_LENGTH};
use skoo_domain::{AccessCodeRequest, AccessCodeVerdict};
use tracing::{error, instrument};

use super::ports::AccessCodeRepository;
use crate::clock::Clock;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX should compile - this is a bug")
});

/// Validation result, classified by the HTTP status it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCodeOutcome {
    Accepted,
    /// Code or email is syntactically invalid
    Malformed(AccessCodeVerdict),
    /// Well-formed request refused by a business rule
    Rejected(AccessCodeVerdict),
    /// The store could not be queried
    Unavailable(AccessCodeVerdict),
}

impl AccessCodeOutcome {
    pub fn verdict(&self) -> AccessCodeVerdict {
        match self {
            Self::Accepted => AccessCodeVerdict::accepted(),
            Self::Malformed(v) | Self::Rejected(v) | Self::Unavailable(v) => v.clone(),
        }
    }
}

pub struct AccessCodeService {
    repository: Arc<dyn AccessCodeRepository>,
    clock: Arc<dyn Clock>,
}

impl AccessCodeService {
    pub fn new(repository: Arc<dyn AccessCodeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Check that `code` is usable and that `email` is on the school's list.
    #[instrument(skip_all)]
    pub async fn validate(&self, request: &AccessCodeRequest) -> AccessCodeOutcome {
        let code = request.code.as_deref().unwrap_or_default().trim().to_uppercase();
        let email = request.email.as_deref().unwrap_or_default().trim().to_lowercase();

        if code.is_empty() || code.chars().count() > MAX_ACCESS_CODE_LENGTH {
            return AccessCodeOutcome::Malformed(AccessCodeVerdict::rejected(
                "Code invalide",
                "Code école invalide",
            ));
        }
        if !is_valid_email(&email) {
            return AccessCodeOutcome::Malformed(AccessCodeVerdict::rejected(
                "Email invalide",
                "Email invalide",
            ));
        }

        let access_code = match self.repository.find_active_code(&code, self.clock.now()).await {
            Ok(Some(found)) => found,
            Ok(None) => {
                return AccessCodeOutcome::Rejected(AccessCodeVerdict::rejected(
                    "Code invalide",
                    "Code école invalide ou expiré",
                ))
            }
            Err(err) => {
                error!(error = %err, "access code query failed");
                return AccessCodeOutcome::Unavailable(AccessCodeVerdict::rejected(
                    "Erreur",
                    "Impossible de valider le code pour le moment",
                ));
            }
        };

        if access_code.is_exhausted() {
            return AccessCodeOutcome::Rejected(AccessCodeVerdict::rejected(
                "Code expiré",
                "Ce code a atteint son nombre maximum d’utilisations",
            ));
        }

        match self.repository.find_expected_student(access_code.school_id, &email).await {
            Ok(Some(student)) if student.is_registered => {
                AccessCodeOutcome::Rejected(AccessCodeVerdict::rejected(
                    "Email déjà utilisé",
                    "Cet email a déjà été utilisé pour s'inscrire avec ce code.",
                ))
            }
            Ok(Some(_)) => AccessCodeOutcome::Accepted,
            Ok(None) => AccessCodeOutcome::Rejected(AccessCodeVerdict::rejected(
                "Email non autorisé",
                "Ton adresse email n'est pas autorisée à utiliser ce code. Inscris-toi avec l'email sur lequel tu as reçu le code d'accès.",
            )),
            Err(err) => {
                error!(error = %err, "expected student query failed");
                AccessCodeOutcome::Unavailable(AccessCodeVerdict::rejected(
                    "Erreur",
                    "Impossible de valider l’email pour le moment",
                ))
            }
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_syntax_check() {
        assert!(is_valid_email("lea@ecole.fr"));
        assert!(!is_valid_email("lea@ecole"));
        assert!(!is_valid_email("le a@ecole.fr"));
        assert!(!is_valid_email(&format!("{}@ecole.fr", "a".repeat(250))));
    }
}
