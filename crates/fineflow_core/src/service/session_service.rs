//! Local session flow.
//!
//! # Responsibility
//! - Fabricate and persist a session user on sign-up or sign-in.
//! - Restore the session user from storage and clear it on logout.
//!
//! # Invariants
//! - No credential is ever stored or verified against a backend. The
//!   password only passes superficial length checks.
//! - Log events never include email, name or password.

use crate::model::user::User;
use crate::storage::entry_store::EntryStore;
use crate::storage::medium::StorageMedium;
use crate::validation::{validate_auth_form, AuthForm, FieldErrors, MIN_PASSWORD_CHARS};
use chrono::Utc;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A required field was blank. Carries the user-facing message.
    MissingFields(&'static str),
    /// Sign-in input cannot belong to any account.
    InvalidCredentials,
    /// Field format checks failed.
    Validation(FieldErrors),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(message) => f.write_str(message),
            Self::InvalidCredentials => f.write_str("Invalid credentials"),
            Self::Validation(errors) => write!(f, "validation failed: {errors}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::MissingFields(_) | Self::InvalidCredentials => None,
        }
    }
}

impl From<FieldErrors> for SessionError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

pub struct SessionService<'s, M: StorageMedium> {
    store: &'s EntryStore<M>,
}

impl<'s, M: StorageMedium> SessionService<'s, M> {
    pub fn new(store: &'s EntryStore<M>) -> Self {
        Self { store }
    }

    /// Session user persisted by an earlier sign-in, if any.
    pub fn current_user(&self) -> Option<User> {
        self.store.get_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Registers a local user and makes it the session user.
    pub fn sign_up(&self, email: &str, password: &str, name: &str) -> SessionResult<User> {
        if email.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
            return Err(SessionError::MissingFields("All fields are required"));
        }
        let name = name.trim();
        let email = email.trim();
        validate_auth_form(&AuthForm {
            name: Some(name.to_string()),
            email: email.to_string(),
            password: password.to_string(),
        })?;

        let user = User::new(name, email, Utc::now());
        self.store.save_user(&user);
        info!("event=sign_up module=session status=ok");
        Ok(user)
    }

    /// Starts a session for `email`. The display name is the email's local
    /// part.
    pub fn sign_in(&self, email: &str, password: &str) -> SessionResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SessionError::MissingFields("Email and password are required"));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(SessionError::InvalidCredentials);
        }
        let email = email.trim();
        validate_auth_form(&AuthForm {
            name: None,
            email: email.to_string(),
            password: password.to_string(),
        })?;

        let name = email.split('@').next().unwrap_or(email);
        let user = User::new(name, email, Utc::now());
        self.store.save_user(&user);
        info!("event=sign_in module=session status=ok");
        Ok(user)
    }

    /// Clears the session user. Entries and garden stay.
    pub fn logout(&self) {
        self.store.clear_user();
        info!("event=logout module=session status=ok");
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionError, SessionService};
    use crate::storage::entry_store::EntryStore;
    use crate::storage::medium::MemoryMedium;

    #[test]
    fn sign_in_with_short_password_is_invalid_credentials() {
        let store = EntryStore::new(MemoryMedium::new());
        let session = SessionService::new(&store);
        assert_eq!(
            session.sign_in("a@b.co", "12345"),
            Err(SessionError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn blank_fields_are_reported_before_format_checks() {
        let store = EntryStore::new(MemoryMedium::new());
        let session = SessionService::new(&store);
        assert_eq!(
            session.sign_up("", "secret1", "Ana"),
            Err(SessionError::MissingFields("All fields are required"))
        );
        assert_eq!(
            session.sign_in("a@b.co", ""),
            Err(SessionError::MissingFields("Email and password are required"))
        );
    }
}
