//! Form validation for auth and entry input.
//!
//! # Responsibility
//! - Apply format and length checks before anything reaches storage.
//! - Report failures as field-keyed messages, never as panics.
//!
//! # Invariants
//! - Lengths are measured in characters, not bytes.
//! - Every failing field reports exactly one message (the first rule it
//!   breaks).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("valid name regex"));

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_PASSWORD_CHARS: usize = 100;
pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_ENTRY_CONTENT_CHARS: usize = 50_000;
pub const MAX_ENTRY_TITLE_CHARS: usize = 200;

/// Field name → message map returned by failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single failing field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Records `message` for `field` unless the field already failed.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// `Ok(value)` when nothing failed.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Raw sign-up/sign-in form input. `name` is only present on sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Raw entry editor input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub title: String,
    pub content: String,
}

impl EntryForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Entry input after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// `None` when the title was blank.
    pub title: Option<String>,
    pub content: String,
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err("Invalid email address".to_string())
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let chars = password.chars().count();
    if chars < MIN_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        ));
    }
    if chars > MAX_PASSWORD_CHARS {
        return Err("Password is too long".to_string());
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let chars = name.chars().count();
    if chars < MIN_NAME_CHARS {
        return Err(format!("Name must be at least {MIN_NAME_CHARS} characters"));
    }
    if chars > MAX_NAME_CHARS {
        return Err("Name is too long".to_string());
    }
    if !NAME_RE.is_match(name) {
        return Err(
            "Name can only contain letters, spaces, hyphens, and apostrophes".to_string(),
        );
    }
    Ok(())
}

/// Checks every auth field and collects all failures.
pub fn validate_auth_form(form: &AuthForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &form.name {
        if let Err(message) = validate_name(name) {
            errors.insert("name", message);
        }
    }
    if let Err(message) = validate_email(&form.email) {
        errors.insert("email", message);
    }
    if let Err(message) = validate_password(&form.password) {
        errors.insert("password", message);
    }
    errors.into_result(())
}

/// Trims editor input and checks entry length limits.
pub fn validate_entry_form(form: &EntryForm) -> Result<EntryDraft, FieldErrors> {
    let title = form.title.trim();
    let content = form.content.trim();
    let mut errors = FieldErrors::new();

    if content.is_empty() {
        errors.insert("content", "Entry cannot be empty");
    } else if content.chars().count() > MAX_ENTRY_CONTENT_CHARS {
        errors.insert("content", "Entry is too long");
    }
    if title.chars().count() > MAX_ENTRY_TITLE_CHARS {
        errors.insert("title", "Title is too long");
    }

    errors.into_result(EntryDraft {
        title: (!title.is_empty()).then(|| title.to_string()),
        content: content.to_string(),
    })
}
