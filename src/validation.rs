//! Client-side validation for the person form.
//!
//! [`validate_person`] checks every field and collects every violation instead
//! of stopping at the first one, so the screen can show all inline messages
//! at once.

use crate::model::{PersonCreate, PersonDraft};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;

/// Minimum number of characters in `completeName`.
pub const MIN_NAME_LEN: usize = 3;

/// Letters and digits from any script are accepted in both parts.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}.!#$%&'*+/=?^_`{|}~-]+@[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?)+$",
    )
    .expect("valid email regex")
});

/// The form fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonField {
    CompleteName,
    Email,
    CityId,
}

impl PersonField {
    /// Field key as it appears in the form and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PersonField::CompleteName => "completeName",
            PersonField::Email => "email",
            PersonField::CityId => "cityId",
        }
    }
}

impl Display for PersonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: PersonField,
    pub message: String,
}

impl FieldError {
    fn required(field: PersonField) -> Self {
        Self {
            field,
            message: format!("{field} is a required field"),
        }
    }
}

/// Every violation found in one validation pass, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: PersonField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Field-keyed messages, ready to be surfaced inline.
    pub fn by_field(&self) -> BTreeMap<PersonField, String> {
        let mut map = BTreeMap::new();
        for error in &self.0 {
            map.entry(error.field).or_insert_with(|| error.message.clone());
        }
        map
    }
}

/// Validates the draft and, if every field passes, returns the create payload.
///
/// Rules: `completeName` required with at least [`MIN_NAME_LEN`] characters,
/// `email` required and syntactically valid, `cityId` required. Each field
/// reports at most one message; required is checked before the other rule.
pub fn validate_person(draft: &PersonDraft) -> Result<PersonCreate, ValidationErrors> {
    let mut errors = Vec::new();

    if draft.complete_name.is_empty() {
        errors.push(FieldError::required(PersonField::CompleteName));
    } else if draft.complete_name.chars().count() < MIN_NAME_LEN {
        errors.push(FieldError {
            field: PersonField::CompleteName,
            message: format!(
                "{} must be at least {MIN_NAME_LEN} characters",
                PersonField::CompleteName
            ),
        });
    }

    if draft.email.is_empty() {
        errors.push(FieldError::required(PersonField::Email));
    } else if !is_valid_email(&draft.email) {
        errors.push(FieldError {
            field: PersonField::Email,
            message: format!("{} must be a valid email", PersonField::Email),
        });
    }

    if draft.city_id.is_none() {
        errors.push(FieldError::required(PersonField::CityId));
    }

    match (errors.is_empty(), draft.city_id) {
        (true, Some(city_id)) => Ok(PersonCreate {
            complete_name: draft.complete_name.clone(),
            email: draft.email.clone(),
            city_id,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
