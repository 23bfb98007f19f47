use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Server-assigned identifier for a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a City record. Cities are looked up elsewhere; people only
/// carry the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub u64);

impl From<u64> for CityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person record as stored by the remote service.
///
/// The remote service is the only source of truth; screens hold a
/// [`PersonDraft`] copy while editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub complete_name: String,
    pub email: String,
    pub city_id: CityId,
}

impl Person {
    /// Builds the full-replace payload sent by `update_by_id`.
    pub fn from_create(id: PersonId, params: PersonCreate) -> Self {
        Self {
            id,
            complete_name: params.complete_name,
            email: params.email,
            city_id: params.city_id,
        }
    }
}

/// Payload for creating a new person. Produced by
/// [`validate_person`](crate::validation::validate_person), never by hand in
/// the screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCreate {
    pub complete_name: String,
    pub email: String,
    pub city_id: CityId,
}

/// Editable form state for the details screen.
///
/// Unlike [`Person`], nothing here is guaranteed valid: the city may be
/// unset and the strings may be anything the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub complete_name: String,
    pub email: String,
    pub city_id: Option<CityId>,
}

impl PersonDraft {
    pub fn new(
        complete_name: impl Into<String>,
        email: impl Into<String>,
        city_id: Option<CityId>,
    ) -> Self {
        Self {
            complete_name: complete_name.into(),
            email: email.into(),
            city_id,
        }
    }
}

impl From<&Person> for PersonDraft {
    fn from(person: &Person) -> Self {
        Self {
            complete_name: person.complete_name.clone(),
            email: person.email.clone(),
            city_id: Some(person.city_id),
        }
    }
}

/// One page of the people listing plus the total row count reported by the
/// server.
#[derive(Debug, Clone, PartialEq)]
pub struct PeoplePage {
    pub items: Vec<Person>,
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_uses_camel_case_on_the_wire() {
        let person = Person {
            id: PersonId(7),
            complete_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            city_id: CityId(3),
        };

        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "completeName": "Ada Lovelace",
                "email": "ada@example.com",
                "cityId": 3
            })
        );
    }

    #[test]
    fn test_draft_from_person_keeps_city() {
        let person = Person {
            id: PersonId(1),
            complete_name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            city_id: CityId(9),
        };

        let draft = PersonDraft::from(&person);
        assert_eq!(draft.city_id, Some(CityId(9)));
        assert_eq!(draft.complete_name, "Grace");
    }
}
