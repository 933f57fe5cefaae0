use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, ClientId, PersonName, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: PersonName,
    pub surname: PersonName,
    pub phone: String,
    pub email: Option<ClientEmail>,
    pub registered_at: NaiveDateTime,
    pub last_visit: Option<NaiveDateTime>,
    pub notes: String,
    /// Inactive clients are soft-deleted and hidden from every listing.
    pub active: bool,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Case-insensitive substring match across name, surname, phone and email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.surname.to_lowercase().contains(&query)
            || self.phone.contains(&query)
            || self
                .email
                .as_ref()
                .is_some_and(|email| email.as_str().contains(&query))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub name: PersonName,
    pub surname: PersonName,
    pub phone: String,
    pub email: Option<ClientEmail>,
    pub notes: String,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: PersonName,
        surname: PersonName,
        phone: Option<String>,
        email: Option<ClientEmail>,
        notes: Option<String>,
    ) -> Self {
        Self {
            name,
            surname,
            phone: phone.map(|s| s.trim().to_string()).unwrap_or_default(),
            email,
            notes: notes.map(|s| s.trim().to_string()).unwrap_or_default(),
        }
    }

    /// Builds the payload from raw strings; blank email is treated as absent.
    pub fn try_new(
        name: impl Into<String>,
        surname: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        let email = email.into();
        let email = if email.trim().is_empty() {
            None
        } else {
            Some(ClientEmail::new(email)?)
        };
        Ok(Self::new(
            PersonName::new(name)?,
            PersonName::new(surname)?,
            Some(phone.into()),
            email,
            Some(notes.into()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn maria() -> Client {
        Client {
            id: ClientId::new("c1").unwrap(),
            name: PersonName::new("Maria").unwrap(),
            surname: PersonName::new("Rossi").unwrap(),
            phone: "3331234567".into(),
            email: Some(ClientEmail::new("maria.rossi@email.it").unwrap()),
            registered_at: Utc::now().naive_utc(),
            last_visit: None,
            notes: "Cliente abituale".into(),
            active: true,
        }
    }

    #[test]
    fn full_name_joins_name_and_surname() {
        let mut client = maria();
        assert_eq!(client.full_name(), "Maria Rossi");
        client.notes = "something else".into();
        client.active = false;
        assert_eq!(client.full_name(), "Maria Rossi");
    }

    #[test]
    fn matches_every_searchable_field() {
        let client = maria();
        assert!(client.matches("333"));
        assert!(client.matches("maria"));
        assert!(client.matches("ROSSI"));
        assert!(client.matches("email.it"));
        assert!(client.matches(""));
        assert!(!client.matches("xyz"));
    }

    #[test]
    fn try_new_treats_blank_email_as_missing() {
        let client = NewClient::try_new("Giulia", "Bianchi", " 333 ", "  ", "").unwrap();
        assert!(client.email.is_none());
        assert_eq!(client.phone, "333");
        assert!(NewClient::try_new("Giulia", " ", "", "", "").is_err());
        assert!(NewClient::try_new("Giulia", "Bianchi", "", "bad", "").is_err());
    }
}
