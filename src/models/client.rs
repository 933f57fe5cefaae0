use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{ClientEmail, ClientId, PersonName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::clienti)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: Option<String>,
    pub registered_at: NaiveDateTime,
    pub last_visit: Option<NaiveDateTime>,
    pub notes: String,
    pub active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clienti)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub registered_at: NaiveDateTime,
    pub notes: &'a str,
    pub active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clienti)]
#[diesel(treat_none_as_null = true)]
/// Full overwrite of a [`Client`] row; absent optionals clear the column.
pub struct ClientChanges<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub registered_at: NaiveDateTime,
    pub last_visit: Option<NaiveDateTime>,
    pub notes: &'a str,
    pub active: bool,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        let email = match client.email.filter(|e| !e.trim().is_empty()) {
            Some(email) => Some(ClientEmail::new(email)?),
            None => None,
        };
        Ok(Self {
            id: ClientId::new(client.id)?,
            name: PersonName::new(client.name)?,
            surname: PersonName::new(client.surname)?,
            phone: client.phone,
            email,
            registered_at: client.registered_at,
            last_visit: client.last_visit,
            notes: client.notes,
            active: client.active,
        })
    }
}

impl<'a> NewClient<'a> {
    /// New clients are always stored active, registered at `registered_at`.
    pub fn new(id: &'a ClientId, client: &'a DomainNewClient, registered_at: NaiveDateTime) -> Self {
        Self {
            id: id.as_str(),
            name: client.name.as_str(),
            surname: client.surname.as_str(),
            phone: client.phone.as_str(),
            email: client.email.as_ref().map(ClientEmail::as_str),
            registered_at,
            notes: client.notes.as_str(),
            active: true,
        }
    }
}

impl<'a> From<&'a DomainClient> for ClientChanges<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            name: client.name.as_str(),
            surname: client.surname.as_str(),
            phone: client.phone.as_str(),
            email: client.email.as_ref().map(ClientEmail::as_str),
            registered_at: client.registered_at,
            last_visit: client.last_visit,
            notes: client.notes.as_str(),
            active: client.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_domain_new() -> DomainNewClient {
        DomainNewClient::try_new("Maria", "Rossi", "3331234567", "maria.rossi@email.it", "")
            .expect("valid client")
    }

    #[test]
    fn from_domain_new_creates_active_row() {
        let domain = sample_domain_new();
        let id = ClientId::generate();
        let now = Utc::now().naive_utc();
        let new = NewClient::new(&id, &domain, now);
        assert_eq!(new.id, id.as_str());
        assert_eq!(new.name, "Maria");
        assert_eq!(new.surname, "Rossi");
        assert_eq!(new.email, Some("maria.rossi@email.it"));
        assert_eq!(new.registered_at, now);
        assert!(new.active);
    }

    #[test]
    fn client_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_client = Client {
            id: "c1".to_string(),
            name: "Anna".to_string(),
            surname: "Verdi".to_string(),
            phone: "3345678901".to_string(),
            email: Some(String::new()),
            registered_at: now,
            last_visit: Some(now),
            notes: "Allergica".to_string(),
            active: false,
        };
        let domain = DomainClient::try_from(db_client).expect("valid client");
        assert_eq!(domain.id.as_str(), "c1");
        assert_eq!(domain.full_name(), "Anna Verdi");
        assert!(domain.email.is_none());
        assert_eq!(domain.last_visit, Some(now));
        assert!(!domain.active);
    }

    #[test]
    fn changes_carry_every_column() {
        let now = Utc::now().naive_utc();
        let domain = DomainClient {
            id: ClientId::new("c1").unwrap(),
            name: PersonName::new("Laura").unwrap(),
            surname: PersonName::new("Neri").unwrap(),
            phone: "3351234789".into(),
            email: None,
            registered_at: now,
            last_visit: None,
            notes: String::new(),
            active: true,
        };
        let changes = ClientChanges::from(&domain);
        assert_eq!(changes.name, "Laura");
        assert_eq!(changes.email, None);
        assert_eq!(changes.last_visit, None);
        assert!(changes.active);
    }
}
