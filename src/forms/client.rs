use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::{ClientEmail, PersonName};
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Add/edit client dialog contents.
pub struct ClientForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

impl ClientForm {
    /// Prefills the edit dialog from a stored client.
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.to_string(),
            surname: client.surname.to_string(),
            phone: client.phone.clone(),
            email: client
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            notes: client.notes.clone(),
        }
    }

    fn email(&self) -> Result<Option<ClientEmail>, FormError> {
        if self.email.trim().is_empty() {
            return Ok(None);
        }
        ClientEmail::new(self.email.as_str())
            .map(Some)
            .map_err(|_| FormError::InvalidEmail)
    }

    fn names(&self) -> Result<(PersonName, PersonName), FormError> {
        let name = PersonName::new(self.name.as_str()).map_err(|_| FormError::InvalidName)?;
        let surname = PersonName::new(self.surname.as_str()).map_err(|_| FormError::InvalidName)?;
        Ok((name, surname))
    }

    pub fn into_new_client(self) -> Result<NewClient, FormError> {
        self.validate()?;
        let (name, surname) = self.names()?;
        let email = self.email()?;
        Ok(NewClient::new(
            name,
            surname,
            Some(self.phone),
            email,
            Some(self.notes),
        ))
    }

    /// Applies the form over `client`, keeping id, registration, last visit and status.
    pub fn apply_to(self, client: &Client) -> Result<Client, FormError> {
        self.validate()?;
        let (name, surname) = self.names()?;
        let email = self.email()?;
        Ok(Client {
            name,
            surname,
            phone: self.phone.trim().to_string(),
            email,
            notes: self.notes.trim().to_string(),
            ..client.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, surname: &str) -> ClientForm {
        ClientForm {
            name: name.into(),
            surname: surname.into(),
            phone: " 3331234567 ".into(),
            email: "Maria.Rossi@Email.it".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn valid_form_builds_a_new_client() {
        let new = form("Maria", "Rossi").into_new_client().unwrap();
        assert_eq!(new.name.as_str(), "Maria");
        assert_eq!(new.phone, "3331234567");
        assert_eq!(new.email.unwrap().as_str(), "maria.rossi@email.it");
    }

    #[test]
    fn name_and_surname_are_required() {
        assert!(matches!(
            form("", "Rossi").into_new_client(),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            form("Maria", "   ").into_new_client(),
            Err(FormError::InvalidName)
        ));
    }

    #[test]
    fn blank_email_is_allowed_but_garbage_is_not() {
        let mut f = form("Maria", "Rossi");
        f.email = "  ".into();
        assert!(f.clone().into_new_client().unwrap().email.is_none());
        f.email = "nope".into();
        assert!(matches!(f.into_new_client(), Err(FormError::InvalidEmail)));
    }
}
