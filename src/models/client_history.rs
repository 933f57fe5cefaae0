//! Client history rows keep their nested lists as JSON text columns.

use diesel::prelude::*;

use crate::domain::client_history::ClientHistory as DomainClientHistory;
use crate::domain::types::{ClientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Insertable)]
#[diesel(table_name = crate::schema::storico_clienti)]
#[diesel(primary_key(client_id))]
pub struct ClientHistory {
    pub client_id: String,
    pub purchased_products: String,
    pub performed_treatments: String,
    pub notes: String,
}

impl TryFrom<ClientHistory> for DomainClientHistory {
    type Error = TypeConstraintError;

    fn try_from(history: ClientHistory) -> Result<Self, Self::Error> {
        let invalid = |e: serde_json::Error| TypeConstraintError::InvalidValue(e.to_string());
        Ok(Self {
            client_id: ClientId::new(history.client_id)?,
            purchased_products: serde_json::from_str(&history.purchased_products)
                .map_err(invalid)?,
            performed_treatments: serde_json::from_str(&history.performed_treatments)
                .map_err(invalid)?,
            notes: history.notes,
        })
    }
}

impl TryFrom<&DomainClientHistory> for ClientHistory {
    type Error = TypeConstraintError;

    fn try_from(history: &DomainClientHistory) -> Result<Self, Self::Error> {
        let invalid = |e: serde_json::Error| TypeConstraintError::InvalidValue(e.to_string());
        Ok(Self {
            client_id: history.client_id.to_string(),
            purchased_products: serde_json::to_string(&history.purchased_products)
                .map_err(invalid)?,
            performed_treatments: serde_json::to_string(&history.performed_treatments)
                .map_err(invalid)?,
            notes: history.notes.clone(),
        })
    }
}
