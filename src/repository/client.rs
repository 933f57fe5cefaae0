//! Repository implementation for salon clients.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use log::debug;

use crate::{
    domain::{
        client::{Client, NewClient},
        types::ClientId,
    },
    models::client::{Client as DbClient, ClientChanges, NewClient as DbNewClient},
    repository::{
        ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult, require_affected},
    },
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: &ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clienti;

        let mut conn = self.conn()?;

        let db_client = clienti::table
            .find(id.as_str())
            .first::<DbClient>(&mut conn)
            .optional()?;

        db_client
            .map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clienti;

        let mut conn = self.conn()?;

        let db_clients = clienti::table
            .filter(clienti::active.eq(true))
            .order((clienti::surname.asc(), clienti::name.asc()))
            .load::<DbClient>(&mut conn)?;

        db_clients
            .into_iter()
            .map(|db_client| Client::try_from(db_client).map_err(RepositoryError::from))
            .collect()
    }

    fn search_clients(&self, query: &str) -> RepositoryResult<Vec<Client>> {
        // Filtering happens in memory over the active list so that matching
        // follows `Client::matches` exactly.
        let clients = self.list_clients()?;
        Ok(clients.into_iter().filter(|c| c.matches(query)).collect())
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<ClientId> {
        use crate::schema::clienti;

        let mut conn = self.conn()?;

        let id = ClientId::generate();
        let db_new_client = DbNewClient::new(&id, new_client, Utc::now().naive_utc());

        diesel::insert_into(clienti::table)
            .values(&db_new_client)
            .execute(&mut conn)?;

        debug!("created client {id}");
        Ok(id)
    }

    fn update_client(&self, id: &ClientId, client: &Client) -> RepositoryResult<()> {
        use crate::schema::clienti;

        let mut conn = self.conn()?;

        let changes = ClientChanges::from(client);
        let affected = diesel::update(clienti::table.find(id.as_str()))
            .set(&changes)
            .execute(&mut conn)?;

        require_affected(affected)
    }

    fn delete_client(&self, id: &ClientId) -> RepositoryResult<()> {
        use crate::schema::clienti;

        let mut conn = self.conn()?;

        let affected = diesel::update(clienti::table.find(id.as_str()))
            .set(clienti::active.eq(false))
            .execute(&mut conn)?;

        require_affected(affected)?;
        debug!("deactivated client {id}");
        Ok(())
    }

    fn touch_client_last_visit(&self, id: &ClientId, at: NaiveDateTime) -> RepositoryResult<()> {
        use crate::schema::clienti;

        let mut conn = self.conn()?;

        let affected = diesel::update(clienti::table.find(id.as_str()))
            .set(clienti::last_visit.eq(Some(at)))
            .execute(&mut conn)?;

        require_affected(affected)
    }

    fn update_client_notes(&self, id: &ClientId, notes: &str) -> RepositoryResult<()> {
        use crate::schema::clienti;

        let mut conn = self.conn()?;

        let affected = diesel::update(clienti::table.find(id.as_str()))
            .set(clienti::notes.eq(notes.trim()))
            .execute(&mut conn)?;

        require_affected(affected)
    }
}
