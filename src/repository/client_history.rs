use diesel::{prelude::*, upsert::excluded};

use crate::{
    domain::{client_history::ClientHistory, types::ClientId},
    models::client_history::ClientHistory as DbClientHistory,
    repository::{
        ClientHistoryReader, ClientHistoryWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ClientHistoryReader for DieselRepository {
    fn get_client_history(&self, client_id: &ClientId) -> RepositoryResult<Option<ClientHistory>> {
        use crate::schema::storico_clienti;

        let mut conn = self.conn()?;

        let row = storico_clienti::table
            .find(client_id.as_str())
            .first::<DbClientHistory>(&mut conn)
            .optional()?;

        row.map(ClientHistory::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl ClientHistoryWriter for DieselRepository {
    fn save_client_history(&self, history: &ClientHistory) -> RepositoryResult<()> {
        use crate::schema::storico_clienti;

        let mut conn = self.conn()?;

        let row = DbClientHistory::try_from(history)?;

        diesel::insert_into(storico_clienti::table)
            .values(&row)
            .on_conflict(storico_clienti::client_id)
            .do_update()
            .set((
                storico_clienti::purchased_products
                    .eq(excluded(storico_clienti::purchased_products)),
                storico_clienti::performed_treatments
                    .eq(excluded(storico_clienti::performed_treatments)),
                storico_clienti::notes.eq(excluded(storico_clienti::notes)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
