//! Repository implementation for the payment ledger.

use diesel::prelude::*;
use log::debug;

use crate::{
    domain::{
        transaction::{NewTransaction, Transaction},
        types::{ClientId, TransactionId},
    },
    models::transaction::{
        NewTransaction as DbNewTransaction, Transaction as DbTransaction, TransactionChanges,
    },
    repository::{
        DieselRepository, TransactionReader, TransactionWriter,
        errors::{RepositoryError, RepositoryResult, require_affected},
    },
};

impl TransactionReader for DieselRepository {
    fn get_transaction_by_id(&self, id: &TransactionId) -> RepositoryResult<Option<Transaction>> {
        use crate::schema::transazioni;

        let mut conn = self.conn()?;

        let db_transaction = transazioni::table
            .find(id.as_str())
            .first::<DbTransaction>(&mut conn)
            .optional()?;

        db_transaction
            .map(Transaction::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_transactions(&self) -> RepositoryResult<Vec<Transaction>> {
        use crate::schema::transazioni;

        let mut conn = self.conn()?;

        let rows = transazioni::table
            .order(transazioni::date.desc())
            .load::<DbTransaction>(&mut conn)?;

        rows.into_iter()
            .map(|row| Transaction::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn list_client_transactions(
        &self,
        client_id: &ClientId,
    ) -> RepositoryResult<Vec<Transaction>> {
        use crate::schema::transazioni;

        let mut conn = self.conn()?;

        let rows = transazioni::table
            .filter(transazioni::client_id.eq(client_id.as_str()))
            .order(transazioni::date.desc())
            .load::<DbTransaction>(&mut conn)?;

        rows.into_iter()
            .map(|row| Transaction::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl TransactionWriter for DieselRepository {
    fn create_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> RepositoryResult<TransactionId> {
        use crate::schema::transazioni;

        let mut conn = self.conn()?;

        let id = TransactionId::generate();
        diesel::insert_into(transazioni::table)
            .values(&DbNewTransaction::new(&id, new_transaction))
            .execute(&mut conn)?;

        debug!("recorded transaction {id} of {:.2}", new_transaction.amount);
        Ok(id)
    }

    fn update_transaction(
        &self,
        id: &TransactionId,
        transaction: &Transaction,
    ) -> RepositoryResult<()> {
        use crate::schema::transazioni;

        let mut conn = self.conn()?;

        let affected = diesel::update(transazioni::table.find(id.as_str()))
            .set(&TransactionChanges::from(transaction))
            .execute(&mut conn)?;

        require_affected(affected)
    }

    fn delete_transaction(&self, id: &TransactionId) -> RepositoryResult<()> {
        use crate::schema::transazioni;

        let mut conn = self.conn()?;

        let affected = diesel::delete(transazioni::table.find(id.as_str())).execute(&mut conn)?;

        require_affected(affected)
    }
}
