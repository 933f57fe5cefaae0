//! Password hashes backing [`crate::auth::PasswordIdentity`].

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::types::{EmployeeEmail, EmployeeId},
    models::credential::Credential as DbCredential,
    repository::{
        CredentialReader, CredentialWriter, DieselRepository, StoredCredential,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CredentialReader for DieselRepository {
    fn get_credential(&self, email: &EmployeeEmail) -> RepositoryResult<Option<StoredCredential>> {
        use crate::schema::credentials;

        let mut conn = self.conn()?;

        let row = credentials::table
            .find(email.as_str())
            .first::<DbCredential>(&mut conn)
            .optional()?;

        row.map(|row| {
            Ok(StoredCredential {
                user_id: EmployeeId::new(row.user_id).map_err(RepositoryError::from)?,
                password_hash: row.password_hash,
            })
        })
        .transpose()
    }
}

impl CredentialWriter for DieselRepository {
    fn create_credential(
        &self,
        email: &EmployeeEmail,
        credential: &StoredCredential,
    ) -> RepositoryResult<()> {
        use crate::schema::credentials;

        let mut conn = self.conn()?;

        let row = DbCredential {
            email: email.to_string(),
            user_id: credential.user_id.to_string(),
            password_hash: credential.password_hash.clone(),
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(credentials::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }
}
