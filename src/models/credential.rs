use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Password hash registered for an employee login email.
#[derive(Debug, Clone, Identifiable, Queryable, Insertable)]
#[diesel(table_name = crate::schema::credentials)]
#[diesel(primary_key(email))]
pub struct Credential {
    pub email: String,
    pub user_id: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}
