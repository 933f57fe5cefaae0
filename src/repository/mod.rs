//! Data-access contracts and their Diesel-backed implementation.
//!
//! Every entity family exposes a reader and a writer trait. Services and
//! controllers are generic over these traits, so the SQLite adapter in
//! [`DieselRepository`] can be replaced by [`mock::MockRepository`] in tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::{
    appointment::{Appointment, NewAppointment},
    calendar::DateRange,
    client::{Client, NewClient},
    client_history::ClientHistory,
    employee::{Employee, NewEmployee},
    product::{NewProduct, Product},
    transaction::{NewTransaction, Transaction},
    treatment::{NewTreatment, Treatment},
    types::{
        AppointmentId, ClientId, EmployeeEmail, EmployeeId, ProductId, TransactionId, TreatmentId,
    },
};
use crate::repository::errors::RepositoryResult;

pub mod appointment;
pub mod client;
pub mod client_history;
pub mod credential;
pub mod employee;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod product;
pub mod transaction;
pub mod treatment;

/// Appointments falling inside an inclusive date window.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRangeQuery {
    pub range: DateRange,
    /// `None` or an empty list matches every employee; otherwise only the
    /// listed ids.
    pub employee_ids: Option<Vec<EmployeeId>>,
}

impl AppointmentRangeQuery {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            range: DateRange::new(start, end),
            employee_ids: None,
        }
    }

    /// Restricts the query to `ids`. An empty selection leaves it unfiltered.
    pub fn employees(mut self, ids: impl IntoIterator<Item = EmployeeId>) -> Self {
        let ids: Vec<EmployeeId> = ids.into_iter().collect();
        self.employee_ids = (!ids.is_empty()).then_some(ids);
        self
    }
}

impl From<DateRange> for AppointmentRangeQuery {
    fn from(range: DateRange) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Stored login secret for an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub user_id: EmployeeId,
    pub password_hash: String,
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: &ClientId) -> RepositoryResult<Option<Client>>;
    /// Active clients ordered by surname then name.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    /// Active clients whose name, surname, phone or email contain `query`.
    fn search_clients(&self, query: &str) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<ClientId>;
    fn update_client(&self, id: &ClientId, client: &Client) -> RepositoryResult<()>;
    /// Flips the `active` flag; the row is kept.
    fn delete_client(&self, id: &ClientId) -> RepositoryResult<()>;
    fn touch_client_last_visit(&self, id: &ClientId, at: NaiveDateTime) -> RepositoryResult<()>;
    fn update_client_notes(&self, id: &ClientId, notes: &str) -> RepositoryResult<()>;
}

pub trait EmployeeReader {
    fn get_employee_by_id(&self, id: &EmployeeId) -> RepositoryResult<Option<Employee>>;
    fn get_employee_by_email(&self, email: &EmployeeEmail) -> RepositoryResult<Option<Employee>>;
    /// Active bookable staff in creation order.
    fn list_employees(&self) -> RepositoryResult<Vec<Employee>>;
}

pub trait EmployeeWriter {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<EmployeeId>;
    fn update_employee(&self, id: &EmployeeId, employee: &Employee) -> RepositoryResult<()>;
    /// Removes the row permanently.
    fn delete_employee(&self, id: &EmployeeId) -> RepositoryResult<()>;
}

pub trait TreatmentReader {
    fn get_treatment_by_id(&self, id: &TreatmentId) -> RepositoryResult<Option<Treatment>>;
    fn list_treatments(&self) -> RepositoryResult<Vec<Treatment>>;
}

pub trait TreatmentWriter {
    fn create_treatment(&self, new_treatment: &NewTreatment) -> RepositoryResult<TreatmentId>;
    fn update_treatment(&self, id: &TreatmentId, treatment: &Treatment) -> RepositoryResult<()>;
    fn delete_treatment(&self, id: &TreatmentId) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductId>;
    fn update_product(&self, id: &ProductId, product: &Product) -> RepositoryResult<()>;
    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}

pub trait AppointmentReader {
    fn get_appointment_by_id(&self, id: &AppointmentId) -> RepositoryResult<Option<Appointment>>;
    /// Every non-cancelled appointment, date then start time ascending.
    fn list_appointments(&self) -> RepositoryResult<Vec<Appointment>>;
    fn list_appointments_in_range(
        &self,
        query: &AppointmentRangeQuery,
    ) -> RepositoryResult<Vec<Appointment>>;
    /// One employee's non-cancelled day, start time ascending.
    fn list_employee_day_appointments(
        &self,
        employee_id: &EmployeeId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Appointment>>;
    fn list_client_appointments(&self, client_id: &ClientId) -> RepositoryResult<Vec<Appointment>>;
}

pub trait AppointmentWriter {
    fn create_appointment(&self, new_appointment: &NewAppointment)
    -> RepositoryResult<AppointmentId>;
    fn update_appointment(
        &self,
        id: &AppointmentId,
        appointment: &Appointment,
    ) -> RepositoryResult<()>;
    /// Marks the appointment `cancellato`; date, time and parties are kept.
    fn delete_appointment(&self, id: &AppointmentId) -> RepositoryResult<()>;
}

pub trait TransactionReader {
    fn get_transaction_by_id(&self, id: &TransactionId) -> RepositoryResult<Option<Transaction>>;
    fn list_transactions(&self) -> RepositoryResult<Vec<Transaction>>;
    fn list_client_transactions(&self, client_id: &ClientId)
    -> RepositoryResult<Vec<Transaction>>;
}

pub trait TransactionWriter {
    fn create_transaction(&self, new_transaction: &NewTransaction)
    -> RepositoryResult<TransactionId>;
    fn update_transaction(
        &self,
        id: &TransactionId,
        transaction: &Transaction,
    ) -> RepositoryResult<()>;
    fn delete_transaction(&self, id: &TransactionId) -> RepositoryResult<()>;
}

pub trait ClientHistoryReader {
    fn get_client_history(&self, client_id: &ClientId) -> RepositoryResult<Option<ClientHistory>>;
}

pub trait ClientHistoryWriter {
    /// Inserts or fully replaces the history of `history.client_id`.
    fn save_client_history(&self, history: &ClientHistory) -> RepositoryResult<()>;
}

pub trait CredentialReader {
    fn get_credential(&self, email: &EmployeeEmail) -> RepositoryResult<Option<StoredCredential>>;
}

pub trait CredentialWriter {
    fn create_credential(
        &self,
        email: &EmployeeEmail,
        credential: &StoredCredential,
    ) -> RepositoryResult<()>;
}

/// SQLite-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
