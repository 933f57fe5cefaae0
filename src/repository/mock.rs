//! Mock repository implementations for isolating services in tests.

use chrono::{NaiveDate, NaiveDateTime};
use mockall::mock;

use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::client::{Client, NewClient};
use crate::domain::client_history::ClientHistory;
use crate::domain::employee::{Employee, NewEmployee};
use crate::domain::product::{NewProduct, Product};
use crate::domain::transaction::{NewTransaction, Transaction};
use crate::domain::treatment::{NewTreatment, Treatment};
use crate::domain::types::{
    AppointmentId, ClientId, EmployeeEmail, EmployeeId, ProductId, TransactionId, TreatmentId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AppointmentRangeQuery, AppointmentReader, AppointmentWriter, ClientHistoryReader,
    ClientHistoryWriter, ClientReader, ClientWriter, CredentialReader, CredentialWriter,
    EmployeeReader, EmployeeWriter, ProductReader, ProductWriter, StoredCredential,
    TransactionReader, TransactionWriter, TreatmentReader, TreatmentWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: &ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn search_clients(&self, query: &str) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<ClientId>;
        fn update_client(&self, id: &ClientId, client: &Client) -> RepositoryResult<()>;
        fn delete_client(&self, id: &ClientId) -> RepositoryResult<()>;
        fn touch_client_last_visit(&self, id: &ClientId, at: NaiveDateTime) -> RepositoryResult<()>;
        fn update_client_notes(&self, id: &ClientId, notes: &str) -> RepositoryResult<()>;
    }

    impl EmployeeReader for Repository {
        fn get_employee_by_id(&self, id: &EmployeeId) -> RepositoryResult<Option<Employee>>;
        fn get_employee_by_email(&self, email: &EmployeeEmail) -> RepositoryResult<Option<Employee>>;
        fn list_employees(&self) -> RepositoryResult<Vec<Employee>>;
    }

    impl EmployeeWriter for Repository {
        fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<EmployeeId>;
        fn update_employee(&self, id: &EmployeeId, employee: &Employee) -> RepositoryResult<()>;
        fn delete_employee(&self, id: &EmployeeId) -> RepositoryResult<()>;
    }

    impl TreatmentReader for Repository {
        fn get_treatment_by_id(&self, id: &TreatmentId) -> RepositoryResult<Option<Treatment>>;
        fn list_treatments(&self) -> RepositoryResult<Vec<Treatment>>;
    }

    impl TreatmentWriter for Repository {
        fn create_treatment(&self, new_treatment: &NewTreatment) -> RepositoryResult<TreatmentId>;
        fn update_treatment(&self, id: &TreatmentId, treatment: &Treatment) -> RepositoryResult<()>;
        fn delete_treatment(&self, id: &TreatmentId) -> RepositoryResult<()>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductId>;
        fn update_product(&self, id: &ProductId, product: &Product) -> RepositoryResult<()>;
        fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
    }

    impl AppointmentReader for Repository {
        fn get_appointment_by_id(&self, id: &AppointmentId) -> RepositoryResult<Option<Appointment>>;
        fn list_appointments(&self) -> RepositoryResult<Vec<Appointment>>;
        fn list_appointments_in_range(
            &self,
            query: &AppointmentRangeQuery,
        ) -> RepositoryResult<Vec<Appointment>>;
        fn list_employee_day_appointments(
            &self,
            employee_id: &EmployeeId,
            date: NaiveDate,
        ) -> RepositoryResult<Vec<Appointment>>;
        fn list_client_appointments(&self, client_id: &ClientId) -> RepositoryResult<Vec<Appointment>>;
    }

    impl AppointmentWriter for Repository {
        fn create_appointment(&self, new_appointment: &NewAppointment) -> RepositoryResult<AppointmentId>;
        fn update_appointment(&self, id: &AppointmentId, appointment: &Appointment) -> RepositoryResult<()>;
        fn delete_appointment(&self, id: &AppointmentId) -> RepositoryResult<()>;
    }

    impl TransactionReader for Repository {
        fn get_transaction_by_id(&self, id: &TransactionId) -> RepositoryResult<Option<Transaction>>;
        fn list_transactions(&self) -> RepositoryResult<Vec<Transaction>>;
        fn list_client_transactions(&self, client_id: &ClientId) -> RepositoryResult<Vec<Transaction>>;
    }

    impl TransactionWriter for Repository {
        fn create_transaction(&self, new_transaction: &NewTransaction) -> RepositoryResult<TransactionId>;
        fn update_transaction(&self, id: &TransactionId, transaction: &Transaction) -> RepositoryResult<()>;
        fn delete_transaction(&self, id: &TransactionId) -> RepositoryResult<()>;
    }

    impl ClientHistoryReader for Repository {
        fn get_client_history(&self, client_id: &ClientId) -> RepositoryResult<Option<ClientHistory>>;
    }

    impl ClientHistoryWriter for Repository {
        fn save_client_history(&self, history: &ClientHistory) -> RepositoryResult<()>;
    }

    impl CredentialReader for Repository {
        fn get_credential(&self, email: &EmployeeEmail) -> RepositoryResult<Option<StoredCredential>>;
    }

    impl CredentialWriter for Repository {
        fn create_credential(
            &self,
            email: &EmployeeEmail,
            credential: &StoredCredential,
        ) -> RepositoryResult<()>;
    }
}
