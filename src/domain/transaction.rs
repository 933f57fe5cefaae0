use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AppointmentId, ClientId, EmployeeId, ProductId, TransactionId, string_enum,
};

string_enum! {
    TransactionKind {
        Appointment => "appuntamento",
        Product => "prodotto",
    }
}

string_enum! {
    PaymentMethod {
        Cash => "contanti",
        Card => "carta",
        Online => "online",
    }
}

/// Ledger entry for a payment collected at the salon.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub client_id: ClientId,
    pub date: NaiveDateTime,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    pub employee_id: EmployeeId,
    pub appointment_id: Option<AppointmentId>,
    pub product_id: Option<ProductId>,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTransaction {
    pub client_id: ClientId,
    pub date: NaiveDateTime,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    pub employee_id: EmployeeId,
    pub appointment_id: Option<AppointmentId>,
    pub product_id: Option<ProductId>,
    pub payment_method: PaymentMethod,
    pub notes: String,
}
