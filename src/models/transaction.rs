use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::transaction::{
    NewTransaction as DomainNewTransaction, Transaction as DomainTransaction,
};
use crate::domain::types::{
    AppointmentId, ClientId, EmployeeId, ProductId, TransactionId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::transazioni)]
/// Diesel model for [`crate::domain::transaction::Transaction`].
pub struct Transaction {
    pub id: String,
    pub client_id: String,
    pub date: NaiveDateTime,
    pub kind: String,
    pub description: String,
    pub amount: f64,
    pub employee_id: String,
    pub appointment_id: Option<String>,
    pub product_id: Option<String>,
    pub payment_method: String,
    pub notes: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transazioni)]
pub struct NewTransaction<'a> {
    pub id: &'a str,
    pub client_id: &'a str,
    pub date: NaiveDateTime,
    pub kind: &'a str,
    pub description: &'a str,
    pub amount: f64,
    pub employee_id: &'a str,
    pub appointment_id: Option<&'a str>,
    pub product_id: Option<&'a str>,
    pub payment_method: &'a str,
    pub notes: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::transazioni)]
#[diesel(treat_none_as_null = true)]
pub struct TransactionChanges<'a> {
    pub client_id: &'a str,
    pub date: NaiveDateTime,
    pub kind: &'a str,
    pub description: &'a str,
    pub amount: f64,
    pub employee_id: &'a str,
    pub appointment_id: Option<&'a str>,
    pub product_id: Option<&'a str>,
    pub payment_method: &'a str,
    pub notes: &'a str,
}

impl TryFrom<Transaction> for DomainTransaction {
    type Error = TypeConstraintError;

    fn try_from(tx: Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TransactionId::new(tx.id)?,
            client_id: ClientId::new(tx.client_id)?,
            date: tx.date,
            kind: tx.kind.parse()?,
            description: tx.description,
            amount: tx.amount,
            employee_id: EmployeeId::new(tx.employee_id)?,
            appointment_id: tx.appointment_id.map(AppointmentId::new).transpose()?,
            product_id: tx.product_id.map(ProductId::new).transpose()?,
            payment_method: tx.payment_method.parse()?,
            notes: tx.notes,
        })
    }
}

impl<'a> NewTransaction<'a> {
    pub fn new(id: &'a TransactionId, tx: &'a DomainNewTransaction) -> Self {
        Self {
            id: id.as_str(),
            client_id: tx.client_id.as_str(),
            date: tx.date,
            kind: tx.kind.as_str(),
            description: tx.description.as_str(),
            amount: tx.amount,
            employee_id: tx.employee_id.as_str(),
            appointment_id: tx.appointment_id.as_ref().map(AppointmentId::as_str),
            product_id: tx.product_id.as_ref().map(ProductId::as_str),
            payment_method: tx.payment_method.as_str(),
            notes: tx.notes.as_str(),
        }
    }
}

impl<'a> From<&'a DomainTransaction> for TransactionChanges<'a> {
    fn from(tx: &'a DomainTransaction) -> Self {
        Self {
            client_id: tx.client_id.as_str(),
            date: tx.date,
            kind: tx.kind.as_str(),
            description: tx.description.as_str(),
            amount: tx.amount,
            employee_id: tx.employee_id.as_str(),
            appointment_id: tx.appointment_id.as_ref().map(AppointmentId::as_str),
            product_id: tx.product_id.as_ref().map(ProductId::as_str),
            payment_method: tx.payment_method.as_str(),
            notes: tx.notes.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::{PaymentMethod, TransactionKind};
    use chrono::Utc;

    #[test]
    fn row_into_domain_keeps_optional_links() {
        let row = Transaction {
            id: "tx1".into(),
            client_id: "c1".into(),
            date: Utc::now().naive_utc(),
            kind: "prodotto".into(),
            description: "Crema idratante".into(),
            amount: 28.0,
            employee_id: "e1".into(),
            appointment_id: None,
            product_id: Some("p1".into()),
            payment_method: "carta".into(),
            notes: String::new(),
        };
        let domain = DomainTransaction::try_from(row).expect("valid transaction");
        assert_eq!(domain.kind, TransactionKind::Product);
        assert_eq!(domain.payment_method, PaymentMethod::Card);
        assert!(domain.appointment_id.is_none());
        assert_eq!(domain.product_id.as_ref().map(ProductId::as_str), Some("p1"));
    }
}
