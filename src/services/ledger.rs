//! Payments and the per-client history rollup.
//!
//! Recording a payment writes the ledger entry first and then appends the
//! matching record to the client history. The two writes are independent.

use chrono::NaiveDateTime;
use log::info;

use crate::domain::client_history::{ClientHistory, PerformedTreatment, PurchasedProduct};
use crate::domain::transaction::{NewTransaction, PaymentMethod, Transaction, TransactionKind};
use crate::domain::types::{AppointmentId, ClientId, EmployeeId, ProductId, TransactionId};
use crate::repository::{
    AppointmentReader, ClientHistoryReader, ClientHistoryWriter, EmployeeReader, ProductReader,
    TransactionReader, TransactionWriter, TreatmentReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Over-the-counter product sale.
#[derive(Clone, Debug)]
pub struct ProductSale {
    pub client_id: ClientId,
    pub employee_id: EmployeeId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub at: NaiveDateTime,
}

pub fn record_transaction<R>(repo: &R, new_transaction: &NewTransaction) -> ServiceResult<TransactionId>
where
    R: TransactionWriter + ?Sized,
{
    if new_transaction.amount < 0.0 {
        return Err(ServiceError::TypeConstraint(
            "amount cannot be negative".to_string(),
        ));
    }
    let id = repo.create_transaction(new_transaction)?;
    info!(
        "recorded {} payment of {:.2} for {}",
        new_transaction.kind, new_transaction.amount, new_transaction.client_id
    );
    Ok(id)
}

/// Ledger of one client, newest first.
pub fn client_transactions<R>(repo: &R, client_id: &ClientId) -> ServiceResult<Vec<Transaction>>
where
    R: TransactionReader + ?Sized,
{
    repo.list_client_transactions(client_id)
        .map_err(ServiceError::from)
}

/// Stored history, or an empty one when the client has none yet.
pub fn client_history<R>(repo: &R, client_id: &ClientId) -> ServiceResult<ClientHistory>
where
    R: ClientHistoryReader + ?Sized,
{
    Ok(repo
        .get_client_history(client_id)?
        .unwrap_or_else(|| ClientHistory::empty(client_id.clone())))
}

fn update_history<R, F>(repo: &R, client_id: &ClientId, apply: F) -> ServiceResult<()>
where
    R: ClientHistoryReader + ClientHistoryWriter + ?Sized,
    F: FnOnce(&mut ClientHistory),
{
    let mut history = client_history(repo, client_id)?;
    apply(&mut history);
    repo.save_client_history(&history)
        .map_err(ServiceError::from)
}

/// Charges an appointment and adds it to the client's performed treatments.
pub fn record_treatment_payment<R>(
    repo: &R,
    appointment_id: &AppointmentId,
    payment_method: PaymentMethod,
    at: NaiveDateTime,
) -> ServiceResult<TransactionId>
where
    R: AppointmentReader
        + TreatmentReader
        + EmployeeReader
        + TransactionWriter
        + ClientHistoryReader
        + ClientHistoryWriter
        + ?Sized,
{
    let appointment = repo
        .get_appointment_by_id(appointment_id)?
        .ok_or(ServiceError::NotFound)?;
    if appointment.is_cancelled() {
        return Err(ServiceError::Conflict("appointment is cancelled".to_string()));
    }
    let treatment = repo
        .get_treatment_by_id(&appointment.treatment_id)?
        .ok_or(ServiceError::NotFound)?;
    let employee_name = repo
        .get_employee_by_id(&appointment.employee_id)?
        .map(|e| e.full_name())
        .unwrap_or_default();

    let transaction_id = record_transaction(
        repo,
        &NewTransaction {
            client_id: appointment.client_id.clone(),
            date: at,
            kind: TransactionKind::Appointment,
            description: treatment.name.to_string(),
            amount: appointment.price,
            employee_id: appointment.employee_id.clone(),
            appointment_id: Some(appointment.id.clone()),
            product_id: None,
            payment_method,
            notes: appointment.notes.clone(),
        },
    )?;

    update_history(repo, &appointment.client_id, |history| {
        history.performed_treatments.push(PerformedTreatment {
            date: at,
            treatment_id: treatment.id.clone(),
            treatment_name: treatment.name.to_string(),
            employee_id: appointment.employee_id.clone(),
            employee_name,
            cost: appointment.price,
            notes: appointment.notes.clone(),
        });
    })?;

    Ok(transaction_id)
}

/// Charges a product sale and adds it to the client's purchases.
pub fn record_product_sale<R>(repo: &R, sale: &ProductSale) -> ServiceResult<TransactionId>
where
    R: ProductReader + TransactionWriter + ClientHistoryReader + ClientHistoryWriter + ?Sized,
{
    if sale.quantity == 0 {
        return Err(ServiceError::TypeConstraint(
            "quantity must be positive".to_string(),
        ));
    }
    let product = repo
        .get_product_by_id(&sale.product_id)?
        .ok_or(ServiceError::NotFound)?;

    let description = if sale.quantity == 1 {
        product.name.to_string()
    } else {
        format!("{} x{}", product.name, sale.quantity)
    };

    let transaction_id = record_transaction(
        repo,
        &NewTransaction {
            client_id: sale.client_id.clone(),
            date: sale.at,
            kind: TransactionKind::Product,
            description,
            amount: product.price * f64::from(sale.quantity),
            employee_id: sale.employee_id.clone(),
            appointment_id: None,
            product_id: Some(product.id.clone()),
            payment_method: sale.payment_method,
            notes: String::new(),
        },
    )?;

    update_history(repo, &sale.client_id, |history| {
        history.purchased_products.push(PurchasedProduct {
            date: sale.at,
            product_id: product.id.clone(),
            product_name: product.name.to_string(),
            quantity: sale.quantity,
            price: product.price,
        });
    })?;

    Ok(transaction_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::product::{Product, ProductCategory};
    use crate::domain::types::ItemName;
    use crate::repository::mock::MockRepository;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap()
    }

    fn sale(quantity: u32) -> ProductSale {
        ProductSale {
            client_id: ClientId::new("c1").unwrap(),
            employee_id: EmployeeId::new("e1").unwrap(),
            product_id: ProductId::new("p1").unwrap(),
            quantity,
            payment_method: PaymentMethod::Cash,
            at: at(),
        }
    }

    #[test]
    fn product_sale_writes_ledger_and_history() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|_| {
            Ok(Some(Product {
                id: ProductId::new("p1").unwrap(),
                name: ItemName::new("Smalto OPI Red").unwrap(),
                category: ProductCategory::Polish,
                price: 12.0,
                description: String::new(),
                active: true,
            }))
        });
        repo.expect_create_transaction()
            .withf(|tx| {
                tx.amount == 24.0
                    && tx.kind == TransactionKind::Product
                    && tx.description == "Smalto OPI Red x2"
            })
            .times(1)
            .returning(|_| Ok(TransactionId::new("tx1").unwrap()));
        repo.expect_get_client_history().returning(|_| Ok(None));
        repo.expect_save_client_history()
            .withf(|h| h.purchased_products.len() == 1 && h.total_spent() == 24.0)
            .times(1)
            .returning(|_| Ok(()));

        let id = record_product_sale(&repo, &sale(2)).unwrap();
        assert_eq!(id.as_str(), "tx1");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let repo = MockRepository::new();
        assert!(matches!(
            record_product_sale(&repo, &sale(0)),
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn missing_history_reads_as_empty() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_history().returning(|_| Ok(None));

        let history = client_history(&repo, &ClientId::new("c9").unwrap()).unwrap();
        assert!(history.purchased_products.is_empty());
        assert_eq!(history.client_id.as_str(), "c9");
    }
}
