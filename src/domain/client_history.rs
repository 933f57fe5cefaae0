//! Denormalized per-client rollup of purchases and treatments.
//!
//! The history is maintained by hand when a sale or a treatment is recorded;
//! it is never recomputed from the transaction ledger.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, EmployeeId, ProductId, TreatmentId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PurchasedProduct {
    pub date: NaiveDateTime,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PerformedTreatment {
    pub date: NaiveDateTime,
    pub treatment_id: TreatmentId,
    pub treatment_name: String,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub cost: f64,
    pub notes: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientHistory {
    pub client_id: ClientId,
    pub purchased_products: Vec<PurchasedProduct>,
    pub performed_treatments: Vec<PerformedTreatment>,
    pub notes: String,
}

impl ClientHistory {
    /// Empty history for a client that has none stored yet.
    pub fn empty(client_id: ClientId) -> Self {
        Self {
            client_id,
            purchased_products: Vec::new(),
            performed_treatments: Vec::new(),
            notes: String::new(),
        }
    }

    /// Sum of everything the client has been charged, products and treatments.
    pub fn total_spent(&self) -> f64 {
        let products: f64 = self
            .purchased_products
            .iter()
            .map(|p| p.price * f64::from(p.quantity))
            .sum();
        let treatments: f64 = self.performed_treatments.iter().map(|t| t.cost).sum();
        products + treatments
    }
}
