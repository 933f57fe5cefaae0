//! Domain aggregates exposed by the salon service layer.

pub mod appointment;
pub mod calendar;
pub mod client;
pub mod client_history;
pub mod employee;
pub mod product;
pub mod transaction;
pub mod treatment;
pub mod types;
