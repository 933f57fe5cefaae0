//! Database models shared across the salon repository.

pub mod appointment;
pub mod client;
pub mod client_history;
pub mod config;
pub mod credential;
pub mod employee;
pub mod product;
pub mod transaction;
pub mod treatment;
