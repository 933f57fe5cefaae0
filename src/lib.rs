//! Appointment management for the Thermalya beauty salon.
//!
//! The `data` feature carries the domain model, the SQLite repository and
//! the service layer. The default `app` feature adds the view-state
//! controllers used by the front desk screens and the seeding binary.

pub mod auth;
pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

#[cfg(feature = "app")]
pub mod controllers;
