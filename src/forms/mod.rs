//! Input forms collected by the salon screens.

use thiserror::Error;
use validator::ValidationErrors;

pub mod appointment;
pub mod client;
pub mod login;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("name and surname are required")]
    InvalidName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid identifier")]
    InvalidId,

    #[error("invalid time, expected HH:MM")]
    InvalidTime,

    #[error("end time must be after start time")]
    InvalidSlot,

    #[error("price cannot be negative")]
    InvalidPrice,
}
