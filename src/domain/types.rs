//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, normalized
//! and validated emails, well-formed colours and times) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::{ops::Deref, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Colour is not a `#RRGGBB` hex triplet.
    #[error("invalid colour, expected #RRGGBB")]
    InvalidColor,
    /// Time is not a valid `HH:MM` string.
    #[error("invalid time, expected HH:MM")]
    InvalidTime,
    /// Appointment slot does not end after it starts.
    #[error("end time must be after start time")]
    EndBeforeStart,
    /// Amount or duration is negative or zero where it must be positive.
    #[error("value must be positive")]
    NonPositive,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate document identifiers assigned by the store.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier, rejecting blank values.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Generates a fresh random identifier for a new document.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the owned inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(EmployeeId, "Unique identifier for an employee.");
id_newtype!(ClientId, "Unique identifier for a salon client.");
id_newtype!(TreatmentId, "Unique identifier for a treatment.");
id_newtype!(ProductId, "Unique identifier for a product.");
id_newtype!(AppointmentId, "Unique identifier for an appointment.");
id_newtype!(TransactionId, "Unique identifier for a ledger transaction.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(PersonName, "First name or surname of a person.");

non_empty_string_newtype!(
    ItemName,
    "Display name of a catalog entry (treatment or product)."
);

macro_rules! email_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validates and normalizes an email string.
            pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
                let normalized = normalize_email(email)?;
                Ok(Self(normalized))
            }

            /// Borrow the email as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the owned inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

email_newtype!(EmployeeEmail, "Login email of an employee.");
email_newtype!(ClientEmail, "Contact email of a client.");

/// Calendar colour of an employee, stored as upper-case `#RRGGBB`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_uppercase();
        let digits = value
            .strip_prefix('#')
            .ok_or(TypeConstraintError::InvalidColor)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeConstraintError::InvalidColor);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or_default()
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#9B6BA8".to_string())
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for HexColor {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wall-clock time of an appointment boundary, printed as `HH:MM`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TypeConstraintError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or(TypeConstraintError::InvalidTime)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minutes_since_midnight(self) -> i64 {
        i64::from(self.0.hour() * 60 + self.0.minute())
    }

    /// Adds `minutes`, failing when the result would cross midnight.
    pub fn plus_minutes(self, minutes: u32) -> Result<Self, TypeConstraintError> {
        let total = self.minutes_since_midnight() + i64::from(minutes);
        if total >= 24 * 60 {
            return Err(TypeConstraintError::InvalidTime);
        }
        Self::new((total / 60) as u32, (total % 60) as u32)
    }

    pub fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeOfDay {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidTime)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Generates a closed enumeration persisted as a fixed string tag.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Tag stored in the database.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::types::TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($tag => Ok($name::$variant),)+
                    other => Err($crate::domain::types::TypeConstraintError::InvalidValue(
                        format!("unknown {} `{other}`", stringify!($name)),
                    )),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::types::TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

pub(crate) use string_enum;
