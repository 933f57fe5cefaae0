use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{ClientId, EmployeeId, TimeOfDay, TreatmentId};
use crate::forms::FormError;

#[derive(Clone, Debug, Deserialize, Validate)]
/// New appointment dialog contents.
pub struct AppointmentForm {
    #[validate(length(min = 1))]
    pub client_id: String,
    #[validate(length(min = 1))]
    pub employee_id: String,
    #[validate(length(min = 1))]
    pub treatment_id: String,
    pub date: NaiveDate,
    #[validate(length(min = 4, max = 5))]
    pub start_time: String,
    /// Blank means "start plus the treatment duration".
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub notes: String,
    /// `None` means the treatment list price.
    #[serde(default)]
    pub price: Option<f64>,
}

/// Parsed form, before the treatment defaults are resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct AppointmentRequest {
    pub client_id: ClientId,
    pub employee_id: EmployeeId,
    pub treatment_id: TreatmentId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: Option<TimeOfDay>,
    pub notes: String,
    pub price: Option<f64>,
}

impl AppointmentForm {
    pub fn parse(self) -> Result<AppointmentRequest, FormError> {
        self.validate()?;

        let start: TimeOfDay = self.start_time.parse().map_err(|_| FormError::InvalidTime)?;
        let end = if self.end_time.trim().is_empty() {
            None
        } else {
            let end: TimeOfDay = self.end_time.parse().map_err(|_| FormError::InvalidTime)?;
            if end <= start {
                return Err(FormError::InvalidSlot);
            }
            Some(end)
        };
        if self.price.is_some_and(|p| p < 0.0) {
            return Err(FormError::InvalidPrice);
        }

        Ok(AppointmentRequest {
            client_id: ClientId::new(self.client_id).map_err(|_| FormError::InvalidId)?,
            employee_id: EmployeeId::new(self.employee_id).map_err(|_| FormError::InvalidId)?,
            treatment_id: TreatmentId::new(self.treatment_id).map_err(|_| FormError::InvalidId)?,
            date: self.date,
            start,
            end,
            notes: self.notes.trim().to_string(),
            price: self.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AppointmentForm {
        AppointmentForm {
            client_id: "c1".into(),
            employee_id: "e1".into(),
            treatment_id: "t1".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_time: "9:30".into(),
            end_time: String::new(),
            notes: " prima volta ".into(),
            price: None,
        }
    }

    #[test]
    fn blank_end_time_is_left_to_the_treatment() {
        let request = form().parse().unwrap();
        assert_eq!(request.start.to_string(), "09:30");
        assert_eq!(request.end, None);
        assert_eq!(request.notes, "prima volta");
    }

    #[test]
    fn explicit_end_must_follow_start() {
        let mut f = form();
        f.end_time = "09:00".into();
        assert!(matches!(f.parse(), Err(FormError::InvalidSlot)));

        let mut f = form();
        f.end_time = "10:15".into();
        assert_eq!(f.parse().unwrap().end.map(|t| t.to_string()).as_deref(), Some("10:15"));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let mut f = form();
        f.start_time = "9h30".into();
        assert!(matches!(f.parse(), Err(FormError::InvalidTime)));

        let mut f = form();
        f.client_id = String::new();
        assert!(matches!(f.parse(), Err(FormError::Validation(_))));

        let mut f = form();
        f.price = Some(-1.0);
        assert!(matches!(f.parse(), Err(FormError::InvalidPrice)));
    }
}
