use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AppointmentId, ClientId, EmployeeId, TimeOfDay, TreatmentId, TypeConstraintError, string_enum,
};

string_enum! {
    /// Lifecycle of an appointment; `Cancelled` is the soft-deleted state.
    AppointmentStatus {
        Confirmed => "confermato",
        Cancelled => "cancellato",
        Completed => "completato",
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Confirmed
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub treatment_id: TreatmentId,
    pub notes: String,
    pub status: AppointmentStatus,
    /// Identifier of the mirrored event in an external calendar, if synced.
    pub calendar_event_id: Option<String>,
    pub reminder_sent: bool,
    pub price: f64,
}

impl Appointment {
    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes_since_midnight() - self.start.minutes_since_midnight()
    }

    /// Whether both appointments occupy a common instant on the same day.
    pub fn overlaps(&self, date: NaiveDate, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.date == date && self.start < end && start < self.end
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAppointment {
    pub client_id: ClientId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub treatment_id: TreatmentId,
    pub notes: String,
    pub price: f64,
}

impl NewAppointment {
    /// Builds a confirmed booking, rejecting slots that do not end after they start.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client_id: ClientId,
        employee_id: EmployeeId,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
        treatment_id: TreatmentId,
        notes: impl Into<String>,
        price: f64,
    ) -> Result<Self, TypeConstraintError> {
        if end <= start {
            return Err(TypeConstraintError::EndBeforeStart);
        }
        if price < 0.0 {
            return Err(TypeConstraintError::NonPositive);
        }
        Ok(Self {
            client_id,
            employee_id,
            date,
            start,
            end,
            treatment_id,
            notes: notes.into().trim().to_string(),
            price,
        })
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes_since_midnight() - self.start.minutes_since_midnight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn booking(start: &str, end: &str) -> Result<NewAppointment, TypeConstraintError> {
        NewAppointment::new(
            ClientId::new("c1").unwrap(),
            EmployeeId::new("e1").unwrap(),
            day(),
            time(start),
            time(end),
            TreatmentId::new("t1").unwrap(),
            "",
            25.0,
        )
    }

    #[test]
    fn end_must_follow_start() {
        assert_eq!(booking("10:00", "10:00").unwrap_err(), TypeConstraintError::EndBeforeStart);
        assert_eq!(booking("11:00", "10:00").unwrap_err(), TypeConstraintError::EndBeforeStart);
        assert_eq!(booking("10:00", "11:30").unwrap().duration_minutes(), 90);
    }

    #[test]
    fn overlap_is_half_open() {
        let new = booking("10:00", "11:00").unwrap();
        let existing = Appointment {
            id: AppointmentId::new("a1").unwrap(),
            client_id: new.client_id,
            employee_id: new.employee_id,
            date: new.date,
            start: new.start,
            end: new.end,
            treatment_id: new.treatment_id,
            notes: String::new(),
            status: AppointmentStatus::Confirmed,
            calendar_event_id: None,
            reminder_sent: false,
            price: new.price,
        };

        assert!(existing.overlaps(day(), time("10:30"), time("11:30")));
        assert!(existing.overlaps(day(), time("09:00"), time("12:00")));
        assert!(!existing.overlaps(day(), time("11:00"), time("12:00")));
        assert!(!existing.overlaps(day(), time("09:00"), time("10:00")));
        assert!(!existing.overlaps(day().succ_opt().unwrap(), time("10:30"), time("11:30")));
    }
}
