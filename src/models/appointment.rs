use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::appointment::{
    Appointment as DomainAppointment, AppointmentStatus, NewAppointment as DomainNewAppointment,
};
use crate::domain::types::{AppointmentId, ClientId, EmployeeId, TreatmentId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::appuntamenti)]
/// Diesel model for [`crate::domain::appointment::Appointment`].
///
/// Times are stored as `HH:MM` text so that lexical order matches
/// chronological order within a day.
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub treatment_id: String,
    pub notes: String,
    pub status: String,
    pub calendar_event_id: Option<String>,
    pub reminder_sent: bool,
    pub price: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appuntamenti)]
pub struct NewAppointment<'a> {
    pub id: &'a str,
    pub client_id: &'a str,
    pub employee_id: &'a str,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub treatment_id: &'a str,
    pub notes: &'a str,
    pub status: &'a str,
    pub reminder_sent: bool,
    pub price: f64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::appuntamenti)]
#[diesel(treat_none_as_null = true)]
pub struct AppointmentChanges<'a> {
    pub client_id: &'a str,
    pub employee_id: &'a str,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub treatment_id: &'a str,
    pub notes: &'a str,
    pub status: &'a str,
    pub calendar_event_id: Option<&'a str>,
    pub reminder_sent: bool,
    pub price: f64,
}

impl TryFrom<Appointment> for DomainAppointment {
    type Error = TypeConstraintError;

    fn try_from(appointment: Appointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AppointmentId::new(appointment.id)?,
            client_id: ClientId::new(appointment.client_id)?,
            employee_id: EmployeeId::new(appointment.employee_id)?,
            date: appointment.date,
            start: appointment.start_time.parse()?,
            end: appointment.end_time.parse()?,
            treatment_id: TreatmentId::new(appointment.treatment_id)?,
            notes: appointment.notes,
            status: appointment.status.parse()?,
            calendar_event_id: appointment.calendar_event_id,
            reminder_sent: appointment.reminder_sent,
            price: appointment.price,
        })
    }
}

impl<'a> NewAppointment<'a> {
    /// New bookings start out confirmed with no reminder sent.
    pub fn new(id: &'a AppointmentId, appointment: &'a DomainNewAppointment) -> Self {
        Self {
            id: id.as_str(),
            client_id: appointment.client_id.as_str(),
            employee_id: appointment.employee_id.as_str(),
            date: appointment.date,
            start_time: appointment.start.to_string(),
            end_time: appointment.end.to_string(),
            treatment_id: appointment.treatment_id.as_str(),
            notes: appointment.notes.as_str(),
            status: AppointmentStatus::Confirmed.as_str(),
            reminder_sent: false,
            price: appointment.price,
        }
    }
}

impl<'a> From<&'a DomainAppointment> for AppointmentChanges<'a> {
    fn from(appointment: &'a DomainAppointment) -> Self {
        Self {
            client_id: appointment.client_id.as_str(),
            employee_id: appointment.employee_id.as_str(),
            date: appointment.date,
            start_time: appointment.start.to_string(),
            end_time: appointment.end.to_string(),
            treatment_id: appointment.treatment_id.as_str(),
            notes: appointment.notes.as_str(),
            status: appointment.status.as_str(),
            calendar_event_id: appointment.calendar_event_id.as_deref(),
            reminder_sent: appointment.reminder_sent,
            price: appointment.price,
        }
    }
}
