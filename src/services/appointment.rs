//! Booking rules for the calendar.
//!
//! An employee cannot hold two non-cancelled appointments whose time ranges
//! intersect on the same day. A slot whose length differs from the treatment
//! duration is accepted but logged.

use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};

use crate::domain::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::domain::treatment::Treatment;
use crate::domain::types::{AppointmentId, EmployeeId, TimeOfDay};
use crate::forms::appointment::AppointmentRequest;
use crate::repository::{AppointmentReader, AppointmentWriter, ClientWriter, TreatmentReader};
use crate::services::{ServiceError, ServiceResult};

fn ensure_slot_free<R>(
    repo: &R,
    employee_id: &EmployeeId,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    ignore: Option<&AppointmentId>,
) -> ServiceResult<()>
where
    R: AppointmentReader + ?Sized,
{
    let day = repo.list_employee_day_appointments(employee_id, date)?;
    let clash = day
        .iter()
        .filter(|a| Some(&a.id) != ignore)
        .find(|a| !a.is_cancelled() && a.overlaps(date, start, end));

    match clash {
        Some(existing) => Err(ServiceError::Conflict(format!(
            "{date} {start}-{end} overlaps {}-{}",
            existing.start, existing.end
        ))),
        None => Ok(()),
    }
}

fn warn_on_duration_mismatch(treatment: &Treatment, minutes: i64) {
    if minutes != i64::from(treatment.duration_minutes) {
        warn!(
            "slot of {minutes} min for {} which lasts {} min",
            treatment.name, treatment.duration_minutes
        );
    }
}

/// Books `new_appointment` after checking the employee is free.
pub fn book_appointment<R>(repo: &R, new_appointment: &NewAppointment) -> ServiceResult<AppointmentId>
where
    R: AppointmentReader + AppointmentWriter + TreatmentReader + ?Sized,
{
    let treatment = repo
        .get_treatment_by_id(&new_appointment.treatment_id)?
        .ok_or(ServiceError::NotFound)?;
    warn_on_duration_mismatch(&treatment, new_appointment.duration_minutes());

    ensure_slot_free(
        repo,
        &new_appointment.employee_id,
        new_appointment.date,
        new_appointment.start,
        new_appointment.end,
        None,
    )?;

    let id = repo.create_appointment(new_appointment)?;
    info!(
        "booked {} for {} on {} at {}",
        treatment.name, new_appointment.employee_id, new_appointment.date, new_appointment.start
    );
    Ok(id)
}

/// Books from the dialog, filling end time and price from the treatment.
pub fn create_appointment<R>(repo: &R, request: AppointmentRequest) -> ServiceResult<AppointmentId>
where
    R: AppointmentReader + AppointmentWriter + TreatmentReader + ?Sized,
{
    let treatment = repo
        .get_treatment_by_id(&request.treatment_id)?
        .ok_or(ServiceError::NotFound)?;

    let end = match request.end {
        Some(end) => end,
        None => request.start.plus_minutes(treatment.duration_minutes)?,
    };
    let price = request.price.unwrap_or(treatment.price);

    let new_appointment = NewAppointment::new(
        request.client_id,
        request.employee_id,
        request.date,
        request.start,
        end,
        request.treatment_id,
        request.notes,
        price,
    )?;

    book_appointment(repo, &new_appointment)
}

/// Moves an appointment to a new slot, possibly with another employee.
pub fn reschedule_appointment<R>(
    repo: &R,
    id: &AppointmentId,
    employee_id: EmployeeId,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
) -> ServiceResult<Appointment>
where
    R: AppointmentReader + AppointmentWriter + TreatmentReader + ?Sized,
{
    let appointment = repo.get_appointment_by_id(id)?.ok_or(ServiceError::NotFound)?;
    if appointment.is_cancelled() {
        return Err(ServiceError::Conflict("appointment is cancelled".to_string()));
    }
    if end <= start {
        return Err(ServiceError::TypeConstraint(
            "end time must be after start time".to_string(),
        ));
    }

    ensure_slot_free(repo, &employee_id, date, start, end, Some(id))?;

    if let Some(treatment) = repo.get_treatment_by_id(&appointment.treatment_id)? {
        warn_on_duration_mismatch(&treatment, end.minutes_since_midnight() - start.minutes_since_midnight());
    }

    let updated = Appointment {
        employee_id,
        date,
        start,
        end,
        ..appointment
    };
    repo.update_appointment(id, &updated)?;
    Ok(updated)
}

/// Marks the appointment as done and records the visit on the client.
pub fn complete_appointment<R>(repo: &R, id: &AppointmentId, at: NaiveDateTime) -> ServiceResult<Appointment>
where
    R: AppointmentReader + AppointmentWriter + ClientWriter + ?Sized,
{
    let appointment = repo.get_appointment_by_id(id)?.ok_or(ServiceError::NotFound)?;
    if appointment.is_cancelled() {
        return Err(ServiceError::Conflict("appointment is cancelled".to_string()));
    }

    let completed = Appointment {
        status: AppointmentStatus::Completed,
        ..appointment
    };
    repo.update_appointment(id, &completed)?;
    repo.touch_client_last_visit(&completed.client_id, at)?;
    Ok(completed)
}

/// Soft-deletes the appointment.
pub fn cancel_appointment<R>(repo: &R, id: &AppointmentId) -> ServiceResult<()>
where
    R: AppointmentWriter + ?Sized,
{
    repo.delete_appointment(id).map_err(ServiceError::from)
}
