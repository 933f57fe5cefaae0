//! Repository implementation for calendar appointments.
//!
//! Appointments are never removed: deleting one sets its status to
//! `cancellato`, and every list query excludes cancelled rows.

use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;

use crate::{
    domain::{
        appointment::{Appointment, AppointmentStatus, NewAppointment},
        types::{AppointmentId, ClientId, EmployeeId},
    },
    models::appointment::{
        Appointment as DbAppointment, AppointmentChanges, NewAppointment as DbNewAppointment,
    },
    repository::{
        AppointmentRangeQuery, AppointmentReader, AppointmentWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult, require_affected},
    },
};

const CANCELLED: &str = AppointmentStatus::Cancelled.as_str();

fn into_domain(rows: Vec<DbAppointment>) -> RepositoryResult<Vec<Appointment>> {
    rows.into_iter()
        .map(|row| Appointment::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl AppointmentReader for DieselRepository {
    fn get_appointment_by_id(&self, id: &AppointmentId) -> RepositoryResult<Option<Appointment>> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let db_appointment = appuntamenti::table
            .find(id.as_str())
            .first::<DbAppointment>(&mut conn)
            .optional()?;

        db_appointment
            .map(Appointment::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_appointments(&self) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let rows = appuntamenti::table
            .filter(appuntamenti::status.ne(CANCELLED))
            .order((appuntamenti::date.asc(), appuntamenti::start_time.asc()))
            .load::<DbAppointment>(&mut conn)?;

        into_domain(rows)
    }

    fn list_appointments_in_range(
        &self,
        query: &AppointmentRangeQuery,
    ) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let mut items = appuntamenti::table
            .filter(appuntamenti::date.ge(query.range.start))
            .filter(appuntamenti::date.le(query.range.end))
            .filter(appuntamenti::status.ne(CANCELLED))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(employee_ids) = query.employee_ids.as_ref().filter(|ids| !ids.is_empty()) {
            let ids: Vec<&str> = employee_ids.iter().map(EmployeeId::as_str).collect();
            items = items.filter(appuntamenti::employee_id.eq_any(ids));
        }

        let rows = items
            .order((appuntamenti::date.asc(), appuntamenti::start_time.asc()))
            .load::<DbAppointment>(&mut conn)?;

        into_domain(rows)
    }

    fn list_employee_day_appointments(
        &self,
        employee_id: &EmployeeId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let rows = appuntamenti::table
            .filter(appuntamenti::employee_id.eq(employee_id.as_str()))
            .filter(appuntamenti::date.eq(date))
            .filter(appuntamenti::status.ne(CANCELLED))
            .order(appuntamenti::start_time.asc())
            .load::<DbAppointment>(&mut conn)?;

        into_domain(rows)
    }

    fn list_client_appointments(&self, client_id: &ClientId) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let rows = appuntamenti::table
            .filter(appuntamenti::client_id.eq(client_id.as_str()))
            .filter(appuntamenti::status.ne(CANCELLED))
            .order((appuntamenti::date.asc(), appuntamenti::start_time.asc()))
            .load::<DbAppointment>(&mut conn)?;

        into_domain(rows)
    }
}

impl AppointmentWriter for DieselRepository {
    fn create_appointment(
        &self,
        new_appointment: &NewAppointment,
    ) -> RepositoryResult<AppointmentId> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let id = AppointmentId::generate();
        diesel::insert_into(appuntamenti::table)
            .values(&DbNewAppointment::new(&id, new_appointment))
            .execute(&mut conn)?;

        debug!(
            "created appointment {id} on {} {}-{}",
            new_appointment.date, new_appointment.start, new_appointment.end
        );
        Ok(id)
    }

    fn update_appointment(
        &self,
        id: &AppointmentId,
        appointment: &Appointment,
    ) -> RepositoryResult<()> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let affected = diesel::update(appuntamenti::table.find(id.as_str()))
            .set(&AppointmentChanges::from(appointment))
            .execute(&mut conn)?;

        require_affected(affected)
    }

    fn delete_appointment(&self, id: &AppointmentId) -> RepositoryResult<()> {
        use crate::schema::appuntamenti;

        let mut conn = self.conn()?;

        let affected = diesel::update(appuntamenti::table.find(id.as_str()))
            .set(appuntamenti::status.eq(CANCELLED))
            .execute(&mut conn)?;

        require_affected(affected)?;
        debug!("cancelled appointment {id}");
        Ok(())
    }
}
