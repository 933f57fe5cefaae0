//! Multi-employee appointment calendar.
//!
//! Week views cover the Monday-anchored seven-day window; the day view covers
//! the selected date only. Any change to the view mode, the dates or the
//! employee selection reloads the appointments.

use std::collections::BTreeSet;

use chrono::{Days, Local, NaiveDate};
use log::{debug, error};
use tokio::sync::watch;

use crate::controllers::StateStore;
use crate::domain::appointment::Appointment;
use crate::domain::calendar::{self, DateRange, ViewMode};
use crate::domain::client::Client;
use crate::domain::employee::Employee;
use crate::domain::treatment::Treatment;
use crate::domain::types::{AppointmentId, EmployeeId};
use crate::forms::appointment::AppointmentForm;
use crate::repository::{
    AppointmentRangeQuery, AppointmentReader, AppointmentWriter, ClientReader, EmployeeReader,
    TreatmentReader,
};
use crate::services::appointment as appointment_service;

#[derive(Clone, Debug, PartialEq)]
pub struct CalendarState {
    pub view_mode: ViewMode,
    pub selected_date: NaiveDate,
    /// Always the Monday of the displayed week.
    pub selected_week_start: NaiveDate,
    pub employees: Vec<Employee>,
    pub selected_employees: BTreeSet<EmployeeId>,
    pub appointments: Vec<Appointment>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub show_new_appointment_dialog: bool,
    pub show_detail_dialog: bool,
    pub selected_appointment: Option<Appointment>,
    pub selected_client: Option<Client>,
    pub selected_treatment: Option<Treatment>,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view_mode: ViewMode::default(),
            selected_date: today,
            selected_week_start: calendar::week_start(today),
            employees: Vec::new(),
            selected_employees: BTreeSet::new(),
            appointments: Vec::new(),
            is_loading: false,
            error_message: None,
            show_new_appointment_dialog: false,
            show_detail_dialog: false,
            selected_appointment: None,
            selected_client: None,
            selected_treatment: None,
        }
    }

    /// Dates queried for the current view.
    pub fn visible_range(&self) -> DateRange {
        calendar::visible_range(self.view_mode, self.selected_date, self.selected_week_start)
    }

    /// Day columns rendered for the current view.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        calendar::visible_days(self.view_mode, self.selected_date, self.selected_week_start)
    }

    pub fn appointments_in_slot(&self, date: NaiveDate, hour: u32) -> Vec<&Appointment> {
        calendar::appointments_in_slot(&self.appointments, date, hour)
    }

    fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.selected_week_start = calendar::week_start(date);
    }

    fn close_detail(&mut self) {
        self.show_detail_dialog = false;
        self.selected_appointment = None;
        self.selected_client = None;
        self.selected_treatment = None;
    }
}

pub struct CalendarController<R> {
    repo: R,
    state: StateStore<CalendarState>,
}

impl<R> CalendarController<R>
where
    R: EmployeeReader + AppointmentReader + AppointmentWriter + ClientReader + TreatmentReader,
{
    /// Opens the calendar on today's week.
    pub fn new(repo: R) -> Self {
        Self::starting_at(repo, Local::now().date_naive())
    }

    /// Opens the calendar on the week containing `date`.
    pub fn starting_at(repo: R, date: NaiveDate) -> Self {
        let mut controller = Self {
            repo,
            state: StateStore::new(CalendarState::new(date)),
        };
        controller.load_employees();
        controller
    }

    pub fn subscribe(&self) -> watch::Receiver<CalendarState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> CalendarState {
        self.state.snapshot()
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.state.snapshot().visible_days()
    }

    pub fn appointments_in_slot(&self, date: NaiveDate, hour: u32) -> Vec<Appointment> {
        self.state
            .snapshot()
            .appointments_in_slot(date, hour)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Loads the roster, selects its first employee and loads appointments.
    pub fn load_employees(&mut self) {
        self.state.update(|s| s.is_loading = true);

        match self.repo.list_employees() {
            Ok(employees) => {
                debug!("calendar roster: {} employees", employees.len());
                self.state.update(|s| {
                    s.selected_employees = employees.first().map(|e| e.id.clone()).into_iter().collect();
                    s.employees = employees;
                    s.is_loading = false;
                });
                self.load_appointments();
            }
            Err(err) => {
                error!("failed to load employees: {err}");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.error_message = Some(format!("Errore caricamento dipendenti: {err}"));
                });
            }
        }
    }

    /// Reloads the appointments of the visible range for the selected
    /// employees, or for everyone when nobody is selected.
    pub fn load_appointments(&mut self) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        let current = self.state.snapshot();
        let query = AppointmentRangeQuery::from(current.visible_range())
            .employees(current.selected_employees.iter().cloned());

        match self.repo.list_appointments_in_range(&query) {
            Ok(appointments) => {
                debug!(
                    "loaded {} appointments for {}..={}",
                    appointments.len(),
                    query.range.start,
                    query.range.end
                );
                self.state.update(|s| {
                    s.appointments = appointments;
                    s.is_loading = false;
                });
            }
            Err(err) => {
                error!("failed to load appointments: {err}");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.error_message = Some(format!("Errore: {err}"));
                });
            }
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.update(|s| s.view_mode = mode);
        self.load_appointments();
    }

    pub fn toggle_employee(&mut self, id: &EmployeeId) {
        self.state.update(|s| {
            if !s.selected_employees.remove(id) {
                s.selected_employees.insert(id.clone());
            }
        });
        self.load_appointments();
    }

    pub fn select_all_employees(&mut self) {
        self.state.update(|s| {
            s.selected_employees = s.employees.iter().map(|e| e.id.clone()).collect();
        });
        self.load_appointments();
    }

    pub fn deselect_all_employees(&mut self) {
        self.state.update(|s| s.selected_employees.clear());
        self.load_appointments();
    }

    pub fn go_to_previous_week(&mut self) {
        self.shift_week(|d| d.checked_sub_days(Days::new(7)));
    }

    pub fn go_to_next_week(&mut self) {
        self.shift_week(|d| d.checked_add_days(Days::new(7)));
    }

    fn shift_week(&mut self, shift: impl Fn(NaiveDate) -> Option<NaiveDate>) {
        self.state.update(|s| {
            if let (Some(week), Some(date)) = (shift(s.selected_week_start), shift(s.selected_date)) {
                s.selected_week_start = week;
                s.selected_date = date;
            }
        });
        self.load_appointments();
    }

    pub fn go_to_previous_day(&mut self) {
        if let Some(date) = self.state.snapshot().selected_date.pred_opt() {
            self.select_date(date);
        }
    }

    pub fn go_to_next_day(&mut self) {
        if let Some(date) = self.state.snapshot().selected_date.succ_opt() {
            self.select_date(date);
        }
    }

    pub fn go_to_today(&mut self) {
        self.select_date(Local::now().date_naive());
    }

    /// Selects `date` and re-anchors the week on its Monday.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.update(|s| s.select_date(date));
        self.load_appointments();
    }

    pub fn show_new_appointment_dialog(&mut self) {
        self.state.update(|s| s.show_new_appointment_dialog = true);
    }

    pub fn hide_new_appointment_dialog(&mut self) {
        self.state.update(|s| s.show_new_appointment_dialog = false);
    }

    /// Books the dialog contents; returns whether the booking was stored.
    pub fn create_appointment(&mut self, form: AppointmentForm) -> bool {
        let request = match form.parse() {
            Ok(request) => request,
            Err(err) => {
                self.state.update(|s| s.error_message = Some(err.to_string()));
                return false;
            }
        };

        self.state.update(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        match appointment_service::create_appointment(&self.repo, request) {
            Ok(id) => {
                debug!("appointment created: {id}");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.show_new_appointment_dialog = false;
                });
                self.load_appointments();
                true
            }
            Err(err) => {
                error!("failed to create appointment: {err}");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.error_message = Some(format!("Errore creazione: {err}"));
                });
                false
            }
        }
    }

    /// Opens the detail dialog, then resolves client and treatment one at a time.
    pub fn select_appointment(&mut self, appointment: Appointment) {
        let client_id = appointment.client_id.clone();
        let treatment_id = appointment.treatment_id.clone();

        self.state.update(|s| {
            s.selected_appointment = Some(appointment);
            s.selected_client = None;
            s.selected_treatment = None;
            s.show_detail_dialog = true;
        });

        match self.repo.get_client_by_id(&client_id) {
            Ok(client) => self.state.update(|s| s.selected_client = client),
            Err(err) => error!("failed to load client {client_id}: {err}"),
        }

        match self.repo.get_treatment_by_id(&treatment_id) {
            Ok(treatment) => self.state.update(|s| s.selected_treatment = treatment),
            Err(err) => error!("failed to load treatment {treatment_id}: {err}"),
        }
    }

    pub fn hide_detail_dialog(&mut self) {
        self.state.update(CalendarState::close_detail);
    }

    /// Cancels the appointment; the detail dialog stays open on failure.
    pub fn delete_appointment(&mut self, id: &AppointmentId) {
        match appointment_service::cancel_appointment(&self.repo, id) {
            Ok(()) => {
                self.state.update(CalendarState::close_detail);
                self.load_appointments();
            }
            Err(err) => {
                error!("failed to cancel appointment {id}: {err}");
                self.state
                    .update(|s| s.error_message = Some(format!("Errore eliminazione: {err}")));
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.state.update(|s| s.error_message = None);
    }
}
