//! Calendar arithmetic behind the appointment views.
//!
//! Weeks are anchored on their ISO Monday. Week views query the full seven
//! day window but only render Monday through Saturday; day views query a
//! single date. Timeline rows cover the working hours 08:00 to 20:00.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::appointment::Appointment;

/// First and last hour rendered on the timeline.
pub const WORKING_HOURS: std::ops::RangeInclusive<u32> = 8..=20;

/// Number of days rendered in a week view (Monday through Saturday).
pub const VISIBLE_WEEK_DAYS: u64 = 6;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// One employee, Monday to Saturday.
    #[default]
    WeekSingle,
    /// Several employees side by side, Monday to Saturday.
    WeekMulti,
    /// Several employees side by side, one day.
    DayMulti,
}

impl ViewMode {
    pub fn is_week(self) -> bool {
        matches!(self, ViewMode::WeekSingle | ViewMode::WeekMulti)
    }
}

/// Inclusive date window used for appointment range queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// The seven days starting at the Monday of `date`'s week.
    pub fn week_of(date: NaiveDate) -> Self {
        let start = week_start(date);
        Self::new(start, start + Days::new(6))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().number_from_monday() - 1);
    date - Days::new(offset)
}

/// Range queried for the given view.
pub fn visible_range(mode: ViewMode, selected_date: NaiveDate, week_start: NaiveDate) -> DateRange {
    if mode.is_week() {
        DateRange::new(week_start, week_start + Days::new(6))
    } else {
        DateRange::single_day(selected_date)
    }
}

/// Day columns rendered for the given view.
pub fn visible_days(mode: ViewMode, selected_date: NaiveDate, week_start: NaiveDate) -> Vec<NaiveDate> {
    if mode.is_week() {
        (0..VISIBLE_WEEK_DAYS)
            .map(|offset| week_start + Days::new(offset))
            .collect()
    } else {
        vec![selected_date]
    }
}

/// Appointments whose start falls inside the timeline row of `hour` on `date`.
pub fn appointments_in_slot(
    appointments: &[Appointment],
    date: NaiveDate,
    hour: u32,
) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|a| a.date == date && a.start.hour() == hour)
        .collect()
}
