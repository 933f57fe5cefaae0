use chrono::NaiveDate;
use thermalya::controllers::calendar::CalendarController;
use thermalya::controllers::clients::ClientListController;
use thermalya::controllers::login::LoginController;
use thermalya::domain::calendar::ViewMode;
use thermalya::domain::employee::NewEmployee;
use thermalya::domain::treatment::{NewTreatment, TreatmentCategory};
use thermalya::domain::types::ItemName;
use thermalya::forms::appointment::AppointmentForm;
use thermalya::forms::client::ClientForm;
use thermalya::repository::{EmployeeWriter, TreatmentWriter};

mod common;

fn client_form(name: &str, surname: &str, phone: &str) -> ClientForm {
    ClientForm {
        name: name.into(),
        surname: surname.into(),
        phone: phone.into(),
        ..ClientForm::default()
    }
}

#[test]
fn test_client_list_round_trip() {
    let test_db = common::TestDb::new("test_client_list_round_trip.db");
    let mut controller = ClientListController::new(test_db.repo());
    assert!(controller.state().clients.is_empty());

    controller.show_add_dialog();
    controller.add_client(client_form("Maria", "Rossi", "3331234567"));
    controller.add_client(client_form("Sofia", "Ferrari", "3367890123"));
    let state = controller.state();
    assert!(!state.show_add_dialog);
    assert_eq!(state.clients.len(), 2);

    controller.on_search_query_changed("R");
    assert_eq!(controller.state().clients.len(), 2);
    controller.on_search_query_changed("Ro");
    let found = controller.state().clients;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].full_name(), "Maria Rossi");

    let maria = found[0].clone();
    controller.show_delete_dialog(maria.clone());
    controller.delete_client(&maria.id);
    controller.on_search_query_changed("");
    let state = controller.state();
    assert!(!state.show_delete_dialog);
    assert_eq!(state.clients.len(), 1);
    assert_eq!(state.clients[0].full_name(), "Sofia Ferrari");
}

#[test]
fn test_login_picks_the_first_employee_from_the_database() {
    let test_db = common::TestDb::new("test_login_picks_the_first_employee.db");
    let repo = test_db.repo();

    let mut empty = LoginController::new(repo.clone());
    assert_eq!(
        empty.state().error_message.as_deref(),
        Some("Nessuna dipendente trovata nel database")
    );

    repo.create_employee(
        &NewEmployee::try_new("sara@thermalya.it", "Sara", "Bianchi", "dipendente", "#00CED1")
            .unwrap(),
    )
    .unwrap();
    empty.load_employees();
    let state = empty.state();
    assert_eq!(state.employees.len(), 1);
    assert_eq!(
        state.selected_employee.map(|e| e.full_name()).as_deref(),
        Some("Sara Bianchi")
    );

    empty.set_password("thermalya");
    assert!(empty.login());
}

#[test]
fn test_calendar_books_and_cancels_through_the_store() {
    let test_db = common::TestDb::new("test_calendar_books_and_cancels.db");
    let repo = test_db.repo();
    let sara = repo
        .create_employee(
            &NewEmployee::try_new("sara@thermalya.it", "Sara", "Bianchi", "dipendente", "#00CED1")
                .unwrap(),
        )
        .unwrap();
    let treatment = repo
        .create_treatment(
            &NewTreatment::new(
                ItemName::new("Manicure Classica").unwrap(),
                TreatmentCategory::Nails,
                30,
                15.0,
                "",
            )
            .unwrap(),
        )
        .unwrap();
    let mut clients = ClientListController::new(repo.clone());
    clients.add_client(client_form("Maria", "Rossi", "3331234567"));
    let maria = clients.state().clients[0].clone();

    // Wednesday; the week starts on Monday 2025-03-10.
    let wednesday = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    let mut calendar = CalendarController::starting_at(repo.clone(), wednesday);
    assert!(calendar.state().selected_employees.contains(&sara));

    calendar.show_new_appointment_dialog();
    let booked = calendar.create_appointment(AppointmentForm {
        client_id: maria.id.to_string(),
        employee_id: sara.to_string(),
        treatment_id: treatment.to_string(),
        date: wednesday,
        start_time: "09:30".into(),
        end_time: String::new(),
        notes: String::new(),
        price: None,
    });
    assert!(booked);

    let state = calendar.state();
    assert!(!state.show_new_appointment_dialog);
    assert_eq!(state.appointments.len(), 1);
    let appointment = state.appointments[0].clone();
    assert_eq!(appointment.end.to_string(), "10:00");
    assert_eq!(appointment.price, 15.0);
    assert_eq!(calendar.appointments_in_slot(wednesday, 9).len(), 1);

    calendar.set_view_mode(ViewMode::DayMulti);
    calendar.go_to_previous_day();
    assert!(calendar.state().appointments.is_empty());
    calendar.go_to_next_day();
    assert_eq!(calendar.state().appointments.len(), 1);

    calendar.select_appointment(appointment.clone());
    let state = calendar.state();
    assert!(state.show_detail_dialog);
    assert_eq!(state.selected_client.map(|c| c.id), Some(maria.id));
    assert_eq!(state.selected_treatment.map(|t| t.id), Some(treatment));

    calendar.delete_appointment(&appointment.id);
    let state = calendar.state();
    assert!(!state.show_detail_dialog);
    assert!(state.appointments.is_empty());
    assert!(state.error_message.is_none());
}

#[test]
fn test_calendar_shows_everyone_when_no_employee_is_selected() {
    let test_db = common::TestDb::new("test_calendar_shows_everyone.db");
    let repo = test_db.repo();
    let sara = repo
        .create_employee(
            &NewEmployee::try_new("sara@thermalya.it", "Sara", "Bianchi", "dipendente", "#00CED1")
                .unwrap(),
        )
        .unwrap();
    let treatment = repo
        .create_treatment(
            &NewTreatment::new(
                ItemName::new("Pulizia Viso").unwrap(),
                TreatmentCategory::Face,
                60,
                35.0,
                "",
            )
            .unwrap(),
        )
        .unwrap();
    let mut clients = ClientListController::new(repo.clone());
    clients.add_client(client_form("Anna", "Verdi", "3345678901"));
    let anna = clients.state().clients[0].clone();

    let wednesday = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    let mut calendar = CalendarController::starting_at(repo.clone(), wednesday);
    calendar.show_new_appointment_dialog();
    assert!(calendar.create_appointment(AppointmentForm {
        client_id: anna.id.to_string(),
        employee_id: sara.to_string(),
        treatment_id: treatment.to_string(),
        date: wednesday,
        start_time: "14:00".into(),
        end_time: String::new(),
        notes: String::new(),
        price: None,
    }));
    assert_eq!(calendar.state().appointments.len(), 1);

    calendar.deselect_all_employees();
    let state = calendar.state();
    assert!(state.selected_employees.is_empty());
    assert_eq!(state.appointments.len(), 1);
    assert_eq!(state.appointments[0].employee_id, sara);

    calendar.toggle_employee(&sara);
    assert_eq!(calendar.state().appointments.len(), 1);
}
