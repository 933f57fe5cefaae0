use chrono::NaiveDate;
use thermalya::domain::appointment::{AppointmentStatus, NewAppointment};
use thermalya::domain::client::NewClient;
use thermalya::domain::employee::NewEmployee;
use thermalya::domain::product::{NewProduct, ProductCategory};
use thermalya::domain::transaction::{PaymentMethod, TransactionKind};
use thermalya::domain::treatment::{NewTreatment, TreatmentCategory};
use thermalya::domain::types::{ClientId, EmployeeId, ItemName, TimeOfDay, TreatmentId};
use thermalya::repository::{
    ClientReader, ClientWriter, DieselRepository, EmployeeWriter, ProductWriter, TreatmentWriter,
};
use thermalya::services::ServiceError;
use thermalya::services::appointment::{
    book_appointment, cancel_appointment, complete_appointment, reschedule_appointment,
};
use thermalya::services::ledger::{
    ProductSale, client_history, client_transactions, record_product_sale,
    record_treatment_payment,
};

mod common;

struct Salon {
    client: ClientId,
    employee: EmployeeId,
    treatment: TreatmentId,
}

fn open_salon(repo: &DieselRepository) -> Salon {
    let client = repo
        .create_client(&NewClient::try_new("Maria", "Rossi", "3331234567", "", "").unwrap())
        .unwrap();
    let employee = repo
        .create_employee(
            &NewEmployee::try_new("sara@thermalya.it", "Sara", "Bianchi", "dipendente", "#00CED1")
                .unwrap(),
        )
        .unwrap();
    let treatment = repo
        .create_treatment(
            &NewTreatment::new(
                ItemName::new("Semipermanente Mani").unwrap(),
                TreatmentCategory::Nails,
                60,
                25.0,
                "",
            )
            .unwrap(),
        )
        .unwrap();
    Salon {
        client,
        employee,
        treatment,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn slot(salon: &Salon, start: &str, end: &str) -> NewAppointment {
    NewAppointment::new(
        salon.client.clone(),
        salon.employee.clone(),
        day(),
        start.parse::<TimeOfDay>().unwrap(),
        end.parse::<TimeOfDay>().unwrap(),
        salon.treatment.clone(),
        "",
        25.0,
    )
    .unwrap()
}

#[test]
fn test_overlapping_bookings_are_refused_until_cancelled() {
    let test_db = common::TestDb::new("test_overlapping_bookings.db");
    let repo = test_db.repo();
    let salon = open_salon(&repo);

    let first = book_appointment(&repo, &slot(&salon, "10:00", "11:00")).unwrap();
    assert!(matches!(
        book_appointment(&repo, &slot(&salon, "10:30", "11:30")),
        Err(ServiceError::Conflict(_))
    ));
    // Touching end and start do not overlap.
    book_appointment(&repo, &slot(&salon, "11:00", "12:00")).unwrap();

    cancel_appointment(&repo, &first).unwrap();
    book_appointment(&repo, &slot(&salon, "10:00", "11:00")).unwrap();
}

#[test]
fn test_reschedule_ignores_the_moved_appointment() {
    let test_db = common::TestDb::new("test_reschedule_ignores_the_moved_appointment.db");
    let repo = test_db.repo();
    let salon = open_salon(&repo);

    let id = book_appointment(&repo, &slot(&salon, "09:00", "10:00")).unwrap();
    book_appointment(&repo, &slot(&salon, "11:00", "12:00")).unwrap();

    let moved = reschedule_appointment(
        &repo,
        &id,
        salon.employee.clone(),
        day(),
        "09:30".parse().unwrap(),
        "10:30".parse().unwrap(),
    )
    .unwrap();
    assert_eq!(moved.start.to_string(), "09:30");

    assert!(matches!(
        reschedule_appointment(
            &repo,
            &id,
            salon.employee.clone(),
            day(),
            "10:45".parse().unwrap(),
            "11:45".parse().unwrap(),
        ),
        Err(ServiceError::Conflict(_))
    ));
}

#[test]
fn test_completing_and_charging_an_appointment() {
    let test_db = common::TestDb::new("test_completing_and_charging.db");
    let repo = test_db.repo();
    let salon = open_salon(&repo);
    let at = day().and_hms_opt(11, 5, 0).unwrap();

    let id = book_appointment(&repo, &slot(&salon, "10:00", "11:00")).unwrap();
    let completed = complete_appointment(&repo, &id, at).unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);
    assert_eq!(
        repo.get_client_by_id(&salon.client).unwrap().unwrap().last_visit,
        Some(at)
    );

    record_treatment_payment(&repo, &id, PaymentMethod::Cash, at).unwrap();

    let ledger = client_transactions(&repo, &salon.client).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, TransactionKind::Appointment);
    assert_eq!(ledger[0].appointment_id.as_ref(), Some(&id));
    assert_eq!(ledger[0].amount, 25.0);

    let history = client_history(&repo, &salon.client).unwrap();
    assert_eq!(history.performed_treatments.len(), 1);
    assert_eq!(history.performed_treatments[0].employee_name, "Sara Bianchi");
    assert_eq!(history.performed_treatments[0].treatment_name, "Semipermanente Mani");
}

#[test]
fn test_product_sales_accumulate_in_history() {
    let test_db = common::TestDb::new("test_product_sales_accumulate.db");
    let repo = test_db.repo();
    let salon = open_salon(&repo);
    let product = repo
        .create_product(
            &NewProduct::new(
                ItemName::new("Smalto OPI Red").unwrap(),
                ProductCategory::Polish,
                12.0,
                "",
            )
            .unwrap(),
        )
        .unwrap();

    for (quantity, hour) in [(1, 10), (2, 12)] {
        record_product_sale(
            &repo,
            &ProductSale {
                client_id: salon.client.clone(),
                employee_id: salon.employee.clone(),
                product_id: product.clone(),
                quantity,
                payment_method: PaymentMethod::Card,
                at: day().and_hms_opt(hour, 0, 0).unwrap(),
            },
        )
        .unwrap();
    }

    let ledger = client_transactions(&repo, &salon.client).unwrap();
    assert_eq!(ledger[0].description, "Smalto OPI Red x2");
    assert_eq!(ledger[0].amount, 24.0);
    assert_eq!(ledger[1].description, "Smalto OPI Red");

    let history = client_history(&repo, &salon.client).unwrap();
    assert_eq!(history.purchased_products.len(), 2);
    assert_eq!(history.total_spent(), 36.0);
}
