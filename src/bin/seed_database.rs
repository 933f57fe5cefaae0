//! One-shot initializer that fills a fresh salon database with demo data.

use std::env;

use chrono::{Days, Local, NaiveDate};
use config::Config;
use dotenvy::dotenv;

use thermalya::auth::{IdentityProvider, PasswordIdentity};
use thermalya::db::{establish_connection_pool, run_migrations};
use thermalya::domain::{
    appointment::NewAppointment,
    calendar::week_start,
    client::NewClient,
    employee::NewEmployee,
    product::{NewProduct, ProductCategory},
    treatment::{NewTreatment, TreatmentCategory},
    types::{ClientId, EmployeeId, ItemName, TimeOfDay, TreatmentId, TypeConstraintError},
};
use thermalya::models::config::AppConfig;
use thermalya::repository::{
    ClientWriter, DieselRepository, EmployeeReader, EmployeeWriter, ProductWriter,
    TreatmentWriter,
};
use thermalya::services::appointment::book_appointment;

const EMPLOYEES: &[(&str, &str, &str, &str, &str)] = &[
    ("valentina@thermalya.it", "Valentina", "Rossi", "dipendente", "#FF69B4"),
    ("sara@thermalya.it", "Sara", "Bianchi", "dipendente", "#00CED1"),
    ("silvia@thermalya.it", "Silvia", "Verdi", "dipendente", "#FFD700"),
    ("admin@thermalya.it", "Admin", "Thermalya", "admin", "#9B6BA8"),
];

const CLIENTS: &[(&str, &str, &str, &str, &str)] = &[
    ("Maria", "Rossi", "3331234567", "maria.rossi@email.it", "Preferisce colori naturali"),
    ("Giulia", "Bianchi", "3339876543", "giulia.bianchi@email.it", ""),
    ("Anna", "Verdi", "3345678901", "anna.verdi@email.it", "Pelle sensibile"),
    ("Laura", "Neri", "3351234789", "laura.neri@email.it", ""),
    ("Sofia", "Ferrari", "3367890123", "sofia.ferrari@email.it", "Allergica al lattice"),
];

const TREATMENTS: &[(&str, TreatmentCategory, u32, f64)] = &[
    ("Semipermanente Mani", TreatmentCategory::Nails, 60, 25.0),
    ("Semipermanente Piedi", TreatmentCategory::Nails, 75, 30.0),
    ("Ricostruzione Unghie", TreatmentCategory::Nails, 120, 45.0),
    ("Manicure Classica", TreatmentCategory::Nails, 30, 15.0),
    ("Massaggio Rilassante", TreatmentCategory::Massage, 50, 40.0),
    ("Massaggio Viso", TreatmentCategory::Massage, 30, 25.0),
    ("Pulizia Viso", TreatmentCategory::Face, 60, 35.0),
    ("Trattamento Anti-Age", TreatmentCategory::Face, 75, 50.0),
    ("Ceretta Gambe Complete", TreatmentCategory::HairRemoval, 45, 25.0),
    ("Ceretta Inguine Totale", TreatmentCategory::HairRemoval, 30, 20.0),
];

const PRODUCTS: &[(&str, ProductCategory, f64)] = &[
    ("Smalto OPI Red", ProductCategory::Polish, 12.0),
    ("Smalto Essie Nude", ProductCategory::Polish, 10.0),
    ("Gel UV Builder Clear", ProductCategory::Gel, 18.0),
    ("Gel Polish Rosa Antico", ProductCategory::Gel, 15.0),
    ("Crema Idratante Viso", ProductCategory::FaceCream, 25.0),
    ("Siero Anti-Age", ProductCategory::FaceCream, 35.0),
    ("Lima Professionale", ProductCategory::Accessories, 5.0),
    ("Kit Manicure Completo", ProductCategory::Accessories, 20.0),
];

/// (employee, client, treatment, day offset from Monday, start) by index.
const APPOINTMENTS: &[(usize, usize, usize, u64, &str)] = &[
    (0, 0, 0, 0, "09:00"),
    (0, 1, 1, 0, "10:30"),
    (1, 2, 4, 0, "09:00"),
    (1, 3, 6, 1, "14:00"),
    (2, 4, 8, 1, "11:00"),
    (0, 3, 2, 2, "15:00"),
    (2, 0, 7, 3, "10:00"),
    (1, 1, 9, 4, "16:30"),
];

#[derive(Default)]
struct Tally {
    created: usize,
    failed: usize,
}

impl Tally {
    fn record<T, E: std::fmt::Display>(&mut self, what: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => {
                self.created += 1;
                Some(value)
            }
            Err(e) => {
                log::error!("Failed to create {what}: {e}");
                self.failed += 1;
                None
            }
        }
    }

    fn report(&self, family: &str) {
        log::info!("{family}: {} created, {} failed", self.created, self.failed);
    }
}

fn seed_employees(repo: &DieselRepository, password: &str) -> Vec<EmployeeId> {
    let identity = PasswordIdentity::new(repo.clone());
    let mut tally = Tally::default();
    let mut ids = Vec::new();

    for (email, name, surname, role, color) in EMPLOYEES {
        let created = NewEmployee::try_new(*email, *name, *surname, role, *color)
            .map_err(|e| e.to_string())
            .and_then(|employee| repo.create_employee(&employee).map_err(|e| e.to_string()))
            .and_then(|id| {
                identity
                    .sign_up(email, password)
                    .map(|_| id)
                    .map_err(|e| e.to_string())
            });
        if let Some(id) = tally.record(email, created) {
            ids.push(id);
        }
    }
    identity.sign_out();

    tally.report("employees");
    ids
}

fn seed_clients(repo: &DieselRepository) -> Vec<ClientId> {
    let mut tally = Tally::default();
    let mut ids = Vec::new();

    for (name, surname, phone, email, notes) in CLIENTS {
        let created = NewClient::try_new(*name, *surname, *phone, *email, *notes)
            .map_err(|e| e.to_string())
            .and_then(|client| repo.create_client(&client).map_err(|e| e.to_string()));
        if let Some(id) = tally.record(name, created) {
            ids.push(id);
        }
    }

    tally.report("clients");
    ids
}

fn seed_treatments(repo: &DieselRepository) -> Vec<TreatmentId> {
    let mut tally = Tally::default();
    let mut ids = Vec::new();

    for (name, category, duration, price) in TREATMENTS {
        let created = ItemName::new(*name)
            .and_then(|name| NewTreatment::new(name, *category, *duration, *price, ""))
            .map_err(|e| e.to_string())
            .and_then(|treatment| repo.create_treatment(&treatment).map_err(|e| e.to_string()));
        if let Some(id) = tally.record(name, created) {
            ids.push(id);
        }
    }

    tally.report("treatments");
    ids
}

fn seed_products(repo: &DieselRepository) {
    let mut tally = Tally::default();

    for (name, category, price) in PRODUCTS {
        let created = ItemName::new(*name)
            .and_then(|name| NewProduct::new(name, *category, *price, ""))
            .map_err(|e| e.to_string())
            .and_then(|product| repo.create_product(&product).map_err(|e| e.to_string()));
        tally.record(name, created);
    }

    tally.report("products");
}

fn seed_appointments(
    repo: &DieselRepository,
    monday: NaiveDate,
    employees: &[EmployeeId],
    clients: &[ClientId],
    treatments: &[TreatmentId],
) {
    let mut tally = Tally::default();

    for (employee, client, treatment, offset, start) in APPOINTMENTS {
        let (Some(employee_id), Some(client_id), Some(treatment_id)) = (
            employees.get(*employee),
            clients.get(*client),
            treatments.get(*treatment),
        ) else {
            log::warn!("Skipping appointment at {start}: referenced seed data is missing");
            continue;
        };
        let (duration, price) = (TREATMENTS[*treatment].2, TREATMENTS[*treatment].3);

        let created = start
            .parse::<TimeOfDay>()
            .and_then(|start| start.plus_minutes(duration).map(|end| (start, end)))
            .and_then(|(start, end)| {
                NewAppointment::new(
                    client_id.clone(),
                    employee_id.clone(),
                    monday + Days::new(*offset),
                    start,
                    end,
                    treatment_id.clone(),
                    "",
                    price,
                )
            })
            .map_err(|e: TypeConstraintError| e.to_string())
            .and_then(|new| book_appointment(repo, &new).map_err(|e| e.to_string()));
        tally.record(start, created);
    }

    tally.report("appointments");
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {}", err);
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    match repo.list_employees() {
        Ok(existing) if !existing.is_empty() => {
            log::info!(
                "Database already has {} employees, nothing to seed",
                existing.len()
            );
            return;
        }
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to read employees: {e}");
            std::process::exit(1);
        }
    }

    log::info!("Seeding {}", app_config.database_url);
    let employees = seed_employees(&repo, &app_config.seed_password);
    let clients = seed_clients(&repo);
    let treatments = seed_treatments(&repo);
    seed_products(&repo);

    if app_config.seed_appointments {
        let monday = week_start(Local::now().date_naive());
        seed_appointments(&repo, monday, &employees, &clients, &treatments);
    }

    log::info!("Seeding complete");
}
