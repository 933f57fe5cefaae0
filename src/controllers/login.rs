//! Login screen: roster picker plus a local password check.
//!
//! The check only confirms that an employee is picked and the password is
//! long enough. Real verification lives in [`crate::auth::IdentityProvider`].

use log::{debug, error};
use tokio::sync::watch;
use validator::Validate;

use crate::controllers::StateStore;
use crate::domain::employee::Employee;
use crate::forms::login::LoginForm;
use crate::repository::EmployeeReader;

#[derive(Clone, Debug, PartialEq)]
pub struct LoginState {
    pub employees: Vec<Employee>,
    pub selected_employee: Option<Employee>,
    pub password: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub login_success: bool,
    pub is_loading_employees: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            selected_employee: None,
            password: String::new(),
            is_loading: false,
            error_message: None,
            login_success: false,
            is_loading_employees: true,
        }
    }
}

pub struct LoginController<R> {
    repo: R,
    state: StateStore<LoginState>,
}

impl<R> LoginController<R>
where
    R: EmployeeReader,
{
    /// Builds the controller and loads the roster right away.
    pub fn new(repo: R) -> Self {
        let mut controller = Self {
            repo,
            state: StateStore::default(),
        };
        controller.load_employees();
        controller
    }

    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoginState {
        self.state.snapshot()
    }

    pub fn load_employees(&mut self) {
        self.state.update(|s| s.is_loading_employees = true);

        match self.repo.list_employees() {
            Ok(employees) => {
                debug!("loaded {} employees", employees.len());
                self.state.update(|s| {
                    s.selected_employee = employees.first().cloned();
                    s.error_message = employees
                        .is_empty()
                        .then(|| "Nessuna dipendente trovata nel database".to_string());
                    s.employees = employees;
                    s.is_loading_employees = false;
                });
            }
            Err(err) => {
                error!("failed to load employees: {err}");
                self.state.update(|s| {
                    s.is_loading_employees = false;
                    s.error_message = Some(format!("Errore di connessione: {err}"));
                });
            }
        }
    }

    pub fn select_employee(&mut self, employee: Employee) {
        self.state.update(|s| {
            s.selected_employee = Some(employee);
            s.error_message = None;
        });
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        let password = password.into();
        self.state.update(|s| s.password = password);
    }

    /// Returns whether the login was accepted.
    pub fn login(&mut self) -> bool {
        let current = self.state.snapshot();

        let Some(employee) = current.selected_employee else {
            self.fail("Seleziona una dipendente");
            return false;
        };
        if current.password.trim().is_empty() {
            self.fail("Inserisci la password");
            return false;
        }

        let form = LoginForm {
            email: employee.email.to_string(),
            password: current.password,
        };
        if let Err(err) = form.validate() {
            debug!("login form rejected: {err}");
            self.fail("Password troppo corta (min 6 caratteri)");
            return false;
        }

        self.state.update(|s| {
            s.is_loading = false;
            s.login_success = true;
            s.error_message = None;
        });
        debug!("{} logged in", employee.email);
        true
    }

    pub fn reset_error(&mut self) {
        self.state.update(|s| s.error_message = None);
    }

    fn fail(&self, message: &str) {
        self.state.update(|s| s.error_message = Some(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::employee::Role;
    use crate::domain::types::{EmployeeEmail, EmployeeId, HexColor, PersonName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: EmployeeId::new(id).unwrap(),
            email: EmployeeEmail::new(format!("{}@thermalya.it", name.to_lowercase())).unwrap(),
            name: PersonName::new(name).unwrap(),
            surname: PersonName::new("Rossi").unwrap(),
            role: Role::Employee,
            color: HexColor::default(),
            active: true,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("e1", "Valentina"),
            employee("e2", "Sara"),
            employee("e3", "Silvia"),
            employee("e4", "Admin"),
        ]
    }

    fn controller() -> LoginController<MockRepository> {
        let mut repo = MockRepository::new();
        repo.expect_list_employees().returning(|| Ok(roster()));
        LoginController::new(repo)
    }

    #[test]
    fn initial_state_is_loading_the_roster() {
        assert!(LoginState::default().is_loading_employees);
    }

    #[test]
    fn first_employee_is_selected_after_loading() {
        let controller = controller();
        let state = controller.state();
        assert_eq!(state.employees.len(), 4);
        assert_eq!(state.selected_employee.unwrap().id.as_str(), "e1");
        assert!(!state.is_loading_employees);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn empty_roster_reports_an_error() {
        let mut repo = MockRepository::new();
        repo.expect_list_employees().returning(|| Ok(Vec::new()));
        let state = LoginController::new(repo).state();
        assert!(state.selected_employee.is_none());
        assert!(state.error_message.is_some());
    }

    #[test]
    fn roster_failure_becomes_a_message() {
        let mut repo = MockRepository::new();
        repo.expect_list_employees()
            .returning(|| Err(RepositoryError::ConnectionError("offline".into())));
        let state = LoginController::new(repo).state();
        assert!(!state.is_loading_employees);
        assert!(state.error_message.unwrap().starts_with("Errore di connessione"));
    }

    #[test]
    fn short_password_is_rejected_locally() {
        let mut controller = controller();
        controller.set_password("12345");
        assert!(!controller.login());
        assert_eq!(
            controller.state().error_message.as_deref(),
            Some("Password troppo corta (min 6 caratteri)")
        );

        controller.reset_error();
        assert!(controller.state().error_message.is_none());
    }

    #[test]
    fn blank_password_is_rejected() {
        let mut controller = controller();
        controller.set_password("   ");
        assert!(!controller.login());
        assert_eq!(
            controller.state().error_message.as_deref(),
            Some("Inserisci la password")
        );
    }

    #[test]
    fn valid_login_succeeds_for_the_selected_employee() {
        let mut controller = controller();
        controller.select_employee(employee("e2", "Sara"));
        controller.set_password("password");
        assert!(controller.login());

        let state = controller.state();
        assert!(state.login_success);
        assert!(!state.is_loading);
        assert_eq!(state.selected_employee.unwrap().id.as_str(), "e2");
    }

    #[test]
    fn login_publishes_a_settled_snapshot() {
        let mut controller = controller();
        controller.set_password("password");
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());

        assert!(controller.login());
        assert!(rx.has_changed().unwrap());
        let published = rx.borrow_and_update().clone();
        assert!(published.login_success);
        assert!(!published.is_loading);
        assert!(published.error_message.is_none());
        assert!(!rx.has_changed().unwrap());
    }
}
