//! Repository implementation for salon staff.

use chrono::Utc;
use diesel::prelude::*;
use log::debug;

use crate::{
    domain::{
        employee::{Employee, NewEmployee, Role},
        types::{EmployeeEmail, EmployeeId},
    },
    models::employee::{Employee as DbEmployee, EmployeeChanges, NewEmployee as DbNewEmployee},
    repository::{
        DieselRepository, EmployeeReader, EmployeeWriter,
        errors::{RepositoryError, RepositoryResult, require_affected},
    },
};

impl EmployeeReader for DieselRepository {
    fn get_employee_by_id(&self, id: &EmployeeId) -> RepositoryResult<Option<Employee>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let db_employee = users::table
            .find(id.as_str())
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        db_employee
            .map(Employee::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_employee_by_email(&self, email: &EmployeeEmail) -> RepositoryResult<Option<Employee>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let db_employee = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        db_employee
            .map(Employee::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_employees(&self) -> RepositoryResult<Vec<Employee>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let bookable: Vec<&str> = Role::ALL
            .iter()
            .filter(|role| role.is_bookable())
            .map(|role| role.as_str())
            .collect();

        let db_employees = users::table
            .filter(users::active.eq(true))
            .filter(users::role.eq_any(bookable))
            .order((
                users::created_at.asc(),
                users::surname.asc(),
                users::name.asc(),
            ))
            .load::<DbEmployee>(&mut conn)?;

        db_employees
            .into_iter()
            .map(|db_employee| Employee::try_from(db_employee).map_err(RepositoryError::from))
            .collect()
    }
}

impl EmployeeWriter for DieselRepository {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<EmployeeId> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let id = EmployeeId::generate();
        let db_new_employee = DbNewEmployee::new(&id, new_employee, Utc::now().naive_utc());

        diesel::insert_into(users::table)
            .values(&db_new_employee)
            .execute(&mut conn)?;

        debug!("created employee {id} <{}>", new_employee.email);
        Ok(id)
    }

    fn update_employee(&self, id: &EmployeeId, employee: &Employee) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let changes = EmployeeChanges::from(employee);
        let affected = diesel::update(users::table.find(id.as_str()))
            .set(&changes)
            .execute(&mut conn)?;

        require_affected(affected)
    }

    fn delete_employee(&self, id: &EmployeeId) -> RepositoryResult<()> {
        use crate::schema::{credentials, users};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(credentials::table.filter(credentials::user_id.eq(id.as_str())))
                .execute(conn)?;
            let affected = diesel::delete(users::table.find(id.as_str())).execute(conn)?;
            require_affected(affected)
        })?;

        debug!("deleted employee {id}");
        Ok(())
    }
}
