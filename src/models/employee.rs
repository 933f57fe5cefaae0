//! Diesel models representing salon staff.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::employee::{Employee as DomainEmployee, NewEmployee as DomainNewEmployee};
use crate::domain::types::{EmployeeEmail, EmployeeId, HexColor, PersonName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role: String,
    pub color: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`Employee`].
pub struct NewEmployee<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub role: &'a str,
    pub color: &'a str,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Full overwrite of an [`Employee`] row, identifier and creation time excluded.
pub struct EmployeeChanges<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub role: &'a str,
    pub color: &'a str,
    pub active: bool,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::new(employee.id)?,
            email: EmployeeEmail::new(employee.email)?,
            name: PersonName::new(employee.name)?,
            surname: PersonName::new(employee.surname)?,
            role: employee.role.parse()?,
            color: HexColor::new(employee.color)?,
            active: employee.active,
            created_at: employee.created_at,
        })
    }
}

impl<'a> NewEmployee<'a> {
    pub fn new(id: &'a EmployeeId, employee: &'a DomainNewEmployee, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.as_str(),
            email: employee.email.as_str(),
            name: employee.name.as_str(),
            surname: employee.surname.as_str(),
            role: employee.role.as_str(),
            color: employee.color.as_str(),
            active: true,
            created_at,
        }
    }
}

impl<'a> From<&'a DomainEmployee> for EmployeeChanges<'a> {
    fn from(employee: &'a DomainEmployee) -> Self {
        Self {
            email: employee.email.as_str(),
            name: employee.name.as_str(),
            surname: employee.surname.as_str(),
            role: employee.role.as_str(),
            color: employee.color.as_str(),
            active: employee.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::Role;
    use chrono::Utc;

    #[test]
    fn from_domain_new_employee() {
        let domain = DomainNewEmployee::try_new(
            "valentina@thermalya.it",
            "Valentina",
            "Rossi",
            "dipendente",
            "#FF69B4",
        )
        .expect("valid employee");
        let id = EmployeeId::generate();
        let now = Utc::now().naive_utc();
        let new = NewEmployee::new(&id, &domain, now);
        assert_eq!(new.id, id.as_str());
        assert_eq!(new.email, "valentina@thermalya.it");
        assert_eq!(new.role, "dipendente");
        assert!(new.active);
        assert_eq!(new.created_at, now);
    }

    #[test]
    fn employee_into_domain() {
        let db = Employee {
            id: "e1".into(),
            email: "Admin@Thermalya.it".into(),
            name: "Admin".into(),
            surname: "Thermalya".into(),
            role: "admin".into(),
            color: "#9b6ba8".into(),
            active: true,
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainEmployee::try_from(db).expect("valid employee");
        assert_eq!(domain.id.as_str(), "e1");
        assert_eq!(domain.email.as_str(), "admin@thermalya.it");
        assert_eq!(domain.role, Role::Admin);
        assert_eq!(domain.full_name(), "Admin Thermalya");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let db = Employee {
            id: "e1".into(),
            email: "x@thermalya.it".into(),
            name: "X".into(),
            surname: "Y".into(),
            role: "owner".into(),
            color: "#000000".into(),
            active: true,
            created_at: Utc::now().naive_utc(),
        };
        assert!(matches!(
            DomainEmployee::try_from(db),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }
}
