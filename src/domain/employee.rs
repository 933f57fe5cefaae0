use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmployeeEmail, EmployeeId, HexColor, PersonName, string_enum};

string_enum! {
    /// Staff role; decides who appears in the bookable roster.
    Role {
        Admin => "admin",
        Employee => "dipendente",
        Receptionist => "receptionist",
    }
}

impl Role {
    /// Whether appointments can be assigned to staff with this role.
    pub const fn is_bookable(self) -> bool {
        matches!(self, Role::Admin | Role::Employee)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub email: EmployeeEmail,
    pub name: PersonName,
    pub surname: PersonName,
    pub role: Role,
    pub color: HexColor,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewEmployee {
    pub email: EmployeeEmail,
    pub name: PersonName,
    pub surname: PersonName,
    pub role: Role,
    pub color: HexColor,
}

impl NewEmployee {
    #[must_use]
    pub fn new(
        email: EmployeeEmail,
        name: PersonName,
        surname: PersonName,
        role: Role,
        color: HexColor,
    ) -> Self {
        Self {
            email,
            name,
            surname,
            role,
            color,
        }
    }

    /// Builds the payload from raw strings, validating each field.
    pub fn try_new(
        email: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        role: &str,
        color: impl Into<String>,
    ) -> Result<Self, crate::domain::types::TypeConstraintError> {
        Ok(Self::new(
            EmployeeEmail::new(email)?,
            PersonName::new(name)?,
            PersonName::new(surname)?,
            role.parse()?,
            HexColor::new(color)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tags_round_trip_through_strings() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert!("manager".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn receptionists_are_not_bookable() {
        assert!(Role::Admin.is_bookable());
        assert!(Role::Employee.is_bookable());
        assert!(!Role::Receptionist.is_bookable());
    }

    #[test]
    fn try_new_validates_every_field() {
        let employee =
            NewEmployee::try_new("sara@thermalya.it", "Sara", "Bianchi", "dipendente", "#00ced1")
                .unwrap();
        assert_eq!(employee.role, Role::Employee);
        assert_eq!(employee.color.as_str(), "#00CED1");

        assert!(NewEmployee::try_new("sara", "Sara", "Bianchi", "dipendente", "#00CED1").is_err());
        assert!(
            NewEmployee::try_new("sara@thermalya.it", "", "Bianchi", "dipendente", "#00CED1")
                .is_err()
        );
        assert!(
            NewEmployee::try_new("sara@thermalya.it", "Sara", "Bianchi", "boss", "#00CED1")
                .is_err()
        );
    }
}
