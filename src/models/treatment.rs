use diesel::prelude::*;

use crate::domain::treatment::{NewTreatment as DomainNewTreatment, Treatment as DomainTreatment};
use crate::domain::types::{ItemName, TreatmentId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::trattamenti)]
/// Diesel model for [`crate::domain::treatment::Treatment`].
pub struct Treatment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub description: String,
    pub active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trattamenti)]
pub struct NewTreatment<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub duration_minutes: i32,
    pub price: f64,
    pub description: &'a str,
    pub active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::trattamenti)]
pub struct TreatmentChanges<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub duration_minutes: i32,
    pub price: f64,
    pub description: &'a str,
    pub active: bool,
}

fn duration_to_db(minutes: u32) -> i32 {
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

impl TryFrom<Treatment> for DomainTreatment {
    type Error = TypeConstraintError;

    fn try_from(treatment: Treatment) -> Result<Self, Self::Error> {
        let duration_minutes =
            u32::try_from(treatment.duration_minutes).map_err(|_| TypeConstraintError::NonPositive)?;
        Ok(Self {
            id: TreatmentId::new(treatment.id)?,
            name: ItemName::new(treatment.name)?,
            category: treatment.category.parse()?,
            duration_minutes,
            price: treatment.price,
            description: treatment.description,
            active: treatment.active,
        })
    }
}

impl<'a> NewTreatment<'a> {
    pub fn new(id: &'a TreatmentId, treatment: &'a DomainNewTreatment) -> Self {
        Self {
            id: id.as_str(),
            name: treatment.name.as_str(),
            category: treatment.category.as_str(),
            duration_minutes: duration_to_db(treatment.duration_minutes),
            price: treatment.price,
            description: treatment.description.as_str(),
            active: true,
        }
    }
}

impl<'a> From<&'a DomainTreatment> for TreatmentChanges<'a> {
    fn from(treatment: &'a DomainTreatment) -> Self {
        Self {
            name: treatment.name.as_str(),
            category: treatment.category.as_str(),
            duration_minutes: duration_to_db(treatment.duration_minutes),
            price: treatment.price,
            description: treatment.description.as_str(),
            active: treatment.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::treatment::TreatmentCategory;

    #[test]
    fn treatment_into_domain() {
        let db = Treatment {
            id: "t1".into(),
            name: "Pulizia Viso".into(),
            category: "viso".into(),
            duration_minutes: 60,
            price: 35.0,
            description: "Pulizia profonda".into(),
            active: true,
        };
        let domain = DomainTreatment::try_from(db).expect("valid treatment");
        assert_eq!(domain.category, TreatmentCategory::Face);
        assert_eq!(domain.duration_minutes, 60);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let db = Treatment {
            id: "t1".into(),
            name: "Broken".into(),
            category: "viso".into(),
            duration_minutes: -5,
            price: 0.0,
            description: String::new(),
            active: true,
        };
        assert!(DomainTreatment::try_from(db).is_err());
    }
}
