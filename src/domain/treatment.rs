use serde::{Deserialize, Serialize};

use crate::domain::types::{ItemName, TreatmentId, TypeConstraintError, string_enum};

string_enum! {
    TreatmentCategory {
        Nails => "unghie",
        Massage => "massaggi",
        Face => "viso",
        HairRemoval => "depilazione",
    }
}

/// Service offering listed in the salon catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Treatment {
    pub id: TreatmentId,
    pub name: ItemName,
    pub category: TreatmentCategory,
    pub duration_minutes: u32,
    pub price: f64,
    pub description: String,
    pub active: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTreatment {
    pub name: ItemName,
    pub category: TreatmentCategory,
    pub duration_minutes: u32,
    pub price: f64,
    pub description: String,
}

impl NewTreatment {
    pub fn new(
        name: ItemName,
        category: TreatmentCategory,
        duration_minutes: u32,
        price: f64,
        description: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        if duration_minutes == 0 || price < 0.0 {
            return Err(TypeConstraintError::NonPositive);
        }
        Ok(Self {
            name,
            category,
            duration_minutes,
            price,
            description: description.into().trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_duration_and_negative_price() {
        let name = ItemName::new("Manicure Classica").unwrap();
        assert!(NewTreatment::new(name.clone(), TreatmentCategory::Nails, 30, 15.0, "").is_ok());
        assert_eq!(
            NewTreatment::new(name.clone(), TreatmentCategory::Nails, 0, 15.0, "").unwrap_err(),
            TypeConstraintError::NonPositive
        );
        assert!(NewTreatment::new(name, TreatmentCategory::Nails, 30, -1.0, "").is_err());
    }

    #[test]
    fn category_tags_match_store_values() {
        assert_eq!(TreatmentCategory::HairRemoval.as_str(), "depilazione");
        assert_eq!(
            "massaggi".parse::<TreatmentCategory>().unwrap(),
            TreatmentCategory::Massage
        );
    }
}
