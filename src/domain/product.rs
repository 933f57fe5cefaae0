use serde::{Deserialize, Serialize};

use crate::domain::types::{ItemName, ProductId, TypeConstraintError, string_enum};

string_enum! {
    ProductCategory {
        Polish => "smalti",
        Gel => "gel",
        FaceCream => "creme_viso",
        Accessories => "accessori",
    }
}

/// Retail item sold over the counter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ItemName,
    pub category: ProductCategory,
    pub price: f64,
    pub description: String,
    pub active: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub name: ItemName,
    pub category: ProductCategory,
    pub price: f64,
    pub description: String,
}

impl NewProduct {
    pub fn new(
        name: ItemName,
        category: ProductCategory,
        price: f64,
        description: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        if price < 0.0 {
            return Err(TypeConstraintError::NonPositive);
        }
        Ok(Self {
            name,
            category,
            price,
            description: description.into().trim().to_string(),
        })
    }
}
