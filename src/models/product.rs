use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{ItemName, ProductId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::prodotti)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    pub active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::prodotti)]
pub struct NewProduct<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub price: f64,
    pub description: &'a str,
    pub active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::prodotti)]
pub struct ProductChanges<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub price: f64,
    pub description: &'a str,
    pub active: bool,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            name: ItemName::new(product.name)?,
            category: product.category.parse()?,
            price: product.price,
            description: product.description,
            active: product.active,
        })
    }
}

impl<'a> NewProduct<'a> {
    pub fn new(id: &'a ProductId, product: &'a DomainNewProduct) -> Self {
        Self {
            id: id.as_str(),
            name: product.name.as_str(),
            category: product.category.as_str(),
            price: product.price,
            description: product.description.as_str(),
            active: true,
        }
    }
}

impl<'a> From<&'a DomainProduct> for ProductChanges<'a> {
    fn from(product: &'a DomainProduct) -> Self {
        Self {
            name: product.name.as_str(),
            category: product.category.as_str(),
            price: product.price,
            description: product.description.as_str(),
            active: product.active,
        }
    }
}
