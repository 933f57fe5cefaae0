//! Repository implementation for retail products.

use diesel::prelude::*;
use log::debug;

use crate::{
    domain::{
        product::{NewProduct, Product},
        types::ProductId,
    },
    models::product::{NewProduct as DbNewProduct, Product as DbProduct, ProductChanges},
    repository::{
        DieselRepository, ProductReader, ProductWriter,
        errors::{RepositoryError, RepositoryResult, require_affected},
    },
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::prodotti;

        let mut conn = self.conn()?;

        let db_product = prodotti::table
            .find(id.as_str())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        db_product
            .map(Product::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::prodotti;

        let mut conn = self.conn()?;

        let db_products = prodotti::table
            .filter(prodotti::active.eq(true))
            .order((prodotti::category.asc(), prodotti::name.asc()))
            .load::<DbProduct>(&mut conn)?;

        db_products
            .into_iter()
            .map(|p| Product::try_from(p).map_err(RepositoryError::from))
            .collect()
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<ProductId> {
        use crate::schema::prodotti;

        let mut conn = self.conn()?;

        let id = ProductId::generate();
        diesel::insert_into(prodotti::table)
            .values(&DbNewProduct::new(&id, new_product))
            .execute(&mut conn)?;

        debug!("created product {id}");
        Ok(id)
    }

    fn update_product(&self, id: &ProductId, product: &Product) -> RepositoryResult<()> {
        use crate::schema::prodotti;

        let mut conn = self.conn()?;

        let affected = diesel::update(prodotti::table.find(id.as_str()))
            .set(&ProductChanges::from(product))
            .execute(&mut conn)?;

        require_affected(affected)
    }

    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        use crate::schema::prodotti;

        let mut conn = self.conn()?;

        let affected = diesel::update(prodotti::table.find(id.as_str()))
            .set(prodotti::active.eq(false))
            .execute(&mut conn)?;

        require_affected(affected)
    }
}
