//! Treatment and product catalog maintenance.

use log::info;

use crate::domain::product::{NewProduct, Product};
use crate::domain::treatment::{NewTreatment, Treatment};
use crate::domain::types::{ProductId, TreatmentId};
use crate::repository::{ProductReader, ProductWriter, TreatmentReader, TreatmentWriter};
use crate::services::{ServiceError, ServiceResult};

/// Active treatments grouped by category.
pub fn list_treatments<R>(repo: &R) -> ServiceResult<Vec<Treatment>>
where
    R: TreatmentReader + ?Sized,
{
    repo.list_treatments().map_err(ServiceError::from)
}

pub fn create_treatment<R>(repo: &R, new_treatment: &NewTreatment) -> ServiceResult<TreatmentId>
where
    R: TreatmentWriter + ?Sized,
{
    let id = repo.create_treatment(new_treatment)?;
    info!("added treatment {} ({})", new_treatment.name, new_treatment.category);
    Ok(id)
}

pub fn update_treatment<R>(repo: &R, treatment: &Treatment) -> ServiceResult<()>
where
    R: TreatmentWriter + ?Sized,
{
    if treatment.duration_minutes == 0 || treatment.price < 0.0 {
        return Err(ServiceError::TypeConstraint(
            "duration must be positive and price non-negative".to_string(),
        ));
    }
    repo.update_treatment(&treatment.id, treatment)
        .map_err(ServiceError::from)
}

/// Hides the treatment from the catalog; booked appointments keep pointing to it.
pub fn retire_treatment<R>(repo: &R, id: &TreatmentId) -> ServiceResult<()>
where
    R: TreatmentWriter + ?Sized,
{
    repo.delete_treatment(id)?;
    info!("retired treatment {id}");
    Ok(())
}

pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products().map_err(ServiceError::from)
}

pub fn create_product<R>(repo: &R, new_product: &NewProduct) -> ServiceResult<ProductId>
where
    R: ProductWriter + ?Sized,
{
    let id = repo.create_product(new_product)?;
    info!("added product {} ({})", new_product.name, new_product.category);
    Ok(id)
}

pub fn update_product<R>(repo: &R, product: &Product) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if product.price < 0.0 {
        return Err(ServiceError::TypeConstraint(
            "price cannot be negative".to_string(),
        ));
    }
    repo.update_product(&product.id, product)
        .map_err(ServiceError::from)
}

pub fn retire_product<R>(repo: &R, id: &ProductId) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(id)?;
    info!("retired product {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductCategory;
    use crate::domain::treatment::TreatmentCategory;
    use crate::domain::types::ItemName;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[test]
    fn invalid_treatment_update_never_reaches_the_store() {
        let mut repo = MockRepository::new();
        repo.expect_update_treatment().never();

        let treatment = Treatment {
            id: TreatmentId::new("t1").unwrap(),
            name: ItemName::new("Massaggio Rilassante").unwrap(),
            category: TreatmentCategory::Massage,
            duration_minutes: 0,
            price: 50.0,
            description: String::new(),
            active: true,
        };
        assert!(matches!(
            update_treatment(&repo, &treatment),
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn retiring_a_missing_product_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_product()
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(
            retire_product(&repo, &ProductId::new("p404").unwrap()),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn create_product_returns_the_new_id() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .withf(|p| p.category == ProductCategory::Gel)
            .returning(|_| Ok(ProductId::new("p1").unwrap()));

        let new = NewProduct::new(
            ItemName::new("Gel Builder").unwrap(),
            ProductCategory::Gel,
            18.5,
            "",
        )
        .unwrap();
        assert_eq!(create_product(&repo, &new).unwrap().as_str(), "p1");
    }
}
