//! Repository implementation for the treatment catalog.

use diesel::prelude::*;
use log::debug;

use crate::{
    domain::{
        treatment::{NewTreatment, Treatment},
        types::TreatmentId,
    },
    models::treatment::{
        NewTreatment as DbNewTreatment, Treatment as DbTreatment, TreatmentChanges,
    },
    repository::{
        DieselRepository, TreatmentReader, TreatmentWriter,
        errors::{RepositoryError, RepositoryResult, require_affected},
    },
};

impl TreatmentReader for DieselRepository {
    fn get_treatment_by_id(&self, id: &TreatmentId) -> RepositoryResult<Option<Treatment>> {
        use crate::schema::trattamenti;

        let mut conn = self.conn()?;

        let db_treatment = trattamenti::table
            .find(id.as_str())
            .first::<DbTreatment>(&mut conn)
            .optional()?;

        db_treatment
            .map(Treatment::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_treatments(&self) -> RepositoryResult<Vec<Treatment>> {
        use crate::schema::trattamenti;

        let mut conn = self.conn()?;

        let db_treatments = trattamenti::table
            .filter(trattamenti::active.eq(true))
            .order((trattamenti::category.asc(), trattamenti::name.asc()))
            .load::<DbTreatment>(&mut conn)?;

        db_treatments
            .into_iter()
            .map(|t| Treatment::try_from(t).map_err(RepositoryError::from))
            .collect()
    }
}

impl TreatmentWriter for DieselRepository {
    fn create_treatment(&self, new_treatment: &NewTreatment) -> RepositoryResult<TreatmentId> {
        use crate::schema::trattamenti;

        let mut conn = self.conn()?;

        let id = TreatmentId::generate();
        diesel::insert_into(trattamenti::table)
            .values(&DbNewTreatment::new(&id, new_treatment))
            .execute(&mut conn)?;

        debug!("created treatment {id}");
        Ok(id)
    }

    fn update_treatment(&self, id: &TreatmentId, treatment: &Treatment) -> RepositoryResult<()> {
        use crate::schema::trattamenti;

        let mut conn = self.conn()?;

        let affected = diesel::update(trattamenti::table.find(id.as_str()))
            .set(&TreatmentChanges::from(treatment))
            .execute(&mut conn)?;

        require_affected(affected)
    }

    fn delete_treatment(&self, id: &TreatmentId) -> RepositoryResult<()> {
        use crate::schema::trattamenti;

        let mut conn = self.conn()?;

        let affected = diesel::update(trattamenti::table.find(id.as_str()))
            .set(trattamenti::active.eq(false))
            .execute(&mut conn)?;

        require_affected(affected)
    }
}
