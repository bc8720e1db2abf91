use deadpool_postgres::Pool;
use hms_core::{
    Complication, ComplicationPatch, ComplicationStore, ListQuery, NewComplication, Record,
};
use tokio_postgres::types::ToSql;

use super::repository::{CollectionRepository, decode_row};
use crate::error::AppError;

type Param = Box<dyn ToSql + Sync + Send>;

/// Repository for complication CRUD operations
#[derive(Clone)]
pub struct ComplicationRepository {
    pool: Pool,
}

impl ComplicationRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// List complications, optionally filtered by name
    pub async fn search(&self, query: &ListQuery) -> Result<Vec<Complication>, AppError> {
        CollectionRepository::<Complication>::new(self.pool.clone())
            .list(query)
            .await
    }
}

impl ComplicationStore for ComplicationRepository {
    type Error = AppError;

    async fn list(&self) -> Result<Vec<Complication>, AppError> {
        self.search(&ListQuery::all()).await
    }

    /// Create a new complication, returning the stored row
    async fn insert(&self, new: NewComplication) -> Result<Complication, AppError> {
        if new.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be blank".to_string()));
        }

        let client = self.pool.get().await?;
        let sql = format!(
            "WITH inserted AS (\
                INSERT INTO complications \
                (name, risk_level, description, foreign_key, lab_id, radiology_id, medication_id) \
                VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}\
             ) SELECT row_to_json(inserted) FROM inserted",
            Complication::SCHEMA.projection()
        );
        let row = client
            .query_one(
                &sql,
                &[
                    &new.name,
                    &new.risk_level.as_str(),
                    &new.description,
                    &new.foreign_key,
                    &new.lab_id,
                    &new.radiology_id,
                    &new.medication_id,
                ],
            )
            .await?;

        let created: Complication = decode_row(&row)?;
        tracing::info!(complication_id = created.id, name = %created.name, "Complication created");
        Ok(created)
    }

    /// Update the columns present in `patch`
    async fn update(&self, id: i64, patch: ComplicationPatch) -> Result<Complication, AppError> {
        if patch.is_empty() {
            return Err(AppError::BadRequest("update has no fields".to_string()));
        }
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::BadRequest("name must not be blank".to_string()));
        }

        let (assignments, mut params) = set_clause(patch);
        params.push(Box::new(id));
        let sql = format!(
            "WITH updated AS (\
                UPDATE complications SET {} WHERE id = ${} RETURNING {}\
             ) SELECT row_to_json(updated) FROM updated",
            assignments.join(", "),
            params.len(),
            Complication::SCHEMA.projection()
        );
        let refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let client = self.pool.get().await?;
        match client.query_opt(&sql, &refs).await? {
            Some(row) => {
                let updated: Complication = decode_row(&row)?;
                tracing::info!(complication_id = id, "Complication updated");
                Ok(updated)
            }
            None => Err(AppError::NotFound(format!("complication {} not found", id))),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let client = self.pool.get().await?;
        let affected = client
            .execute("DELETE FROM complications WHERE id = $1", &[&id])
            .await?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("complication {} not found", id)));
        }
        tracing::info!(complication_id = id, "Complication deleted");
        Ok(())
    }
}

/// `column = $n` assignments and their parameters, in patch field order
fn set_clause(patch: ComplicationPatch) -> (Vec<String>, Vec<Param>) {
    let mut assignments = Vec::new();
    let mut params: Vec<Param> = Vec::new();

    let mut push = |column: &str, value: Param| {
        params.push(value);
        assignments.push(format!("{} = ${}", column, params.len()));
    };

    if let Some(name) = patch.name {
        push("name", Box::new(name));
    }
    if let Some(risk_level) = patch.risk_level {
        push("risk_level", Box::new(risk_level.as_str()));
    }
    if let Some(description) = patch.description {
        push("description", Box::new(description));
    }
    if let Some(foreign_key) = patch.foreign_key {
        push("foreign_key", Box::new(foreign_key));
    }
    if let Some(lab_id) = patch.lab_id {
        push("lab_id", Box::new(lab_id));
    }
    if let Some(radiology_id) = patch.radiology_id {
        push("radiology_id", Box::new(radiology_id));
    }
    if let Some(medication_id) = patch.medication_id {
        push("medication_id", Box::new(medication_id));
    }

    (assignments, params)
}

#[cfg(test)]
mod tests {
    use hms_core::RiskLevel;

    use super::*;

    #[test]
    fn set_clause_numbers_present_fields() {
        let patch = ComplicationPatch {
            risk_level: Some(RiskLevel::High),
            lab_id: Some(3),
            ..Default::default()
        };

        let (assignments, params) = set_clause(patch);

        assert_eq!(assignments, vec!["risk_level = $1", "lab_id = $2"]);
        assert_eq!(params.len(), 2);
    }
}
