//! Selector candidates for typeahead inputs

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use deadpool_postgres::Pool;
use hms_core::{
    DashboardError, FilterableSelector, LabTestConfig, ListQuery, Medication, Patient,
    RadiologyTest, Record, SelectOption, Surgeon,
};
use serde::Serialize;

use super::ListParams;
use crate::db::CollectionRepository;
use crate::error::AppError;

/// Collections that can feed a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Patients,
    Medications,
    Radiology,
    LabTests,
    Surgeons,
}

impl FromStr for OptionKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patients" => Ok(OptionKind::Patients),
            "medications" => Ok(OptionKind::Medications),
            "radiology" => Ok(OptionKind::Radiology),
            "lab-tests" => Ok(OptionKind::LabTests),
            "surgeons" => Ok(OptionKind::Surgeons),
            other => Err(DashboardError::NotFound(format!("option list '{}'", other))),
        }
    }
}

/// One selectable candidate
#[derive(Debug, Serialize)]
pub struct OptionItem {
    pub id: String,
    pub label: String,
}

/// GET /api/options/{kind} - Candidates whose label matches `q`
pub async fn list(
    State(pool): State<Pool>,
    Path(kind): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<OptionItem>>, AppError> {
    let kind: OptionKind = kind.parse()?;
    let query = params.q.unwrap_or_default();

    let items = match kind {
        OptionKind::Patients => candidates::<Patient>(pool, &query).await?,
        OptionKind::Medications => candidates::<Medication>(pool, &query).await?,
        OptionKind::Radiology => candidates::<RadiologyTest>(pool, &query).await?,
        OptionKind::LabTests => candidates::<LabTestConfig>(pool, &query).await?,
        OptionKind::Surgeons => candidates::<Surgeon>(pool, &query).await?,
    };

    Ok(Json(items))
}

/// Load every row of `T` into a selector and return the visible subset
async fn candidates<T>(pool: Pool, query: &str) -> Result<Vec<OptionItem>, AppError>
where
    T: Record + SelectOption,
{
    let mut selector = FilterableSelector::<T>::new();
    let rows = CollectionRepository::<T>::new(pool)
        .list(&ListQuery::all())
        .await?;
    selector.finish_loading(rows);
    selector.set_query(query);

    Ok(selector
        .visible()
        .into_iter()
        .map(|option| OptionItem {
            id: option.option_id(),
            label: option.label().to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_path() {
        assert_eq!("lab-tests".parse::<OptionKind>().unwrap(), OptionKind::LabTests);
        assert!("wards".parse::<OptionKind>().is_err());
    }
}
