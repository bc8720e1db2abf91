//! Read-only dashboard views
//!
//! Plain views list one collection. Joined views fetch the primary and the
//! referenced collection concurrently, then correlate them in memory.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use deadpool_postgres::Pool;
use hms_core::{
    Appointment, Billing, Correlated, DischargeSummary, Fetcher, LabTest, LabTestConfig,
    ListQuery, Listing, Medication, Patient, RadiologyTest, Record, References, Surgeon,
    TallyConfig, WardPatient, join,
};

use super::ListParams;
use crate::db::CollectionRepository;
use crate::error::AppError;

type ViewResult<T> = Result<Json<Listing<T>>, AppError>;

/// Fetch one collection into a listing
async fn listing<T: Record>(pool: Pool, query: ListQuery) -> ViewResult<T> {
    let rows = CollectionRepository::<T>::new(pool).fetch(&query).await?;
    Ok(Json(announce(Listing::new(T::SCHEMA.collection, rows), &query)))
}

fn announce<T>(listing: Listing<T>, query: &ListQuery) -> Listing<T> {
    if listing.is_empty() {
        tracing::debug!(
            collection = %listing.collection,
            filter = query.search(),
            "No rows to show"
        );
    }
    listing
}

/// Fetch `P` and `S` concurrently and nest each referenced `S` into its `P`
async fn joined<P, S>(pool: Pool, query: ListQuery) -> ViewResult<Correlated<P, S>>
where
    P: References<S>,
    S: Record,
{
    let primary = CollectionRepository::<P>::new(pool.clone());
    let secondary = CollectionRepository::<S>::new(pool);
    let everything = ListQuery::all();

    let (rows, related) = tokio::try_join!(primary.fetch(&query), secondary.fetch(&everything))?;

    let correlated = join(rows, &related)?;
    let unmatched = correlated.iter().filter(|c| c.related.is_none()).count();
    if unmatched > 0 {
        tracing::debug!(
            collection = P::SCHEMA.collection,
            relation = P::RELATION,
            unmatched = unmatched,
            "Rows without a matching reference"
        );
    }

    Ok(Json(announce(Listing::new(P::SCHEMA.collection, correlated), &query)))
}

/// GET /api/patients - List patients, `q` matches the name
pub async fn patients(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Patient> {
    listing(pool, params.into_query()).await
}

/// GET /api/patients/{id} - Read a patient
pub async fn patient(
    State(pool): State<Pool>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    CollectionRepository::<Patient>::new(pool)
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("patient {} not found", id)))
}

/// GET /api/visits - Appointments with their patient
pub async fn visits(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Correlated<Appointment, Patient>> {
    joined(pool, params.into_query()).await
}

/// GET /api/billing - Bills with their patient, `q` matches the bill number
pub async fn billing(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Correlated<Billing, Patient>> {
    joined(pool, params.into_query()).await
}

/// GET /api/ipd - Ward admissions with their patient
pub async fn admissions(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Correlated<WardPatient, Patient>> {
    joined(pool, params.into_query()).await
}

/// GET /api/ipd/discharges - Discharge summaries with their admission
pub async fn discharges(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Correlated<DischargeSummary, WardPatient>> {
    joined(pool, params.into_query()).await
}

/// GET /api/medications - Medication catalogue, `q` matches the name
pub async fn medications(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Medication> {
    listing(pool, params.into_query()).await
}

pub async fn radiology(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<RadiologyTest> {
    listing(pool, params.into_query()).await
}

/// GET /api/lab - Lab orders with their patient
pub async fn lab(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Correlated<LabTest, Patient>> {
    joined(pool, params.into_query()).await
}

pub async fn lab_config(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<LabTestConfig> {
    listing(pool, params.into_query()).await
}

pub async fn surgeons(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> ViewResult<Surgeon> {
    listing(pool, params.into_query()).await
}

pub async fn tally(State(pool): State<Pool>) -> ViewResult<TallyConfig> {
    listing(pool, ListQuery::all()).await
}
