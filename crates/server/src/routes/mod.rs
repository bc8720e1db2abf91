mod complication;
pub mod health;
pub mod metrics;
mod options;
pub mod sections;
mod views;

use axum::{
    Router,
    routing::{get, patch},
};
use deadpool_postgres::Pool;
use serde::Deserialize;

use hms_core::ListQuery;

/// Query string shared by every list view
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> ListQuery {
        ListQuery::new(self.q)
    }
}

/// Build dashboard API routes
pub fn api_routes() -> Router<Pool> {
    Router::new()
        .route("/sections", get(sections::list))
        .route("/patients", get(views::patients))
        .route("/patients/{id}", get(views::patient))
        .route("/visits", get(views::visits))
        .route("/billing", get(views::billing))
        .route("/ipd", get(views::admissions))
        .route("/ipd/discharges", get(views::discharges))
        .route("/medications", get(views::medications))
        .route("/radiology", get(views::radiology))
        .route("/lab", get(views::lab))
        .route("/lab/config", get(views::lab_config))
        .route("/surgeons", get(views::surgeons))
        .route("/settings/tally", get(views::tally))
        .route(
            "/complications",
            get(complication::list).post(complication::create),
        )
        .route(
            "/complications/{id}",
            patch(complication::update).delete(complication::delete),
        )
        .route("/options/{kind}", get(options::list))
}
