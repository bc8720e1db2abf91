//! hms-seed: load a small demo data set into the dashboard database.
//!
//! Takes no flags. Reads `DATABASE_URL`, exits 0 on success and 1 on any
//! error. Collections that already hold rows are left alone, and
//! complications are created by name only when missing.

use std::process::ExitCode;

use deadpool_postgres::Pool;
use hms_core::{ComplicationRegistry, NewComplication, RiskLevel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hms_server::config::Config;
use hms_server::db::{ComplicationRepository, create_pool};
use hms_server::error::AppError;

const PATIENTS: &[(&str, &str, i32, &str)] = &[
    ("P1001", "Asha Verma", 34, "Female"),
    ("P1002", "Ravi Kumar", 58, "Male"),
    ("P1003", "Meera Nair", 7, "Female"),
];

const MEDICATIONS: &[(&str, &str, &str, f64)] = &[
    ("Paracetamol 500", "Paracetamol", "Tablet", 2.5),
    ("Amoxicillin 250", "Amoxicillin", "Capsule", 6.0),
    ("Ondansetron 4", "Ondansetron", "Injection", 18.0),
];

const LAB_TESTS: &[(&str, &str, &str, f64)] = &[
    ("Blood Culture", "Microbiology", "-", 650.0),
    ("Complete Blood Count", "Haematology", "cells/uL", 300.0),
    ("Serum Creatinine", "Biochemistry", "mg/dL", 200.0),
];

const SURGEONS: &[(&str, &str)] = &[
    ("Dr. Kavita Rao", "General Surgery"),
    ("Dr. Imran Sheikh", "Orthopaedics"),
];

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => {
            tracing::info!("Seeding complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env();
    let pool = create_pool(&config.database_url)
        .await
        .map_err(|e| AppError::Unavailable(format!("Failed to create database pool: {}", e)))?;

    seed_patients(&pool).await?;
    seed_catalogues(&pool).await?;
    seed_complications(pool).await?;

    Ok(())
}

async fn is_empty(pool: &Pool, collection: &str) -> Result<bool, AppError> {
    let client = pool.get().await?;
    let row = client
        .query_one(&format!("SELECT count(*) FROM {}", collection), &[])
        .await?;
    let count: i64 = row.try_get(0)?;
    Ok(count == 0)
}

async fn seed_patients(pool: &Pool) -> Result<(), AppError> {
    let client = pool.get().await?;
    let mut inserted = 0;
    for (id, name, age, gender) in PATIENTS {
        inserted += client
            .execute(
                "INSERT INTO patients (id, name, age, gender) VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (id) DO NOTHING",
                &[id, name, age, gender],
            )
            .await?;
    }
    tracing::info!(inserted = inserted, "Seeded patients");
    Ok(())
}

async fn seed_catalogues(pool: &Pool) -> Result<(), AppError> {
    if is_empty(pool, "medications").await? {
        let client = pool.get().await?;
        for (name, generic, form, price) in MEDICATIONS {
            client
                .execute(
                    "INSERT INTO medications (name, generic_name, form, unit_price) \
                     VALUES ($1, $2, $3, $4)",
                    &[name, generic, form, price],
                )
                .await?;
        }
        tracing::info!(inserted = MEDICATIONS.len(), "Seeded medications");
    }

    if is_empty(pool, "lab_test_config").await? {
        let client = pool.get().await?;
        for (test_name, category, unit, price) in LAB_TESTS {
            client
                .execute(
                    "INSERT INTO lab_test_config (test_name, category, unit, price) \
                     VALUES ($1, $2, $3, $4)",
                    &[test_name, category, unit, price],
                )
                .await?;
        }
        tracing::info!(inserted = LAB_TESTS.len(), "Seeded lab test catalogue");
    }

    if is_empty(pool, "surgeons").await? {
        let client = pool.get().await?;
        for (name, specialty) in SURGEONS {
            client
                .execute(
                    "INSERT INTO surgeons (name, specialty) VALUES ($1, $2)",
                    &[name, specialty],
                )
                .await?;
        }
        tracing::info!(inserted = SURGEONS.len(), "Seeded surgeons");
    }

    Ok(())
}

fn demo_complications() -> Vec<NewComplication> {
    let entry = |name: &str, risk_level, description: &str| NewComplication {
        name: name.to_string(),
        risk_level,
        description: Some(description.to_string()),
        foreign_key: None,
        lab_id: None,
        radiology_id: None,
        medication_id: None,
    };

    vec![
        entry(
            "Sepsis",
            RiskLevel::High,
            "Systemic inflammatory response to infection",
        ),
        entry(
            "Surgical site infection",
            RiskLevel::Moderate,
            "Infection at or near the incision",
        ),
        entry("Nausea", RiskLevel::Low, "Post-operative nausea and vomiting"),
    ]
}

async fn seed_complications(pool: Pool) -> Result<(), AppError> {
    let mut registry = ComplicationRegistry::load(ComplicationRepository::new(pool)).await?;

    for complication in demo_complications() {
        if registry
            .items()
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&complication.name))
        {
            continue;
        }
        let created = registry.create(complication).await?;
        tracing::info!(id = created.id, name = %created.name, "Seeded complication");
    }

    tracing::info!(total = registry.items().len(), "Complication catalogue ready");
    Ok(())
}
