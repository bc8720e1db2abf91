//! Section catalogue endpoint

use axum::Json;
use hms_core::{Section, SectionGroup};
use serde::Serialize;

/// One sidebar entry
#[derive(Debug, Serialize)]
pub struct SectionEntry {
    section: Section,
    label: &'static str,
    path: &'static str,
    collection: &'static str,
    group: SectionGroup,
}

/// GET /api/sections - Return every dashboard page with its API path
pub async fn list() -> Json<Vec<SectionEntry>> {
    let entries = Section::ALL
        .iter()
        .map(|section| SectionEntry {
            section: *section,
            label: section.label(),
            path: section.path(),
            collection: section.collection(),
            group: section.group(),
        })
        .collect();

    Json(entries)
}
