//! Complication catalogue and its write-through registry
//!
//! The registry mirrors the `complications` collection in memory. Every
//! mutation goes to the store first; the in-memory list is patched only
//! after the store confirms, so a failed write leaves it untouched.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::record::{Record, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Moderate" => Ok(RiskLevel::Moderate),
            "High" => Ok(RiskLevel::High),
            other => Err(DashboardError::Invalid(format!(
                "unknown risk level '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complication {
    pub id: i64,
    pub name: String,
    pub risk_level: RiskLevel,
    pub description: Option<String>,
    pub foreign_key: Option<String>,
    pub lab_id: Option<i64>,
    pub radiology_id: Option<i64>,
    pub medication_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Complication {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "complications",
        columns: &[
            "id",
            "name",
            "risk_level",
            "description",
            "foreign_key",
            "lab_id",
            "radiology_id",
            "medication_id",
            "created_at",
        ],
        order_by: "id",
        ascending: true,
        search_column: Some("name"),
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// Fields of a complication before the store assigns its identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComplication {
    pub name: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub foreign_key: Option<String>,
    #[serde(default)]
    pub lab_id: Option<i64>,
    #[serde(default)]
    pub radiology_id: Option<i64>,
    #[serde(default)]
    pub medication_id: Option<i64>,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplicationPatch {
    pub name: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub description: Option<String>,
    pub foreign_key: Option<String>,
    pub lab_id: Option<i64>,
    pub radiology_id: Option<i64>,
    pub medication_id: Option<i64>,
}

impl ComplicationPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.risk_level.is_none()
            && self.description.is_none()
            && self.foreign_key.is_none()
            && self.lab_id.is_none()
            && self.radiology_id.is_none()
            && self.medication_id.is_none()
    }

    /// Apply the present fields onto `target`
    pub fn apply_to(&self, target: &mut Complication) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(risk_level) = self.risk_level {
            target.risk_level = risk_level;
        }
        if let Some(description) = &self.description {
            target.description = Some(description.clone());
        }
        if let Some(foreign_key) = &self.foreign_key {
            target.foreign_key = Some(foreign_key.clone());
        }
        if let Some(lab_id) = self.lab_id {
            target.lab_id = Some(lab_id);
        }
        if let Some(radiology_id) = self.radiology_id {
            target.radiology_id = Some(radiology_id);
        }
        if let Some(medication_id) = self.medication_id {
            target.medication_id = Some(medication_id);
        }
    }
}

/// Persistent side of the complication catalogue.
///
/// The store is the source of truth for conflicts: an unknown identifier
/// or a concurrent deletion comes back as an ordinary error.
pub trait ComplicationStore {
    type Error;

    fn list(&self) -> impl Future<Output = Result<Vec<Complication>, Self::Error>> + Send;

    fn insert(
        &self,
        new: NewComplication,
    ) -> impl Future<Output = Result<Complication, Self::Error>> + Send;

    fn update(
        &self,
        id: i64,
        patch: ComplicationPatch,
    ) -> impl Future<Output = Result<Complication, Self::Error>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// In-memory list of complications kept in step with a store
#[derive(Debug)]
pub struct ComplicationRegistry<S> {
    store: S,
    items: Vec<Complication>,
}

impl<S: ComplicationStore> ComplicationRegistry<S> {
    /// Read the current list from `store`
    pub async fn load(store: S) -> Result<Self, S::Error> {
        let items = store.list().await?;
        Ok(Self { store, items })
    }

    pub async fn refresh(&mut self) -> Result<(), S::Error> {
        self.items = self.store.list().await?;
        Ok(())
    }

    pub fn items(&self) -> &[Complication] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&Complication> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert through the store, then append the stored row
    pub async fn create(&mut self, new: NewComplication) -> Result<Complication, S::Error> {
        let created = self.store.insert(new).await?;
        self.items.push(created.clone());
        Ok(created)
    }

    /// Update through the store, then merge the returned row into the
    /// matching in-memory entry
    pub async fn update(
        &mut self,
        id: i64,
        patch: ComplicationPatch,
    ) -> Result<Complication, S::Error> {
        let updated = self.store.update(id, patch).await?;
        if let Some(item) = self.items.iter_mut().find(|c| c.id == id) {
            // Every column comes back from the store, so the merge is a replace
            *item = updated.clone();
        }
        Ok(updated)
    }

    /// Delete through the store, then drop the in-memory entry
    pub async fn delete(&mut self, id: i64) -> Result<(), S::Error> {
        self.store.delete(id).await?;
        self.items.retain(|c| c.id != id);
        Ok(())
    }
}
