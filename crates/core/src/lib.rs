//! hms-core: Shared hospital dashboard types and view logic
//!
//! This crate holds the record schemas of every dashboard collection,
//! the in-memory joiner, the filterable selector, the complication
//! registry and the sidebar navigation state. It knows nothing about
//! HTTP or Postgres; the server crate plugs the store in through the
//! `Fetcher` and `ComplicationStore` traits.

pub mod complication;
pub mod error;
pub mod fetch;
pub mod join;
pub mod listing;
pub mod navigation;
pub mod record;
pub mod selector;

pub use complication::{
    Complication, ComplicationPatch, ComplicationRegistry, ComplicationStore, NewComplication,
    RiskLevel,
};
pub use error::DashboardError;
pub use fetch::{Fetcher, ListQuery};
pub use join::{Correlated, Index, JsonRecord, join, join_records};
pub use listing::Listing;
pub use navigation::{NavigationState, Section, SectionGroup};
pub use record::{
    Appointment, Billing, DischargeSummary, LabTest, LabTestConfig, Medication, Patient,
    RadiologyTest, Record, References, Schema, Surgeon, TallyConfig, WardPatient,
};
pub use selector::{FilterableSelector, SelectOption, normalize};
