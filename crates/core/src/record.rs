//! Dashboard collections and their record schemas
//!
//! Each collection is a struct with explicit optional fields and a static
//! [`Schema`] describing how it is projected and ordered in the store.

use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::selector::SelectOption;

/// Storage layout of one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Table or view name
    pub collection: &'static str,
    /// Projected columns; must include `order_by`
    pub columns: &'static [&'static str],
    pub order_by: &'static str,
    pub ascending: bool,
    /// Column matched by a free-text filter, if the collection supports one
    pub search_column: Option<&'static str>,
}

impl Schema {
    /// Comma-separated column list for a SELECT clause
    pub fn projection(&self) -> String {
        self.columns.join(", ")
    }

    pub fn direction(&self) -> &'static str {
        if self.ascending { "ASC" } else { "DESC" }
    }
}

/// A row of a dashboard collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Display + Send + Sync;

    const SCHEMA: Schema;

    fn id(&self) -> &Self::Id;
}

/// A record that points at a row of another collection by identifier
pub trait References<S: Record>: Record {
    /// Name of the nested field carrying the referenced record
    const RELATION: &'static str;

    fn foreign_key(&self) -> Option<&S::Id>;
}

/// Registered patient, keyed by hospital UHID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Patient {
    type Id = String;

    const SCHEMA: Schema = Schema {
        collection: "patients",
        columns: &[
            "id",
            "name",
            "age",
            "gender",
            "phone",
            "address",
            "blood_group",
            "created_at",
        ],
        order_by: "name",
        ascending: true,
        search_column: Some("name"),
    };

    fn id(&self) -> &String {
        &self.id
    }
}

impl SelectOption for Patient {
    fn option_id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Outpatient visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: Option<String>,
    pub doctor: Option<String>,
    pub department: Option<String>,
    pub visit_type: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl Record for Appointment {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "appointments",
        columns: &[
            "id",
            "patient_id",
            "doctor",
            "department",
            "visit_type",
            "appointment_date",
            "appointment_time",
            "status",
            "notes",
        ],
        order_by: "appointment_date",
        ascending: false,
        search_column: None,
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl References<Patient> for Appointment {
    const RELATION: &'static str = "patient";

    fn foreign_key(&self) -> Option<&String> {
        self.patient_id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Billing {
    pub id: i64,
    pub patient_id: Option<String>,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub total_amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub payment_mode: Option<String>,
    pub status: Option<String>,
}

impl Billing {
    /// Outstanding amount; missing figures count as zero
    pub fn balance(&self) -> f64 {
        self.total_amount.unwrap_or(0.0) - self.paid_amount.unwrap_or(0.0)
    }
}

impl Record for Billing {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "billings",
        columns: &[
            "id",
            "patient_id",
            "bill_no",
            "bill_date",
            "total_amount",
            "paid_amount",
            "payment_mode",
            "status",
        ],
        order_by: "bill_date",
        ascending: false,
        search_column: Some("bill_no"),
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl References<Patient> for Billing {
    const RELATION: &'static str = "patient";

    fn foreign_key(&self) -> Option<&String> {
        self.patient_id.as_ref()
    }
}

/// IPD admission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardPatient {
    pub id: i64,
    pub patient_id: Option<String>,
    pub ward: Option<String>,
    pub bed_no: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub discharge_date: Option<NaiveDate>,
    pub consultant: Option<String>,
    pub diagnosis: Option<String>,
    pub status: Option<String>,
}

impl WardPatient {
    pub fn is_admitted(&self) -> bool {
        self.discharge_date.is_none()
    }
}

impl Record for WardPatient {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "ward_patients",
        columns: &[
            "id",
            "patient_id",
            "ward",
            "bed_no",
            "admission_date",
            "discharge_date",
            "consultant",
            "diagnosis",
            "status",
        ],
        order_by: "admission_date",
        ascending: false,
        search_column: None,
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl References<Patient> for WardPatient {
    const RELATION: &'static str = "patient";

    fn foreign_key(&self) -> Option<&String> {
        self.patient_id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeSummary {
    pub id: i64,
    pub ward_patient_id: Option<i64>,
    pub discharge_date: Option<NaiveDate>,
    pub final_diagnosis: Option<String>,
    pub treatment_given: Option<String>,
    pub condition_at_discharge: Option<String>,
    pub follow_up: Option<String>,
}

impl Record for DischargeSummary {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "discharge_summaries",
        columns: &[
            "id",
            "ward_patient_id",
            "discharge_date",
            "final_diagnosis",
            "treatment_given",
            "condition_at_discharge",
            "follow_up",
        ],
        order_by: "discharge_date",
        ascending: false,
        search_column: None,
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl References<WardPatient> for DischargeSummary {
    const RELATION: &'static str = "admission";

    fn foreign_key(&self) -> Option<&i64> {
        self.ward_patient_id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub generic_name: Option<String>,
    pub form: Option<String>,
    pub strength: Option<String>,
    pub unit_price: Option<f64>,
    pub stock: Option<i32>,
}

impl Record for Medication {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "medications",
        columns: &[
            "id",
            "name",
            "generic_name",
            "form",
            "strength",
            "unit_price",
            "stock",
        ],
        order_by: "name",
        ascending: true,
        search_column: Some("name"),
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl SelectOption for Medication {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiologyTest {
    pub id: i64,
    pub name: String,
    pub modality: Option<String>,
    pub body_part: Option<String>,
    pub price: Option<f64>,
}

impl Record for RadiologyTest {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "radiology",
        columns: &["id", "name", "modality", "body_part", "price"],
        order_by: "name",
        ascending: true,
        search_column: Some("name"),
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl SelectOption for RadiologyTest {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Lab order placed for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTest {
    pub id: i64,
    pub patient_id: Option<String>,
    pub test_name: String,
    pub sample_type: Option<String>,
    pub result: Option<String>,
    pub status: Option<String>,
    pub ordered_at: Option<DateTime<Utc>>,
}

impl Record for LabTest {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "lab",
        columns: &[
            "id",
            "patient_id",
            "test_name",
            "sample_type",
            "result",
            "status",
            "ordered_at",
        ],
        order_by: "ordered_at",
        ascending: false,
        search_column: Some("test_name"),
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl References<Patient> for LabTest {
    const RELATION: &'static str = "patient";

    fn foreign_key(&self) -> Option<&String> {
        self.patient_id.as_ref()
    }
}

/// Entry of the lab test catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTestConfig {
    pub id: i64,
    pub test_name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub reference_range: Option<String>,
    pub price: Option<f64>,
}

impl Record for LabTestConfig {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "lab_test_config",
        columns: &[
            "id",
            "test_name",
            "category",
            "unit",
            "reference_range",
            "price",
        ],
        order_by: "test_name",
        ascending: true,
        search_column: Some("test_name"),
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl SelectOption for LabTestConfig {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.test_name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surgeon {
    pub id: i64,
    pub name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Record for Surgeon {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "surgeons",
        columns: &["id", "name", "specialty", "phone", "email"],
        order_by: "name",
        ascending: true,
        search_column: Some("name"),
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl SelectOption for Surgeon {
    fn option_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Connection settings for the accounting system, read only here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyConfig {
    pub id: i64,
    pub company_name: Option<String>,
    pub server_url: Option<String>,
    pub enabled: Option<bool>,
}

impl Record for TallyConfig {
    type Id = i64;

    const SCHEMA: Schema = Schema {
        collection: "tally_config",
        columns: &["id", "company_name", "server_url", "enabled"],
        order_by: "id",
        ascending: true,
        search_column: None,
    };

    fn id(&self) -> &i64 {
        &self.id
    }
}
