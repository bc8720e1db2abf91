//! Dashboard pages and sidebar state

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Collapsible sidebar group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionGroup {
    Clinical,
    Diagnostics,
    Administration,
}

/// A dashboard page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Patients,
    Visits,
    Billing,
    Ipd,
    Medications,
    Radiology,
    Lab,
    Complications,
    Surgeons,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Patients,
        Section::Visits,
        Section::Billing,
        Section::Ipd,
        Section::Medications,
        Section::Radiology,
        Section::Lab,
        Section::Complications,
        Section::Surgeons,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Patients => "Patients",
            Section::Visits => "Visits",
            Section::Billing => "Billing",
            Section::Ipd => "IPD Admissions",
            Section::Medications => "Medications",
            Section::Radiology => "Radiology Tests",
            Section::Lab => "Lab Tests",
            Section::Complications => "Complications",
            Section::Surgeons => "Surgeons",
        }
    }

    /// API path serving this page
    pub fn path(&self) -> &'static str {
        match self {
            Section::Patients => "/api/patients",
            Section::Visits => "/api/visits",
            Section::Billing => "/api/billing",
            Section::Ipd => "/api/ipd",
            Section::Medications => "/api/medications",
            Section::Radiology => "/api/radiology",
            Section::Lab => "/api/lab",
            Section::Complications => "/api/complications",
            Section::Surgeons => "/api/surgeons",
        }
    }

    /// Primary collection read by the page
    pub fn collection(&self) -> &'static str {
        match self {
            Section::Patients => "patients",
            Section::Visits => "appointments",
            Section::Billing => "billings",
            Section::Ipd => "ward_patients",
            Section::Medications => "medications",
            Section::Radiology => "radiology",
            Section::Lab => "lab",
            Section::Complications => "complications",
            Section::Surgeons => "surgeons",
        }
    }

    pub fn group(&self) -> SectionGroup {
        match self {
            Section::Patients | Section::Visits | Section::Ipd | Section::Complications => {
                SectionGroup::Clinical
            }
            Section::Medications | Section::Radiology | Section::Lab => SectionGroup::Diagnostics,
            Section::Billing | Section::Surgeons => SectionGroup::Administration,
        }
    }
}

/// Per-view navigation state: the current page and the expanded groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current: Section,
    open: BTreeSet<SectionGroup>,
}

impl NavigationState {
    pub fn new(current: Section) -> Self {
        Self {
            current,
            open: BTreeSet::from([current.group()]),
        }
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// Switch page, expanding the group that holds it
    pub fn navigate(&mut self, section: Section) {
        self.current = section;
        self.open.insert(section.group());
    }

    /// Flip a group open/closed; returns whether it is now open
    pub fn toggle(&mut self, group: SectionGroup) -> bool {
        if !self.open.remove(&group) {
            self.open.insert(group);
            return true;
        }
        false
    }

    pub fn is_open(&self, group: SectionGroup) -> bool {
        self.open.contains(&group)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Section::Patients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_unique() {
        let paths: BTreeSet<_> = Section::ALL.iter().map(Section::path).collect();
        assert_eq!(paths.len(), Section::ALL.len());
    }

    #[test]
    fn navigating_opens_the_target_group() {
        let mut nav = NavigationState::default();
        assert!(nav.is_open(SectionGroup::Clinical));
        assert!(!nav.is_open(SectionGroup::Diagnostics));

        nav.navigate(Section::Lab);
        assert_eq!(nav.current(), Section::Lab);
        assert!(nav.is_open(SectionGroup::Diagnostics));
    }

    #[test]
    fn toggle_flips_one_group() {
        let mut nav = NavigationState::default();
        assert!(!nav.toggle(SectionGroup::Clinical));
        assert!(nav.toggle(SectionGroup::Administration));
        assert!(!nav.is_open(SectionGroup::Clinical));
        assert!(nav.is_open(SectionGroup::Administration));
        assert_eq!(nav.current(), Section::Patients);
    }
}
