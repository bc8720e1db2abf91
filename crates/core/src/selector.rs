//! Filterable selection over a candidate list
//!
//! Candidates are narrowed by a whitespace- and case-insensitive substring
//! match of the typed query against each candidate's label.

use crate::error::DashboardError;

pub const PLACEHOLDER: &str = "Search...";
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// A candidate that can be shown and picked in a selector
pub trait SelectOption {
    fn option_id(&self) -> String;
    fn label(&self) -> &str;
}

/// Strip all whitespace and lowercase
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Candidate list plus typed query, loading flag and current selection
#[derive(Debug, Clone)]
pub struct FilterableSelector<T> {
    options: Vec<T>,
    query: String,
    normalized_query: String,
    selected: Option<String>,
    loading: bool,
}

impl<T: SelectOption> FilterableSelector<T> {
    /// A selector waiting for its candidates
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            query: String::new(),
            normalized_query: String::new(),
            selected: None,
            loading: true,
        }
    }

    pub fn with_options(options: Vec<T>) -> Self {
        let mut selector = Self::new();
        selector.finish_loading(options);
        selector
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Install a fresh candidate list. A selection whose candidate is gone
    /// is dropped.
    pub fn finish_loading(&mut self, options: Vec<T>) {
        self.options = options;
        self.loading = false;

        if let Some(id) = &self.selected {
            if !self.options.iter().any(|o| &o.option_id() == id) {
                self.selected = None;
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Text entry is disabled while candidates load
    pub fn input_enabled(&self) -> bool {
        !self.loading
    }

    pub fn placeholder(&self) -> &'static str {
        if self.loading {
            LOADING_PLACEHOLDER
        } else {
            PLACEHOLDER
        }
    }

    /// Update the typed query; ignored while loading
    pub fn set_query(&mut self, query: &str) {
        if self.loading {
            return;
        }
        self.query = query.to_string();
        self.normalized_query = normalize(query);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Candidates matching the current query, in original order
    pub fn visible(&self) -> Vec<&T> {
        if self.normalized_query.is_empty() {
            return self.options.iter().collect();
        }
        self.options
            .iter()
            .filter(|o| normalize(o.label()).contains(&self.normalized_query))
            .collect()
    }

    /// Make the candidate with `id` the current value
    pub fn select(&mut self, id: &str) -> Result<&T, DashboardError> {
        if self.loading {
            return Err(DashboardError::SelectionUnavailable(
                "options are still loading".to_string(),
            ));
        }

        let Some(position) = self.options.iter().position(|o| o.option_id() == id) else {
            return Err(DashboardError::NotFound(format!("option {id}")));
        };

        self.selected = Some(id.to_string());
        Ok(&self.options[position])
    }

    pub fn selected(&self) -> Option<&T> {
        let id = self.selected.as_ref()?;
        self.options.iter().find(|o| &o.option_id() == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

impl<T: SelectOption> Default for FilterableSelector<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct LabItem {
        id: u32,
        name: &'static str,
    }

    impl SelectOption for LabItem {
        fn option_id(&self) -> String {
            self.id.to_string()
        }

        fn label(&self) -> &str {
            self.name
        }
    }

    fn catalogue() -> FilterableSelector<LabItem> {
        FilterableSelector::with_options(vec![
            LabItem { id: 1, name: "Blood Culture" },
            LabItem { id: 2, name: "Complete Blood Count" },
            LabItem { id: 3, name: "Urine Routine" },
        ])
    }

    fn visible_ids(selector: &FilterableSelector<LabItem>) -> Vec<u32> {
        selector.visible().iter().map(|t| t.id).collect()
    }

    #[test]
    fn normalize_strips_whitespace_and_case() {
        assert_eq!(normalize(" Blood\tCulture \n"), "bloodculture");
    }

    #[test]
    fn match_ignores_case_and_whitespace() {
        let mut selector = catalogue();

        for query in ["bloodculture", "BLOOD", " blood "] {
            selector.set_query(query);
            assert!(visible_ids(&selector).contains(&1), "query {query:?}");
        }

        selector.set_query("bloodculture");
        assert_eq!(visible_ids(&selector), vec![1]);
    }

    #[test]
    fn empty_query_shows_everything_in_order() {
        let mut selector = catalogue();
        selector.set_query("urine");
        selector.set_query("");
        assert_eq!(visible_ids(&selector), vec![1, 2, 3]);

        selector.set_query("   ");
        assert_eq!(visible_ids(&selector), vec![1, 2, 3]);
    }

    #[test]
    fn no_match_shows_nothing() {
        let mut selector = catalogue();
        selector.set_query("x-ray");
        assert!(selector.visible().is_empty());
    }

    #[test]
    fn loading_disables_entry_and_selection() {
        let mut selector: FilterableSelector<LabItem> = FilterableSelector::new();
        assert!(selector.is_loading());
        assert!(!selector.input_enabled());
        assert_eq!(selector.placeholder(), LOADING_PLACEHOLDER);

        selector.set_query("blood");
        assert_eq!(selector.query(), "");

        let err = selector.select("1").unwrap_err();
        assert!(matches!(err, DashboardError::SelectionUnavailable(_)));

        selector.finish_loading(vec![LabItem { id: 1, name: "Blood Culture" }]);
        assert!(selector.input_enabled());
        assert_eq!(selector.placeholder(), PLACEHOLDER);
        assert_eq!(selector.select("1").unwrap().name, "Blood Culture");
    }

    #[test]
    fn single_selection() {
        let mut selector = catalogue();
        assert!(selector.selected().is_none());

        selector.select("1").unwrap();
        selector.select("3").unwrap();
        assert_eq!(selector.selected().map(|t| t.id), Some(3));

        let err = selector.select("42").unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(_)));
        assert_eq!(selector.selected().map(|t| t.id), Some(3));

        selector.clear_selection();
        assert!(selector.selected().is_none());
    }

    #[test]
    fn reload_drops_vanished_selection() {
        let mut selector = catalogue();
        selector.select("2").unwrap();

        selector.begin_loading();
        selector.finish_loading(vec![LabItem { id: 1, name: "Blood Culture" }]);
        assert_eq!(selector.options().len(), 1);
        assert!(selector.selected().is_none());

        selector.select("1").unwrap();
        selector.begin_loading();
        selector.finish_loading(vec![
            LabItem { id: 1, name: "Blood Culture" },
            LabItem { id: 4, name: "Lipid Profile" },
        ]);
        assert_eq!(selector.selected().map(|t| t.id), Some(1));
    }
}
