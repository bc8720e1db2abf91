//! Read side of a dashboard view

use std::future::Future;

use crate::record::Record;

/// Parameters of a collection read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    search: Option<String>,
}

impl ListQuery {
    /// Build a query from an optional free-text filter.
    ///
    /// The filter is trimmed and NUL characters are dropped, since text
    /// columns cannot hold them; a blank filter means "no filter".
    pub fn new(search: Option<String>) -> Self {
        let search = search
            .map(|s| s.replace('\0', "").trim().to_string())
            .filter(|s| !s.is_empty());
        Self { search }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

/// Source of one collection's rows, in the collection's schema order
pub trait Fetcher<T: Record> {
    type Error;

    fn fetch(&self, query: &ListQuery) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_trimmed() {
        let query = ListQuery::new(Some("  para ".to_string()));
        assert_eq!(query.search(), Some("para"));
    }

    #[test]
    fn blank_filter_is_no_filter() {
        assert_eq!(ListQuery::new(Some("   ".to_string())), ListQuery::all());
        assert_eq!(ListQuery::new(None).search(), None);
    }

    #[test]
    fn nul_characters_are_dropped() {
        let query = ListQuery::new(Some("as\0h".to_string()));
        assert_eq!(query.search(), Some("ash"));
        assert_eq!(ListQuery::new(Some("\0 \0".to_string())), ListQuery::all());
    }
}
