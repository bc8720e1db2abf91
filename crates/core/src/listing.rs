use serde::{Deserialize, Serialize};

/// Envelope of a list view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    pub collection: String,
    pub total: usize,
    pub rows: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(collection: impl Into<String>, rows: Vec<T>) -> Self {
        Self {
            collection: collection.into(),
            total: rows.len(),
            rows,
        }
    }

    /// True when the view should render its "no data" state
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_follows_rows() {
        let listing = Listing::new("surgeons", vec!["Dr. Rao", "Dr. Sheikh"]);
        assert_eq!(listing.total, 2);
        assert!(!listing.is_empty());

        let empty: Listing<&str> = Listing::new("radiology", Vec::new());
        assert_eq!(empty.total, 0);
        assert!(empty.is_empty());
    }
}
