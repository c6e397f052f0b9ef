use serde::{Deserialize, Serialize};

use crate::filter::FilterExpression;

/// Parameters of one listing lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Formula the store filters records with
    pub formula: FilterExpression,
    /// Stop after this many records
    pub max_records: Option<u32>,
    /// Records per request, capped by the store at 100
    pub page_size: Option<u32>,
    /// Named view to read from, overriding the configured one
    pub view: Option<String>,
}

impl ListingQuery {
    pub fn new(formula: FilterExpression) -> Self {
        Self {
            formula,
            max_records: None,
            page_size: None,
            view: None,
        }
    }

    pub fn with_max_records(mut self, max_records: u32) -> Self {
        self.max_records = Some(max_records);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Record cap to enforce; zero means no cap
    pub fn record_limit(&self) -> Option<u32> {
        self.max_records.filter(|&max| max > 0)
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }
}
