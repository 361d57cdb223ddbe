// src/provider/query.rs

//! List parameters and their query-string encoding.

use std::collections::BTreeMap;

use crate::types::Sort;

/// Page size used when nothing else is configured.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Everything a list request can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub sort: Option<Sort>,
    /// Echoed verbatim as `filter[<key>]=<value>`.
    pub filters: BTreeMap<String, String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Query pairs in wire order: page number, page size, filters, sort.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page[number]".to_string(), self.page.to_string()),
            ("page[size]".to_string(), self.per_page.to_string()),
        ];
        for (key, value) in &self.filters {
            query.push((format!("filter[{key}]"), value.clone()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort".to_string(), sort.to_param()));
        }
        query
    }
}
