//! Record list view state
//!
//! Selection, level filters and the search query live here; the visible
//! list is always derived from them by [`RecordView::filtered`].

use std::collections::BTreeSet;

use shared::models::Employee;

use crate::{ClientError, HttpClient};

#[derive(Debug, Clone, Default)]
pub struct RecordView {
    records: Vec<Employee>,
    selected: BTreeSet<String>,
    level_filters: BTreeSet<String>,
    query: String,
    select_all: bool,
}

/// Outcome of deleting the selected records
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, ClientError)>,
}

impl RecordView {
    pub fn new(records: Vec<Employee>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn level_filters(&self) -> &BTreeSet<String> {
        &self.level_filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_select_all(&self) -> bool {
        self.select_all
    }

    /// Records passing the level filters (all when none set) and whose
    /// name or position contains the query, ignoring case
    pub fn filtered(&self) -> Vec<&Employee> {
        let query = self.query.trim().to_lowercase();

        self.records
            .iter()
            .filter(|r| self.level_filters.is_empty() || self.level_filters.contains(&r.level))
            .filter(|r| {
                query.is_empty()
                    || r.name.to_lowercase().contains(&query)
                    || r.position.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Add `id` to the selection; selecting twice keeps it selected
    pub fn select(&mut self, id: &str) {
        self.selected.insert(id.to_string());
        self.sync_select_all();
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.sync_select_all();
    }

    /// Select every record, or clear the selection if all were selected
    pub fn toggle_select_all(&mut self) {
        self.select_all = !self.select_all;
        self.selected = if self.select_all {
            self.records.iter().map(|r| r.id.clone()).collect()
        } else {
            BTreeSet::new()
        };
    }

    /// Enable a level filter; adding it twice keeps it enabled
    pub fn add_filter(&mut self, level: &str) {
        self.level_filters.insert(level.to_string());
    }

    pub fn toggle_filter(&mut self, level: &str) {
        if !self.level_filters.remove(level) {
            self.level_filters.insert(level.to_string());
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Swap in a freshly fetched list; selections of vanished ids are dropped
    pub fn replace_records(&mut self, records: Vec<Employee>) {
        self.selected
            .retain(|id| records.iter().any(|r| &r.id == id));
        self.records = records;
        self.sync_select_all();
    }

    /// Delete every selected record, one request per id
    ///
    /// Only ids the server confirmed are removed locally; the rest stay
    /// selected.
    pub async fn delete_selected(&mut self, client: &HttpClient) -> DeleteReport {
        let mut report = DeleteReport::default();

        for id in self.selected.clone() {
            match client.delete_record(&id).await {
                Ok(_) => report.deleted.push(id),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Failed to delete record");
                    report.failed.push((id, e));
                }
            }
        }

        for id in &report.deleted {
            self.selected.remove(id);
        }
        self.records.retain(|r| !report.deleted.contains(&r.id));
        self.sync_select_all();

        report
    }

    fn sync_select_all(&mut self) {
        self.select_all = !self.records.is_empty() && self.selected.len() == self.records.len();
    }
}
