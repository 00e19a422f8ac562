use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::driver::Driver;
use crate::domain::screening::ScreeningLog;
use crate::dto::ListAction;
use crate::listing::{FilterOptions, ListSnapshot};
use crate::pagination::Paginated;

/// Query parameters accepted by the screening log page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScreeningListParams {
    pub page: Option<usize>,
    pub q: Option<String>,
    pub pending_q: Option<String>,
    pub kind: Vec<String>,
    pub result: Vec<String>,
    pub toggle: Option<String>,
    pub clear: Option<u8>,
}

impl ScreeningListParams {
    pub fn action(&self) -> ListAction {
        ListAction::from_params(
            self.toggle.as_deref(),
            self.clear.is_some(),
            self.pending_q.clone(),
        )
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            page: self.page.unwrap_or(1),
            search: self.q.clone().unwrap_or_default(),
            filters: vec![
                ("kind".to_string(), self.kind.clone()),
                ("result".to_string(), self.result.clone()),
            ],
            year_min: None,
            year_max: None,
        }
    }
}

/// One row of the screening table: the log entry with its driver.
#[derive(Debug, Serialize)]
pub struct ScreeningRow {
    pub log: ScreeningLog,
    pub driver: Driver,
}

/// Data required to render the screening log template.
pub struct ScreeningPageData {
    pub logs: Paginated<ScreeningRow>,
    pub filter_options: FilterOptions,
    pub selected: BTreeMap<String, Vec<String>>,
    pub search_query: Option<String>,
    /// Vocabulary for the add-entry form.
    pub drivers: Vec<Driver>,
}
