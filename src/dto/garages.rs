use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::garage::Garage;
use crate::dto::ListAction;
use crate::listing::{FilterOptions, ListSnapshot};
use crate::pagination::Paginated;

/// Query parameters accepted by the garages list page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GarageListParams {
    pub page: Option<usize>,
    pub q: Option<String>,
    pub pending_q: Option<String>,
    pub city: Vec<String>,
    pub toggle: Option<String>,
    pub clear: Option<u8>,
}

impl GarageListParams {
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
            filters: vec![("city".to_string(), self.city.clone())],
            year_min: None,
            year_max: None,
        }
    }
}

/// Data required to render the garages list template.
pub struct GaragePageData {
    pub garages: Paginated<Garage>,
    pub filter_options: FilterOptions,
    pub selected: BTreeMap<String, Vec<String>>,
    pub search_query: Option<String>,
}
