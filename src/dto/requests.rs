use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::driver::Driver;
use crate::domain::order::Order;
use crate::domain::vehicle::Vehicle;
use crate::dto::ListAction;
use crate::listing::{FilterOptions, ListSnapshot};
use crate::pagination::Paginated;

/// Query parameters accepted by the requests (orders) list page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderListParams {
    pub page: Option<usize>,
    pub q: Option<String>,
    pub pending_q: Option<String>,
    pub status: Vec<String>,
    pub kind: Vec<String>,
    pub toggle: Option<String>,
    pub clear: Option<u8>,
}

impl OrderListParams {
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
                ("status".to_string(), self.status.clone()),
                ("kind".to_string(), self.kind.clone()),
            ],
            year_min: None,
            year_max: None,
        }
    }
}

/// Data required to render the requests list template.
pub struct OrderPageData {
    pub orders: Paginated<Order>,
    pub filter_options: FilterOptions,
    pub selected: BTreeMap<String, Vec<String>>,
    pub search_query: Option<String>,
    /// Vocabulary for the create-order form.
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
}
