use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::garage::Garage;
use crate::domain::vehicle::Vehicle;
use crate::dto::{ListAction, parse_bound};
use crate::listing::{FilterOptions, ListSnapshot};
use crate::pagination::Paginated;

/// Query parameters accepted by the fleet list page. Multi-select categories
/// arrive as repeated keys (`status=available&status=in_service`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FleetListParams {
    pub page: Option<usize>,
    /// Committed search term currently in effect.
    pub q: Option<String>,
    /// Newly committed search value (input blur); presence triggers the
    /// commit path even when the value is empty.
    pub pending_q: Option<String>,
    pub status: Vec<String>,
    pub garage: Vec<String>,
    pub year_min: Option<String>,
    pub year_max: Option<String>,
    pub toggle: Option<String>,
    pub clear: Option<u8>,
}

impl FleetListParams {
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
                ("garage".to_string(), self.garage.clone()),
            ],
            year_min: parse_bound(self.year_min.as_deref()),
            year_max: parse_bound(self.year_max.as_deref()),
        }
    }
}

/// Data required to render the fleet list template.
pub struct FleetPageData {
    pub vehicles: Paginated<Vehicle>,
    pub filter_options: FilterOptions,
    /// Selected option ids per category, for checkbox state and URLs.
    pub selected: BTreeMap<String, Vec<String>>,
    pub search_query: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    /// Garages of the organization, for the add-vehicle form.
    pub garages: Vec<Garage>,
}
