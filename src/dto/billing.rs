use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::order::{Invoice, Order};
use crate::dto::ListAction;
use crate::listing::{FilterOptions, ListSnapshot};
use crate::pagination::Paginated;

/// Query parameters accepted by the billing page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceListParams {
    pub page: Option<usize>,
    pub status: Vec<String>,
    pub toggle: Option<String>,
    pub clear: Option<u8>,
}

impl InvoiceListParams {
    pub fn action(&self) -> ListAction {
        ListAction::from_params(self.toggle.as_deref(), self.clear.is_some(), None)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            page: self.page.unwrap_or(1),
            search: String::new(),
            filters: vec![("status".to_string(), self.status.clone())],
            year_min: None,
            year_max: None,
        }
    }
}

/// Data required to render the billing template.
pub struct BillingPageData {
    pub invoices: Paginated<Invoice>,
    pub filter_options: FilterOptions,
    pub selected: BTreeMap<String, Vec<String>>,
    /// Completed orders that can still be invoiced.
    pub billable_orders: Vec<Order>,
}
