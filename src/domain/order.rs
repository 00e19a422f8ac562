use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::text_enum;
use crate::domain::types::PublicId;

text_enum!(
    OrderKind {
        Delivery => "delivery",
        Transfer => "transfer",
        Repair => "repair",
    }
);

text_enum!(
    /// Plain status enum; there is deliberately no workflow engine behind it.
    OrderStatus {
        Pending => "pending",
        Approved => "approved",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i32,
    pub org_id: i32,
    /// Externally visible reference, generated at creation.
    pub reference: String,
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub vehicle_id: i32,
    pub driver_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOrder {
    pub org_id: i32,
    pub reference: String,
    pub kind: OrderKind,
    pub vehicle_id: i32,
    pub driver_id: Option<i32>,
    pub notes: Option<String>,
}

impl NewOrder {
    #[must_use]
    pub fn new(
        org_id: i32,
        kind: OrderKind,
        vehicle_id: i32,
        driver_id: Option<i32>,
        notes: Option<String>,
    ) -> Self {
        Self {
            org_id,
            reference: PublicId::new().to_string(),
            kind,
            vehicle_id,
            driver_id,
            notes: notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

text_enum!(
    InvoiceStatus {
        Draft => "draft",
        Issued => "issued",
        Paid => "paid",
        Void => "void",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: i32,
    pub org_id: i32,
    pub order_id: i32,
    pub number: String,
    /// Minor currency units.
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub issued_at: Option<NaiveDateTime>,
    pub due_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewInvoice {
    pub org_id: i32,
    pub order_id: i32,
    pub number: String,
    pub amount_cents: i64,
}

impl NewInvoice {
    #[must_use]
    pub fn new(org_id: i32, order_id: i32, amount_cents: i64) -> Self {
        Self {
            org_id,
            order_id,
            number: format!("INV-{}", PublicId::new()),
            amount_cents: amount_cents.max(0),
        }
    }
}
