use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    Invoice as DomainInvoice, InvoiceStatus, NewInvoice as DomainNewInvoice,
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderKind, OrderStatus,
};

/// Diesel model for [`crate::domain::order::Order`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub org_id: i32,
    pub reference: String,
    pub kind: String,
    pub status: String,
    pub vehicle_id: i32,
    pub driver_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Order`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub org_id: i32,
    pub reference: &'a str,
    pub kind: String,
    pub vehicle_id: i32,
    pub driver_id: Option<i32>,
    pub notes: Option<&'a str>,
}

impl From<Order> for DomainOrder {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            org_id: order.org_id,
            reference: order.reference,
            kind: order.kind.parse().unwrap_or(OrderKind::Delivery),
            status: order.status.parse().unwrap_or(OrderStatus::Pending),
            vehicle_id: order.vehicle_id,
            driver_id: order.driver_id,
            notes: order.notes,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(order: &'a DomainNewOrder) -> Self {
        Self {
            org_id: order.org_id,
            reference: &order.reference,
            kind: order.kind.to_string(),
            vehicle_id: order.vehicle_id,
            driver_id: order.driver_id,
            notes: order.notes.as_deref(),
        }
    }
}

/// Diesel model for [`crate::domain::order::Invoice`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::invoices)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct Invoice {
    pub id: i32,
    pub org_id: i32,
    pub order_id: i32,
    pub number: String,
    pub amount_cents: i64,
    pub status: String,
    pub issued_at: Option<NaiveDateTime>,
    pub due_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Invoice`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::invoices)]
pub struct NewInvoice<'a> {
    pub org_id: i32,
    pub order_id: i32,
    pub number: &'a str,
    pub amount_cents: i64,
}

impl From<Invoice> for DomainInvoice {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            org_id: invoice.org_id,
            order_id: invoice.order_id,
            number: invoice.number,
            amount_cents: invoice.amount_cents,
            status: invoice.status.parse().unwrap_or(InvoiceStatus::Draft),
            issued_at: invoice.issued_at,
            due_at: invoice.due_at,
            created_at: invoice.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewInvoice> for NewInvoice<'a> {
    fn from(invoice: &'a DomainNewInvoice) -> Self {
        Self {
            org_id: invoice.org_id,
            order_id: invoice.order_id,
            number: &invoice.number,
            amount_cents: invoice.amount_cents,
        }
    }
}
