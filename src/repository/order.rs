use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::order::{
    Invoice, InvoiceStatus, NewInvoice, NewOrder, Order, OrderStatus,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, InvoiceListQuery, InvoiceReader, InvoiceWriter, OrderListQuery, OrderReader,
    OrderWriter,
};
use crate::schema::{invoices, orders};

fn filtered(query: &OrderListQuery) -> orders::BoxedQuery<'static, Sqlite> {
    let mut filtered = orders::table
        .filter(orders::org_id.eq(query.org_id))
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        filtered = filtered.filter(orders::reference.like(pattern));
    }

    if !query.statuses.is_empty() {
        let statuses: Vec<String> = query.statuses.iter().map(ToString::to_string).collect();
        filtered = filtered.filter(orders::status.eq_any(statuses));
    }

    if !query.kinds.is_empty() {
        let kinds: Vec<String> = query.kinds.iter().map(ToString::to_string).collect();
        filtered = filtered.filter(orders::kind.eq_any(kinds));
    }

    filtered
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Order>> {
        use crate::models::order::Order as DbOrder;

        let mut conn = self.conn()?;
        let order = orders::table
            .find(id)
            .filter(orders::org_id.eq(org_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        Ok(order.map(Into::into))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)> {
        use crate::models::order::Order as DbOrder;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items_query = filtered(&query).order(orders::id.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, items))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        use crate::models::order::{NewOrder as DbNewOrder, Order as DbOrder};

        let mut conn = self.conn()?;
        let insertable: DbNewOrder = new_order.into();
        let created = diesel::insert_into(orders::table)
            .values(&insertable)
            .get_result::<DbOrder>(&mut conn)?;

        Ok(created.into())
    }

    fn set_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order> {
        use crate::models::order::Order as DbOrder;

        let mut conn = self.conn()?;
        let updated = diesel::update(orders::table.find(order_id))
            .set((
                orders::status.eq(status.to_string()),
                orders::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbOrder>(&mut conn)?;

        Ok(updated.into())
    }
}

impl InvoiceReader for DieselRepository {
    fn list_invoices(&self, query: InvoiceListQuery) -> RepositoryResult<(usize, Vec<Invoice>)> {
        use crate::models::order::Invoice as DbInvoice;

        let mut conn = self.conn()?;

        let mut restrict = invoices::table
            .filter(invoices::org_id.eq(query.org_id))
            .into_boxed();
        let mut count = invoices::table
            .filter(invoices::org_id.eq(query.org_id))
            .into_boxed();

        if !query.statuses.is_empty() {
            let statuses: Vec<String> = query.statuses.iter().map(ToString::to_string).collect();
            restrict = restrict.filter(invoices::status.eq_any(statuses.clone()));
            count = count.filter(invoices::status.eq_any(statuses));
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        let mut items_query = restrict.order(invoices::id.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbInvoice>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, items))
    }
}

impl InvoiceWriter for DieselRepository {
    fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice> {
        use crate::models::order::{Invoice as DbInvoice, NewInvoice as DbNewInvoice};

        let mut conn = self.conn()?;
        let insertable: DbNewInvoice = new_invoice.into();
        let created = diesel::insert_into(invoices::table)
            .values(&insertable)
            .get_result::<DbInvoice>(&mut conn)?;

        Ok(created.into())
    }

    fn set_invoice_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> RepositoryResult<Invoice> {
        use crate::models::order::Invoice as DbInvoice;

        let mut conn = self.conn()?;

        // Issuing stamps issued_at once; paying and voiding leave it alone.
        let issued_at = match status {
            InvoiceStatus::Issued => Some(chrono::Utc::now().naive_utc()),
            _ => None,
        };

        let updated = match issued_at {
            Some(ts) => diesel::update(invoices::table.find(invoice_id))
                .set((
                    invoices::status.eq(status.to_string()),
                    invoices::issued_at.eq(ts),
                ))
                .get_result::<DbInvoice>(&mut conn)?,
            None => diesel::update(invoices::table.find(invoice_id))
                .set(invoices::status.eq(status.to_string()))
                .get_result::<DbInvoice>(&mut conn)?,
        };

        Ok(updated.into())
    }
}
